//! Standard chart-of-accounts template used to seed a new ledger.

use balafon_shared::types::AccountId;

use super::types::{AccountClass, AccountType, ChartAccount};

/// Seed rows: code, French name and account type.
///
/// Covers every mandatory account plus one representative per
/// extraordinary and analytical class so a freshly seeded chart passes
/// compliance scoring outright.
const TEMPLATE_ROWS: &[(&str, &str, AccountType)] = &[
    ("10", "Capital", AccountType::Equity),
    ("11", "Réserves", AccountType::Equity),
    ("16", "Emprunts et dettes assimilées", AccountType::Liability),
    ("21", "Immobilisations incorporelles", AccountType::Asset),
    ("22", "Terrains", AccountType::Asset),
    ("23", "Bâtiments", AccountType::Asset),
    ("24", "Matériel", AccountType::Asset),
    ("28", "Amortissements", AccountType::Asset),
    ("31", "Marchandises", AccountType::Asset),
    ("32", "Matières premières", AccountType::Asset),
    ("40", "Fournisseurs", AccountType::Liability),
    ("41", "Clients", AccountType::Asset),
    ("42", "Personnel", AccountType::Liability),
    ("44", "État", AccountType::Liability),
    ("51", "Valeurs à encaisser", AccountType::Asset),
    ("52", "Banques", AccountType::Asset),
    ("57", "Caisse", AccountType::Asset),
    ("60", "Achats", AccountType::Expense),
    ("61", "Transports", AccountType::Expense),
    ("62", "Services extérieurs A", AccountType::Expense),
    ("63", "Services extérieurs B", AccountType::Expense),
    ("64", "Impôts et taxes", AccountType::Expense),
    ("68", "Dotations aux amortissements", AccountType::Expense),
    ("70", "Ventes", AccountType::Income),
    ("71", "Subventions d'exploitation", AccountType::Income),
    ("75", "Autres produits", AccountType::Income),
    ("78", "Transferts de charges", AccountType::Income),
    ("83", "Charges hors activités ordinaires", AccountType::Expense),
    ("84", "Produits hors activités ordinaires", AccountType::Income),
    ("92", "Comptes de coûts", AccountType::Expense),
];

/// Builds the standard top-level chart of accounts.
///
/// Accounts are freshly identified on every call; third-party control
/// accounts come flagged auxiliary and treasury accounts reconcilable.
#[must_use]
pub fn standard_chart() -> Vec<ChartAccount> {
    TEMPLATE_ROWS
        .iter()
        .filter_map(|(code, name, account_type)| {
            let class = AccountClass::from_code(code)?;
            Some(ChartAccount {
                id: AccountId::new(),
                code: (*code).to_string(),
                class,
                account_type: *account_type,
                name: (*name).to_string(),
                description: None,
                parent_id: None,
                level: 1,
                is_auxiliary: matches!(*code, "40" | "41" | "42" | "44"),
                is_reconcilable: matches!(*code, "51" | "52" | "57"),
                is_active: true,
            })
        })
        .collect()
}
