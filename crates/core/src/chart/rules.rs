//! Static SYSCOHADA rule tables.
//!
//! Leaf data with no dependencies: the class to account-type mapping,
//! class code ranges, the mandatory account list and the reference
//! naming table used by the compliance scorer.

use super::types::{AccountClass, AccountType};

/// Maximum length of an account name before a warning is raised.
pub const MAX_NAME_LENGTH: usize = 100;

/// Account codes every SYSCOHADA chart must carry as active accounts.
pub const MANDATORY_CODES: [&str; 27] = [
    "10", "11", "16", "21", "22", "23", "24", "28", "31", "32", "40", "41", "42", "44", "51",
    "52", "57", "60", "61", "62", "63", "64", "68", "70", "71", "75", "78",
];

/// Returns the account types allowed in a class.
#[must_use]
pub fn allowed_types(class: AccountClass) -> &'static [AccountType] {
    match class {
        AccountClass::DurableResources => &[AccountType::Equity, AccountType::Liability],
        AccountClass::FixedAssets | AccountClass::Inventories | AccountClass::Treasury => {
            &[AccountType::Asset]
        }
        AccountClass::ThirdParty => &[AccountType::Asset, AccountType::Liability],
        AccountClass::OperatingExpenses => &[AccountType::Expense],
        AccountClass::OperatingIncome => &[AccountType::Income],
        AccountClass::Extraordinary | AccountClass::Analytical => {
            &[AccountType::Expense, AccountType::Income]
        }
    }
}

/// Returns the inclusive range of two-digit code prefixes for a class.
#[must_use]
pub fn prefix_range(class: AccountClass) -> (u32, u32) {
    let digit = u32::from(class.digit());
    (digit * 10, digit * 10 + 9)
}

/// Returns true when the code has the required shape: 2 to 6 digits.
#[must_use]
pub fn is_valid_code_format(code: &str) -> bool {
    (2..=6).contains(&code.len()) && code.chars().all(|c| c.is_ascii_digit())
}

/// Returns the two-digit numeric prefix of a code, if it has one.
#[must_use]
pub fn code_prefix(code: &str) -> Option<u32> {
    code.get(0..2)?.parse().ok()
}

/// Returns true when the code is one of the mandatory SYSCOHADA accounts.
#[must_use]
pub fn is_mandatory(code: &str) -> bool {
    MANDATORY_CODES.contains(&code)
}

/// Returns the conventional French name for a mandatory account code.
#[must_use]
pub fn reference_name(code: &str) -> Option<&'static str> {
    let name = match code {
        "10" => "Capital",
        "11" => "Réserves",
        "16" => "Emprunts et dettes assimilées",
        "21" => "Immobilisations incorporelles",
        "22" => "Terrains",
        "23" => "Bâtiments",
        "24" => "Matériel",
        "28" => "Amortissements",
        "31" => "Marchandises",
        "32" => "Matières premières",
        "40" => "Fournisseurs",
        "41" => "Clients",
        "42" => "Personnel",
        "44" => "État",
        "51" => "Valeurs à encaisser",
        "52" => "Banques",
        "57" => "Caisse",
        "60" => "Achats",
        "61" => "Transports",
        "62" => "Services extérieurs A",
        "63" => "Services extérieurs B",
        "64" => "Impôts et taxes",
        "68" => "Dotations aux amortissements",
        "70" => "Ventes",
        "71" => "Subventions d'exploitation",
        "75" => "Autres produits",
        "78" => "Transferts de charges",
        _ => return None,
    };
    Some(name)
}
