//! Chart of accounts domain types.
//!
//! The SYSCOHADA chart organizes every ledger account under nine classes.
//! An account code is a 2 to 6 digit string whose first digit is the class.

use balafon_shared::types::AccountId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// SYSCOHADA account class, the first digit of every account code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountClass {
    /// Class 1: durable resources (equity and long-term debt).
    DurableResources,
    /// Class 2: fixed assets.
    FixedAssets,
    /// Class 3: inventories.
    Inventories,
    /// Class 4: third-party accounts (receivables and payables).
    ThirdParty,
    /// Class 5: treasury accounts.
    Treasury,
    /// Class 6: operating expenses.
    OperatingExpenses,
    /// Class 7: operating income.
    OperatingIncome,
    /// Class 8: charges and income outside ordinary activities.
    Extraordinary,
    /// Class 9: cost accounting and off balance sheet commitments.
    Analytical,
}

impl AccountClass {
    /// All nine classes in ascending digit order.
    pub const ALL: [Self; 9] = [
        Self::DurableResources,
        Self::FixedAssets,
        Self::Inventories,
        Self::ThirdParty,
        Self::Treasury,
        Self::OperatingExpenses,
        Self::OperatingIncome,
        Self::Extraordinary,
        Self::Analytical,
    ];

    /// Returns the class for a digit 1-9.
    #[must_use]
    pub fn from_digit(digit: u8) -> Option<Self> {
        match digit {
            1 => Some(Self::DurableResources),
            2 => Some(Self::FixedAssets),
            3 => Some(Self::Inventories),
            4 => Some(Self::ThirdParty),
            5 => Some(Self::Treasury),
            6 => Some(Self::OperatingExpenses),
            7 => Some(Self::OperatingIncome),
            8 => Some(Self::Extraordinary),
            9 => Some(Self::Analytical),
            _ => None,
        }
    }

    /// Returns the class digit (1-9).
    #[must_use]
    pub fn digit(self) -> u8 {
        match self {
            Self::DurableResources => 1,
            Self::FixedAssets => 2,
            Self::Inventories => 3,
            Self::ThirdParty => 4,
            Self::Treasury => 5,
            Self::OperatingExpenses => 6,
            Self::OperatingIncome => 7,
            Self::Extraordinary => 8,
            Self::Analytical => 9,
        }
    }

    /// Returns the class implied by an account code's first character.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        let first = code.chars().next()?;
        let digit = u8::try_from(first.to_digit(10)?).ok()?;
        Self::from_digit(digit)
    }
}

impl fmt::Display for AccountClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.digit())
    }
}

/// Account type classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    /// Asset account.
    Asset,
    /// Liability account.
    Liability,
    /// Equity account.
    Equity,
    /// Income account.
    Income,
    /// Expense account.
    Expense,
}

impl AccountType {
    /// Returns the string representation of the type.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asset => "asset",
            Self::Liability => "liability",
            Self::Equity => "equity",
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }

    /// Returns the French label used by the CSV contracts.
    #[must_use]
    pub fn french_name(&self) -> &'static str {
        match self {
            Self::Asset => "Actif",
            Self::Liability => "Passif",
            Self::Equity => "Capitaux propres",
            Self::Income => "Produit",
            Self::Expense => "Charge",
        }
    }

    /// Parses a type from a string.
    ///
    /// Accepts the English identifiers and the French labels found in
    /// imported files, case-insensitively.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "asset" | "actif" => Some(Self::Asset),
            "liability" | "passif" => Some(Self::Liability),
            "equity" | "capitaux propres" | "capitaux_propres" => Some(Self::Equity),
            "income" | "produit" | "produits" => Some(Self::Income),
            "expense" | "charge" | "charges" => Some(Self::Expense),
            _ => None,
        }
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single account in the chart of accounts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartAccount {
    /// Unique identifier.
    pub id: AccountId,
    /// Account code (2 to 6 digits, first digit = class).
    pub code: String,
    /// The SYSCOHADA class this account belongs to.
    pub class: AccountClass,
    /// Account type.
    pub account_type: AccountType,
    /// Account name.
    pub name: String,
    /// Optional free-form description.
    pub description: Option<String>,
    /// Parent account, when this is a sub-account.
    pub parent_id: Option<AccountId>,
    /// Depth in the account tree (root accounts are level 1).
    pub level: u8,
    /// Whether this is an auxiliary (per-counterparty) account.
    pub is_auxiliary: bool,
    /// Whether this account is subject to external reconciliation.
    pub is_reconcilable: bool,
    /// Whether the account is active. Inactive accounts are soft-deleted.
    pub is_active: bool,
}
