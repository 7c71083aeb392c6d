//! Single account validation against the SYSCOHADA rule tables.

use thiserror::Error;

use super::rules;
use super::types::{AccountClass, AccountType, ChartAccount};

/// Hard rule violations. Any violation makes the account invalid.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccountRuleViolation {
    /// The code is not 2 to 6 digits.
    #[error("Account code {code} must be 2 to 6 digits")]
    MalformedCode {
        /// The offending code.
        code: String,
    },

    /// The declared class does not match the code's first digit.
    #[error("Account code {code} does not start with class digit {class}")]
    ClassCodeMismatch {
        /// The declared class digit.
        class: u8,
        /// The offending code.
        code: String,
    },

    /// The account type is not allowed in the declared class.
    #[error("Account type {account_type} is not allowed in class {class}")]
    TypeNotAllowed {
        /// The declared type.
        account_type: AccountType,
        /// The declared class digit.
        class: u8,
    },

    /// The code's two-digit prefix falls outside the class range.
    #[error("Account code {code} is outside the class range {min}-{max}")]
    CodeOutOfRange {
        /// The offending code.
        code: String,
        /// Lowest allowed two-digit prefix.
        min: u32,
        /// Highest allowed two-digit prefix.
        max: u32,
    },

    /// The account has no name.
    #[error("Account name is required")]
    EmptyName,

    /// A sub-account needs a code of at least 3 digits.
    #[error("Account {code} has a parent but its code is not a sub-account code")]
    ParentRequiresSubaccountCode {
        /// The offending code.
        code: String,
    },
}

/// Non-blocking findings surfaced alongside a valid or invalid account.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccountWarning {
    /// The name exceeds the conventional maximum length.
    #[error("Account name exceeds {max} characters ({length})")]
    NameTooLong {
        /// Actual name length in characters.
        length: usize,
        /// Maximum conventional length.
        max: usize,
    },

    /// A mandatory account has been deactivated.
    #[error("Mandatory account {code} is inactive")]
    MandatoryAccountInactive {
        /// The mandatory code.
        code: String,
    },
}

/// Advisory flag recommendations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccountSuggestion {
    /// Third-party accounts are usually auxiliary accounts.
    #[error("Third-party account {code} should be flagged as auxiliary")]
    SetAuxiliary {
        /// The account code.
        code: String,
    },

    /// Treasury accounts are usually reconcilable.
    #[error("Treasury account {code} should be flagged as reconcilable")]
    SetReconcilable {
        /// The account code.
        code: String,
    },
}

/// Result of validating a single account.
#[derive(Debug, Clone)]
pub struct AccountReport {
    /// True when no hard violation was found.
    pub is_valid: bool,
    /// Hard rule violations.
    pub errors: Vec<AccountRuleViolation>,
    /// Non-blocking findings.
    pub warnings: Vec<AccountWarning>,
    /// Advisory recommendations.
    pub suggestions: Vec<AccountSuggestion>,
}

impl AccountReport {
    /// Builds a report, deriving validity from the error list.
    #[must_use]
    pub fn new(
        errors: Vec<AccountRuleViolation>,
        warnings: Vec<AccountWarning>,
        suggestions: Vec<AccountSuggestion>,
    ) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
            warnings,
            suggestions,
        }
    }
}

/// Stateless validator for single accounts.
///
/// All rules are evaluated independently; one broken rule does not
/// suppress the others.
pub struct AccountValidator;

impl AccountValidator {
    /// Validates one account against the SYSCOHADA rules.
    #[must_use]
    pub fn validate(account: &ChartAccount) -> AccountReport {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();
        let mut suggestions = Vec::new();

        if !rules::is_valid_code_format(&account.code) {
            errors.push(AccountRuleViolation::MalformedCode {
                code: account.code.clone(),
            });
        }

        if AccountClass::from_code(&account.code) != Some(account.class) {
            errors.push(AccountRuleViolation::ClassCodeMismatch {
                class: account.class.digit(),
                code: account.code.clone(),
            });
        }

        if !rules::allowed_types(account.class).contains(&account.account_type) {
            errors.push(AccountRuleViolation::TypeNotAllowed {
                account_type: account.account_type,
                class: account.class.digit(),
            });
        }

        let (min, max) = rules::prefix_range(account.class);
        let in_range = rules::code_prefix(&account.code)
            .is_some_and(|prefix| (min..=max).contains(&prefix));
        if !in_range {
            errors.push(AccountRuleViolation::CodeOutOfRange {
                code: account.code.clone(),
                min,
                max,
            });
        }

        if account.name.trim().is_empty() {
            errors.push(AccountRuleViolation::EmptyName);
        } else {
            let length = account.name.chars().count();
            if length > rules::MAX_NAME_LENGTH {
                warnings.push(AccountWarning::NameTooLong {
                    length,
                    max: rules::MAX_NAME_LENGTH,
                });
            }
        }

        if rules::is_mandatory(&account.code) && !account.is_active {
            warnings.push(AccountWarning::MandatoryAccountInactive {
                code: account.code.clone(),
            });
        }

        if account.class == AccountClass::ThirdParty && !account.is_auxiliary {
            suggestions.push(AccountSuggestion::SetAuxiliary {
                code: account.code.clone(),
            });
        }
        if account.class == AccountClass::Treasury
            && !account.code.starts_with("59")
            && !account.is_reconcilable
        {
            suggestions.push(AccountSuggestion::SetReconcilable {
                code: account.code.clone(),
            });
        }

        if account.parent_id.is_some() && account.code.len() < 3 {
            errors.push(AccountRuleViolation::ParentRequiresSubaccountCode {
                code: account.code.clone(),
            });
        }

        AccountReport::new(errors, warnings, suggestions)
    }
}
