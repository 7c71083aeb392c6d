//! Whole chart structure validation and child code generation.

use std::collections::HashMap;

use balafon_shared::types::AccountId;
use thiserror::Error;

use super::error::ChartError;
use super::rules;
use super::types::ChartAccount;

/// Structural problems found in a chart of accounts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChartIssue {
    /// A mandatory account is missing or inactive.
    #[error("Mandatory account {code} is missing or inactive")]
    MissingMandatoryAccount {
        /// The mandatory code.
        code: String,
    },

    /// An account references a parent that is not in the chart.
    #[error("Account {code} references a parent that does not exist")]
    UnknownParent {
        /// The child account code.
        code: String,
    },

    /// A parent code must be strictly shorter than its child's code.
    #[error("Parent code {parent_code} is not shorter than child code {code}")]
    ParentCodeNotShorter {
        /// The child account code.
        code: String,
        /// The parent account code.
        parent_code: String,
    },

    /// Two or more accounts share the same code.
    #[error("Account code {code} is used by {count} accounts")]
    DuplicateCode {
        /// The duplicated code.
        code: String,
        /// Number of accounts carrying the code.
        count: usize,
    },
}

/// Result of validating a whole chart.
#[derive(Debug, Clone)]
pub struct ChartReport {
    /// True when no structural issue was found.
    pub is_valid: bool,
    /// All structural issues.
    pub errors: Vec<ChartIssue>,
    /// Mandatory codes that are missing or inactive.
    pub missing_accounts: Vec<String>,
    /// Total number of accounts in the chart.
    pub total_accounts: usize,
    /// Number of active accounts.
    pub active_accounts: usize,
}

/// Stateless validator for a whole collection of accounts.
///
/// All checks run; one failing check does not suppress the others.
pub struct ChartStructureValidator;

impl ChartStructureValidator {
    /// Validates mandatory account presence, parent links and code
    /// uniqueness over the whole chart.
    #[must_use]
    pub fn validate(accounts: &[ChartAccount]) -> ChartReport {
        let mut errors = Vec::new();
        let mut missing_accounts = Vec::new();

        for code in rules::MANDATORY_CODES {
            let present = accounts.iter().any(|a| a.code == code && a.is_active);
            if !present {
                missing_accounts.push(code.to_string());
                errors.push(ChartIssue::MissingMandatoryAccount {
                    code: code.to_string(),
                });
            }
        }

        let by_id: HashMap<AccountId, &ChartAccount> =
            accounts.iter().map(|a| (a.id, a)).collect();
        for account in accounts {
            if let Some(parent_id) = account.parent_id {
                match by_id.get(&parent_id) {
                    None => errors.push(ChartIssue::UnknownParent {
                        code: account.code.clone(),
                    }),
                    Some(parent) if parent.code.len() >= account.code.len() => {
                        errors.push(ChartIssue::ParentCodeNotShorter {
                            code: account.code.clone(),
                            parent_code: parent.code.clone(),
                        });
                    }
                    Some(_) => {}
                }
            }
        }

        let mut tally: HashMap<&str, usize> = HashMap::new();
        for account in accounts {
            *tally.entry(account.code.as_str()).or_insert(0) += 1;
        }
        let mut duplicates: Vec<(&str, usize)> =
            tally.into_iter().filter(|(_, count)| *count > 1).collect();
        duplicates.sort_unstable();
        for (code, count) in duplicates {
            errors.push(ChartIssue::DuplicateCode {
                code: code.to_string(),
                count,
            });
        }

        ChartReport {
            is_valid: errors.is_empty(),
            errors,
            missing_accounts,
            total_accounts: accounts.len(),
            active_accounts: accounts.iter().filter(|a| a.is_active).count(),
        }
    }

    /// Generates the next available child code under a parent.
    ///
    /// Child codes are the parent code plus one digit. Among the existing
    /// children the smallest suffix not taken, counting up from 1, wins:
    /// parent `41` with children `411` and `412` yields `413`, and a
    /// freed-up `412` would be reused before `414`.
    ///
    /// # Errors
    ///
    /// Returns an error when the parent code is malformed, already 6
    /// digits long, or all nine suffixes are taken.
    pub fn generate_child_code(
        parent_code: &str,
        existing_codes: &[&str],
    ) -> Result<String, ChartError> {
        if !rules::is_valid_code_format(parent_code) {
            return Err(ChartError::InvalidParentCode(parent_code.to_string()));
        }
        if parent_code.len() >= 6 {
            return Err(ChartError::MaxDepthReached(parent_code.to_string()));
        }

        let child_len = parent_code.len() + 1;
        let mut used: Vec<u32> = existing_codes
            .iter()
            .filter(|code| code.len() == child_len && code.starts_with(parent_code))
            .filter_map(|code| code[parent_code.len()..].parse().ok())
            .collect();
        used.sort_unstable();

        let mut next = 1u32;
        for suffix in used {
            if suffix == next {
                next += 1;
            } else if suffix > next {
                break;
            }
        }
        if next > 9 {
            return Err(ChartError::ChildCodesExhausted(parent_code.to_string()));
        }

        Ok(format!("{parent_code}{next}"))
    }
}
