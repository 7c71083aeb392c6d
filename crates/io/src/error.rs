//! Import and export error types.
//!
//! Row numbers are 1-based and count data rows; the header row is not
//! counted.

use balafon_core::chart::AccountRuleViolation;
use balafon_core::ledger::EntryIssue;
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors raised while importing tabular data.
///
/// File-level variants abort the import; row-level variants are
/// collected per row so one bad row never hides the others.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImportError {
    // ========== File-level errors ==========
    /// A required column is missing from the header row.
    #[error("Missing required column '{0}'")]
    MissingColumn(String),

    /// The header or a row could not be parsed as CSV.
    #[error("CSV parse error: {0}")]
    Malformed(String),

    // ========== Row-level errors ==========
    /// A required field is empty.
    #[error("Row {row}: field '{field}' is required")]
    MissingField {
        /// 1-based data row number.
        row: usize,
        /// The empty column.
        field: &'static str,
    },

    /// A field value could not be parsed.
    #[error("Row {row}: invalid {field} '{value}'")]
    InvalidField {
        /// 1-based data row number.
        row: usize,
        /// The offending column.
        field: &'static str,
        /// The raw value found.
        value: String,
    },

    /// The row's account breaks chart rules.
    #[error("Row {row}: account rejected with {} rule violation(s)", violations.len())]
    AccountRejected {
        /// 1-based data row number.
        row: usize,
        /// The hard violations found.
        violations: Vec<AccountRuleViolation>,
    },

    /// The row's entry breaks validation rules.
    #[error("Row {row}: entry rejected with {} error(s)", issues.len())]
    EntryRejected {
        /// 1-based data row number.
        row: usize,
        /// The hard errors found.
        issues: Vec<EntryIssue>,
    },

    /// The row references a journal code that does not exist.
    #[error("Row {row}: unknown journal '{code}'")]
    UnknownJournal {
        /// 1-based data row number.
        row: usize,
        /// The unresolved journal code.
        code: String,
    },

    /// The row's debit and credit amounts differ beyond the tolerance.
    #[error("Row {row}: debit {debit} and credit {credit} do not balance")]
    RowUnbalanced {
        /// 1-based data row number.
        row: usize,
        /// The debit amount.
        debit: Decimal,
        /// The credit amount.
        credit: Decimal,
    },
}

/// Errors raised while exporting tabular data.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The CSV writer failed.
    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    /// The underlying writer failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
