//! Journal error types.

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors raised by journal period operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JournalError {
    /// Attempted to close a pair that is already closed.
    #[error("Journal period is already closed")]
    PeriodAlreadyClosed,

    /// Attempted to reopen a pair that is not closed.
    #[error("Journal period is not closed")]
    PeriodNotClosed,

    /// Posted totals do not balance, so the pair cannot close.
    #[error(
        "Cannot close an unbalanced journal period: debit {debit_total} vs credit {credit_total}, difference {difference:.2} FCFA"
    )]
    UnbalancedClose {
        /// Sum of posted debit lines.
        debit_total: Decimal,
        /// Sum of posted credit lines.
        credit_total: Decimal,
        /// Absolute difference, rounded for reporting.
        difference: Decimal,
    },
}

impl JournalError {
    /// Returns the error code for reporting.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::PeriodAlreadyClosed => "PERIOD_ALREADY_CLOSED",
            Self::PeriodNotClosed => "PERIOD_NOT_CLOSED",
            Self::UnbalancedClose { .. } => "UNBALANCED_CLOSE",
        }
    }
}
