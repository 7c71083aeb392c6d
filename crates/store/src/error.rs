//! Store error types.
//!
//! Wraps the core rule errors and adds the failures only a backing
//! store can produce, such as duplicate codes and missing records.

use balafon_core::chart::{AccountRuleViolation, ChartError};
use balafon_core::journal::JournalError;
use balafon_core::ledger::{EntryIssue, EntryStatus};
use balafon_core::workflow::WorkflowError;
use balafon_shared::types::{AccountId, EntryId, JournalId, PeriodId};
use thiserror::Error;

/// Errors raised by repository and service operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    // ========== Missing records ==========
    /// Account not found.
    #[error("Account {0} not found")]
    AccountNotFound(AccountId),

    /// Parent account not found.
    #[error("Parent account {0} not found")]
    ParentNotFound(AccountId),

    /// Entry not found.
    #[error("Entry {0} not found")]
    EntryNotFound(EntryId),

    /// Journal not found.
    #[error("Journal {0} not found")]
    JournalNotFound(JournalId),

    /// Accounting period not found.
    #[error("Accounting period {0} not found")]
    PeriodNotFound(PeriodId),

    /// No approval record exists for the entry at this level.
    #[error("No approval record for entry {entry_id} at level {level}")]
    ApprovalNotFound {
        /// The entry whose approval was looked up.
        entry_id: EntryId,
        /// The missing level.
        level: u8,
    },

    // ========== Store conflicts ==========
    /// The code is already in use.
    #[error("Code '{0}' already exists")]
    DuplicateCode(String),

    /// The account still carries entries and cannot be deactivated.
    #[error("Cannot deactivate account: {0} entries reference it")]
    CannotDeactivateWithEntries(usize),

    /// The account still has active children and cannot be deactivated.
    #[error("Cannot deactivate account: {0} active sub-accounts depend on it")]
    CannotDeactivateWithChildren(usize),

    /// The journal no longer accepts entries.
    #[error("Journal '{0}' is inactive")]
    JournalInactive(String),

    /// The accounting period is closed.
    #[error("Accounting period '{0}' is closed")]
    PeriodClosed(String),

    /// The (journal, period) pair is closed for postings.
    #[error("Journal '{0}' is closed for this period")]
    JournalPeriodClosed(String),

    /// The entry can no longer be modified.
    #[error("Entry in status {status} cannot be modified")]
    NotEditable {
        /// The entry's current status.
        status: EntryStatus,
    },

    // ========== Rule gate failures ==========
    /// The account breaks chart rules and was rejected.
    #[error("Account is invalid: {} rule violation(s)", violations.len())]
    AccountInvalid {
        /// The hard violations that blocked the account.
        violations: Vec<AccountRuleViolation>,
    },

    /// The entry breaks validation rules and was rejected.
    #[error("Entry is invalid: {} error(s)", issues.len())]
    EntryInvalid {
        /// The hard errors that blocked the entry.
        issues: Vec<EntryIssue>,
    },

    // ========== Wrapped core errors ==========
    /// A chart operation failed.
    #[error(transparent)]
    Chart(#[from] ChartError),

    /// A workflow transition failed.
    #[error(transparent)]
    Workflow(#[from] WorkflowError),

    /// A journal period operation failed.
    #[error(transparent)]
    Journal(#[from] JournalError),
}

impl StoreError {
    /// Returns the error code for reporting.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::AccountNotFound(_) => "ACCOUNT_NOT_FOUND",
            Self::ParentNotFound(_) => "PARENT_NOT_FOUND",
            Self::EntryNotFound(_) => "ENTRY_NOT_FOUND",
            Self::JournalNotFound(_) => "JOURNAL_NOT_FOUND",
            Self::PeriodNotFound(_) => "PERIOD_NOT_FOUND",
            Self::ApprovalNotFound { .. } => "APPROVAL_NOT_FOUND",
            Self::DuplicateCode(_) => "DUPLICATE_CODE",
            Self::CannotDeactivateWithEntries(_) => "CANNOT_DEACTIVATE_WITH_ENTRIES",
            Self::CannotDeactivateWithChildren(_) => "CANNOT_DEACTIVATE_WITH_CHILDREN",
            Self::JournalInactive(_) => "JOURNAL_INACTIVE",
            Self::PeriodClosed(_) => "PERIOD_CLOSED",
            Self::JournalPeriodClosed(_) => "JOURNAL_PERIOD_CLOSED",
            Self::NotEditable { .. } => "NOT_EDITABLE",
            Self::AccountInvalid { .. } => "ACCOUNT_INVALID",
            Self::EntryInvalid { .. } => "ENTRY_INVALID",
            Self::Chart(err) => err.error_code(),
            Self::Workflow(err) => err.error_code(),
            Self::Journal(err) => err.error_code(),
        }
    }
}
