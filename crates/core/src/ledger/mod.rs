//! Journal entry recording and validation.
//!
//! This module implements the double-entry core:
//! - Entry aggregates with their debit and credit lines
//! - Draft input types captured from users
//! - Business rule validation producing structured reports

pub mod entry;
pub mod types;
pub mod validation;

#[cfg(test)]
mod props;

pub use entry::{EntryStatus, JournalEntry, JournalEntryLine, LineSide};
pub use types::{EntryDraft, LineDraft};
pub use validation::{
    AccountChecks, BalanceCheck, EntryContext, EntryIssue, EntryReport, EntryValidator,
    EntryWarning, PeriodCheck,
};
