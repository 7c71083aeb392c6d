//! Repository traits for persistence backends.
//!
//! Services depend on these traits rather than on a concrete store.
//! The in-memory reference implementations live in [`crate::memory`];
//! a persisted backend implements the same traits.

use std::future::Future;

use balafon_core::chart::ChartAccount;
use balafon_core::fiscal::AccountingPeriod;
use balafon_core::journal::{Journal, JournalPeriod};
use balafon_core::ledger::JournalEntry;
use balafon_core::workflow::ApprovalWorkflow;
use balafon_shared::types::{AccountId, ApprovalId, EntryId, JournalId, PeriodId};
use chrono::NaiveDate;

use crate::error::StoreError;

/// Persistence operations for chart of accounts records.
pub trait AccountRepository: Send + Sync {
    /// Insert a new account. Fails when the code is already in use.
    fn insert(
        &self,
        account: ChartAccount,
    ) -> impl Future<Output = Result<ChartAccount, StoreError>> + Send;

    /// Replace an existing account.
    fn update(
        &self,
        account: ChartAccount,
    ) -> impl Future<Output = Result<ChartAccount, StoreError>> + Send;

    /// Fetch an account by id.
    fn fetch(
        &self,
        id: AccountId,
    ) -> impl Future<Output = Result<Option<ChartAccount>, StoreError>> + Send;

    /// Fetch an account by code.
    fn fetch_by_code(
        &self,
        code: &str,
    ) -> impl Future<Output = Result<Option<ChartAccount>, StoreError>> + Send;

    /// List all accounts ordered by code.
    fn list(&self) -> impl Future<Output = Result<Vec<ChartAccount>, StoreError>> + Send;

    /// Search accounts whose code starts with or whose name contains
    /// the query, case-insensitively. Ordered by code.
    fn search(
        &self,
        query: &str,
    ) -> impl Future<Output = Result<Vec<ChartAccount>, StoreError>> + Send;
}

/// Persistence operations for journal entries.
pub trait EntryRepository: Send + Sync {
    /// Insert a new entry.
    fn insert(
        &self,
        entry: JournalEntry,
    ) -> impl Future<Output = Result<JournalEntry, StoreError>> + Send;

    /// Replace an existing entry.
    fn update(
        &self,
        entry: JournalEntry,
    ) -> impl Future<Output = Result<JournalEntry, StoreError>> + Send;

    /// Fetch an entry by id.
    fn fetch(
        &self,
        id: EntryId,
    ) -> impl Future<Output = Result<Option<JournalEntry>, StoreError>> + Send;

    /// List all entries in creation order.
    fn list(&self) -> impl Future<Output = Result<Vec<JournalEntry>, StoreError>> + Send;

    /// List the entries recorded in one journal, in creation order.
    fn list_by_journal(
        &self,
        journal_id: JournalId,
    ) -> impl Future<Output = Result<Vec<JournalEntry>, StoreError>> + Send;

    /// Count the entries with at least one line on the account.
    fn count_by_account(
        &self,
        account_id: AccountId,
    ) -> impl Future<Output = Result<usize, StoreError>> + Send;

    /// Next reference sequence number for a journal and year (1-based).
    fn next_sequence(
        &self,
        journal_id: JournalId,
        year: i32,
    ) -> impl Future<Output = Result<u32, StoreError>> + Send;
}

/// Persistence operations for journals and their period closures.
pub trait JournalRepository: Send + Sync {
    /// Insert a new journal. Fails when the code is already in use.
    fn insert(&self, journal: Journal)
    -> impl Future<Output = Result<Journal, StoreError>> + Send;

    /// Fetch a journal by id.
    fn fetch(
        &self,
        id: JournalId,
    ) -> impl Future<Output = Result<Option<Journal>, StoreError>> + Send;

    /// Fetch a journal by code.
    fn fetch_by_code(
        &self,
        code: &str,
    ) -> impl Future<Output = Result<Option<Journal>, StoreError>> + Send;

    /// List all journals ordered by code.
    fn list(&self) -> impl Future<Output = Result<Vec<Journal>, StoreError>> + Send;

    /// Fetch the closure record for a (journal, period) pair, if any.
    fn period_state(
        &self,
        journal_id: JournalId,
        period_id: PeriodId,
    ) -> impl Future<Output = Result<Option<JournalPeriod>, StoreError>> + Send;

    /// Insert or replace a (journal, period) closure record.
    fn upsert_period(
        &self,
        record: JournalPeriod,
    ) -> impl Future<Output = Result<JournalPeriod, StoreError>> + Send;
}

/// Persistence operations for per-level approval records.
pub trait WorkflowRepository: Send + Sync {
    /// Insert a new approval record.
    fn insert(
        &self,
        workflow: ApprovalWorkflow,
    ) -> impl Future<Output = Result<ApprovalWorkflow, StoreError>> + Send;

    /// Replace an existing approval record.
    fn update(
        &self,
        workflow: ApprovalWorkflow,
    ) -> impl Future<Output = Result<ApprovalWorkflow, StoreError>> + Send;

    /// Fetch an approval record by id.
    fn fetch(
        &self,
        id: ApprovalId,
    ) -> impl Future<Output = Result<Option<ApprovalWorkflow>, StoreError>> + Send;

    /// List the approval records for an entry, ordered by level.
    fn list_for_entry(
        &self,
        entry_id: EntryId,
    ) -> impl Future<Output = Result<Vec<ApprovalWorkflow>, StoreError>> + Send;

    /// Remove every approval record for an entry.
    ///
    /// Used on resubmission, so a fresh set of pending levels replaces
    /// the previous round.
    fn clear_for_entry(
        &self,
        entry_id: EntryId,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;
}

/// Persistence operations for accounting periods.
pub trait PeriodRepository: Send + Sync {
    /// Insert a new period.
    fn insert(
        &self,
        period: AccountingPeriod,
    ) -> impl Future<Output = Result<AccountingPeriod, StoreError>> + Send;

    /// Replace an existing period.
    fn update(
        &self,
        period: AccountingPeriod,
    ) -> impl Future<Output = Result<AccountingPeriod, StoreError>> + Send;

    /// Fetch a period by id.
    fn fetch(
        &self,
        id: PeriodId,
    ) -> impl Future<Output = Result<Option<AccountingPeriod>, StoreError>> + Send;

    /// List all periods ordered by start date.
    fn list(&self) -> impl Future<Output = Result<Vec<AccountingPeriod>, StoreError>> + Send;

    /// Find the period containing a date, if one is defined.
    fn find_for_date(
        &self,
        date: NaiveDate,
    ) -> impl Future<Output = Result<Option<AccountingPeriod>, StoreError>> + Send;
}
