//! In-memory reference implementations of the repository traits.
//!
//! Each repository holds its records behind a single mutex, so every
//! operation is atomic: a failed call leaves the store untouched.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use balafon_core::chart::ChartAccount;
use balafon_core::fiscal::AccountingPeriod;
use balafon_core::journal::{Journal, JournalPeriod};
use balafon_core::ledger::JournalEntry;
use balafon_core::workflow::ApprovalWorkflow;
use balafon_shared::types::{AccountId, ApprovalId, EntryId, JournalId, PeriodId};
use chrono::{Datelike, NaiveDate};

use crate::error::StoreError;
use crate::repository::{
    AccountRepository, EntryRepository, JournalRepository, PeriodRepository, WorkflowRepository,
};

/// Locks a mutex, recovering the data if a writer panicked.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// In-memory chart of accounts store.
#[derive(Debug, Default)]
pub struct InMemoryAccountRepository {
    accounts: Mutex<HashMap<AccountId, ChartAccount>>,
}

impl InMemoryAccountRepository {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl AccountRepository for InMemoryAccountRepository {
    async fn insert(&self, account: ChartAccount) -> Result<ChartAccount, StoreError> {
        let mut accounts = lock(&self.accounts);
        if accounts.values().any(|a| a.code == account.code) {
            return Err(StoreError::DuplicateCode(account.code));
        }
        accounts.insert(account.id, account.clone());
        Ok(account)
    }

    async fn update(&self, account: ChartAccount) -> Result<ChartAccount, StoreError> {
        let mut accounts = lock(&self.accounts);
        if !accounts.contains_key(&account.id) {
            return Err(StoreError::AccountNotFound(account.id));
        }
        if accounts
            .values()
            .any(|a| a.id != account.id && a.code == account.code)
        {
            return Err(StoreError::DuplicateCode(account.code));
        }
        accounts.insert(account.id, account.clone());
        Ok(account)
    }

    async fn fetch(&self, id: AccountId) -> Result<Option<ChartAccount>, StoreError> {
        Ok(lock(&self.accounts).get(&id).cloned())
    }

    async fn fetch_by_code(&self, code: &str) -> Result<Option<ChartAccount>, StoreError> {
        Ok(lock(&self.accounts)
            .values()
            .find(|a| a.code == code)
            .cloned())
    }

    async fn list(&self) -> Result<Vec<ChartAccount>, StoreError> {
        let mut accounts: Vec<_> = lock(&self.accounts).values().cloned().collect();
        accounts.sort_by(|a, b| a.code.cmp(&b.code));
        Ok(accounts)
    }

    async fn search(&self, query: &str) -> Result<Vec<ChartAccount>, StoreError> {
        let needle = query.trim().to_lowercase();
        let mut matches: Vec<_> = lock(&self.accounts)
            .values()
            .filter(|a| a.code.starts_with(&needle) || a.name.to_lowercase().contains(&needle))
            .cloned()
            .collect();
        matches.sort_by(|a, b| a.code.cmp(&b.code));
        Ok(matches)
    }
}

/// In-memory journal entry store.
#[derive(Debug, Default)]
pub struct InMemoryEntryRepository {
    entries: Mutex<HashMap<EntryId, JournalEntry>>,
}

impl InMemoryEntryRepository {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl EntryRepository for InMemoryEntryRepository {
    async fn insert(&self, entry: JournalEntry) -> Result<JournalEntry, StoreError> {
        lock(&self.entries).insert(entry.id, entry.clone());
        Ok(entry)
    }

    async fn update(&self, entry: JournalEntry) -> Result<JournalEntry, StoreError> {
        let mut entries = lock(&self.entries);
        if !entries.contains_key(&entry.id) {
            return Err(StoreError::EntryNotFound(entry.id));
        }
        entries.insert(entry.id, entry.clone());
        Ok(entry)
    }

    async fn fetch(&self, id: EntryId) -> Result<Option<JournalEntry>, StoreError> {
        Ok(lock(&self.entries).get(&id).cloned())
    }

    async fn list(&self) -> Result<Vec<JournalEntry>, StoreError> {
        let mut entries: Vec<_> = lock(&self.entries).values().cloned().collect();
        entries.sort_by_key(|e| e.created_at);
        Ok(entries)
    }

    async fn list_by_journal(
        &self,
        journal_id: JournalId,
    ) -> Result<Vec<JournalEntry>, StoreError> {
        let mut entries: Vec<_> = lock(&self.entries)
            .values()
            .filter(|e| e.journal_id == journal_id)
            .cloned()
            .collect();
        entries.sort_by_key(|e| e.created_at);
        Ok(entries)
    }

    async fn count_by_account(&self, account_id: AccountId) -> Result<usize, StoreError> {
        Ok(lock(&self.entries)
            .values()
            .filter(|e| e.lines.iter().any(|line| line.account_id == account_id))
            .count())
    }

    async fn next_sequence(&self, journal_id: JournalId, year: i32) -> Result<u32, StoreError> {
        let count = lock(&self.entries)
            .values()
            .filter(|e| e.journal_id == journal_id && e.accounting_date.year() == year)
            .count();
        Ok(u32::try_from(count + 1).unwrap_or(u32::MAX))
    }
}

/// In-memory journal store with per-period closure records.
#[derive(Debug, Default)]
pub struct InMemoryJournalRepository {
    journals: Mutex<HashMap<JournalId, Journal>>,
    periods: Mutex<HashMap<(JournalId, PeriodId), JournalPeriod>>,
}

impl InMemoryJournalRepository {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl JournalRepository for InMemoryJournalRepository {
    async fn insert(&self, journal: Journal) -> Result<Journal, StoreError> {
        let mut journals = lock(&self.journals);
        if journals.values().any(|j| j.code == journal.code) {
            return Err(StoreError::DuplicateCode(journal.code));
        }
        journals.insert(journal.id, journal.clone());
        Ok(journal)
    }

    async fn fetch(&self, id: JournalId) -> Result<Option<Journal>, StoreError> {
        Ok(lock(&self.journals).get(&id).cloned())
    }

    async fn fetch_by_code(&self, code: &str) -> Result<Option<Journal>, StoreError> {
        Ok(lock(&self.journals)
            .values()
            .find(|j| j.code == code)
            .cloned())
    }

    async fn list(&self) -> Result<Vec<Journal>, StoreError> {
        let mut journals: Vec<_> = lock(&self.journals).values().cloned().collect();
        journals.sort_by(|a, b| a.code.cmp(&b.code));
        Ok(journals)
    }

    async fn period_state(
        &self,
        journal_id: JournalId,
        period_id: PeriodId,
    ) -> Result<Option<JournalPeriod>, StoreError> {
        Ok(lock(&self.periods).get(&(journal_id, period_id)).cloned())
    }

    async fn upsert_period(&self, record: JournalPeriod) -> Result<JournalPeriod, StoreError> {
        lock(&self.periods).insert((record.journal_id, record.period_id), record.clone());
        Ok(record)
    }
}

/// In-memory approval record store.
#[derive(Debug, Default)]
pub struct InMemoryWorkflowRepository {
    workflows: Mutex<HashMap<ApprovalId, ApprovalWorkflow>>,
}

impl InMemoryWorkflowRepository {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl WorkflowRepository for InMemoryWorkflowRepository {
    async fn insert(&self, workflow: ApprovalWorkflow) -> Result<ApprovalWorkflow, StoreError> {
        lock(&self.workflows).insert(workflow.id, workflow.clone());
        Ok(workflow)
    }

    async fn update(&self, workflow: ApprovalWorkflow) -> Result<ApprovalWorkflow, StoreError> {
        let mut workflows = lock(&self.workflows);
        if !workflows.contains_key(&workflow.id) {
            return Err(StoreError::ApprovalNotFound {
                entry_id: workflow.entry_id,
                level: workflow.level,
            });
        }
        workflows.insert(workflow.id, workflow.clone());
        Ok(workflow)
    }

    async fn fetch(&self, id: ApprovalId) -> Result<Option<ApprovalWorkflow>, StoreError> {
        Ok(lock(&self.workflows).get(&id).cloned())
    }

    async fn list_for_entry(
        &self,
        entry_id: EntryId,
    ) -> Result<Vec<ApprovalWorkflow>, StoreError> {
        let mut records: Vec<_> = lock(&self.workflows)
            .values()
            .filter(|w| w.entry_id == entry_id)
            .cloned()
            .collect();
        records.sort_by_key(|w| w.level);
        Ok(records)
    }

    async fn clear_for_entry(&self, entry_id: EntryId) -> Result<(), StoreError> {
        lock(&self.workflows).retain(|_, w| w.entry_id != entry_id);
        Ok(())
    }
}

/// In-memory accounting period store.
#[derive(Debug, Default)]
pub struct InMemoryPeriodRepository {
    periods: Mutex<HashMap<PeriodId, AccountingPeriod>>,
}

impl InMemoryPeriodRepository {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl PeriodRepository for InMemoryPeriodRepository {
    async fn insert(&self, period: AccountingPeriod) -> Result<AccountingPeriod, StoreError> {
        lock(&self.periods).insert(period.id, period.clone());
        Ok(period)
    }

    async fn update(&self, period: AccountingPeriod) -> Result<AccountingPeriod, StoreError> {
        let mut periods = lock(&self.periods);
        if !periods.contains_key(&period.id) {
            return Err(StoreError::PeriodNotFound(period.id));
        }
        periods.insert(period.id, period.clone());
        Ok(period)
    }

    async fn fetch(&self, id: PeriodId) -> Result<Option<AccountingPeriod>, StoreError> {
        Ok(lock(&self.periods).get(&id).cloned())
    }

    async fn list(&self) -> Result<Vec<AccountingPeriod>, StoreError> {
        let mut periods: Vec<_> = lock(&self.periods).values().cloned().collect();
        periods.sort_by_key(|p| p.start_date);
        Ok(periods)
    }

    async fn find_for_date(&self, date: NaiveDate) -> Result<Option<AccountingPeriod>, StoreError> {
        Ok(lock(&self.periods)
            .values()
            .filter(|p| p.contains_date(date))
            .min_by_key(|p| p.start_date)
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use balafon_core::chart::standard_chart;

    use super::*;

    #[tokio::test]
    async fn test_insert_rejects_duplicate_code() {
        let repo = InMemoryAccountRepository::new();
        let chart = standard_chart();
        let account = chart[0].clone();
        repo.insert(account.clone()).await.unwrap();

        let mut copy = account;
        copy.id = AccountId::new();
        let result = repo.insert(copy).await;
        assert!(matches!(result, Err(StoreError::DuplicateCode(_))));
    }

    #[tokio::test]
    async fn test_update_missing_account_fails() {
        let repo = InMemoryAccountRepository::new();
        let account = standard_chart()[0].clone();
        let result = repo.update(account.clone()).await;
        assert!(matches!(
            result,
            Err(StoreError::AccountNotFound(id)) if id == account.id
        ));
    }

    #[tokio::test]
    async fn test_search_matches_code_prefix_and_name() {
        let repo = InMemoryAccountRepository::new();
        for account in standard_chart() {
            repo.insert(account).await.unwrap();
        }

        let by_code = repo.search("41").await.unwrap();
        assert_eq!(by_code.len(), 1);
        assert_eq!(by_code[0].code, "41");

        let by_name = repo.search("clients").await.unwrap();
        assert!(by_name.iter().any(|a| a.code == "41"));
    }

    #[tokio::test]
    async fn test_list_is_sorted_by_code() {
        let repo = InMemoryAccountRepository::new();
        for account in standard_chart() {
            repo.insert(account).await.unwrap();
        }
        let listed = repo.list().await.unwrap();
        let codes: Vec<_> = listed.iter().map(|a| a.code.as_str()).collect();
        let mut sorted = codes.clone();
        sorted.sort_unstable();
        assert_eq!(codes, sorted);
    }
}
