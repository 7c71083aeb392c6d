//! Journal application service.
//!
//! Manages the journal list and the per-period closure records. The
//! closing balance check runs over the posted entries of the pair, so
//! draft and rejected entries never block a close.

use std::sync::Arc;

use balafon_core::journal::{Journal, JournalCloseService, JournalError, JournalKind, JournalPeriod};
use balafon_core::ledger::{EntryStatus, JournalEntry};
use balafon_shared::config::AppConfig;
use balafon_shared::types::{JournalId, PeriodId, UserId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::StoreError;
use crate::repository::{EntryRepository, JournalRepository};

/// Input for creating a journal.
///
/// Code and name default to the kind's conventional values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalInput {
    /// The business function of the journal.
    pub kind: JournalKind,
    /// Custom journal code; defaults to the kind's code.
    pub code: Option<String>,
    /// Custom journal name; defaults to the kind's French name.
    pub name: Option<String>,
    /// Optional free-text description.
    pub description: Option<String>,
}

/// Service for managing journals and their period closures.
pub struct JournalService<J: JournalRepository, E: EntryRepository> {
    journals: Arc<J>,
    entries: Arc<E>,
    balance_tolerance: Decimal,
}

impl<J: JournalRepository, E: EntryRepository> JournalService<J, E> {
    /// Create a new journal service using the configured tolerance.
    #[must_use]
    pub fn new(journals: Arc<J>, entries: Arc<E>, config: &AppConfig) -> Self {
        Self {
            journals,
            entries,
            balance_tolerance: config.validation.balance_tolerance,
        }
    }

    /// Create a journal.
    ///
    /// # Errors
    ///
    /// Returns an error if the code is already taken.
    pub async fn create_journal(
        &self,
        input: JournalInput,
        created_by: UserId,
    ) -> Result<Journal, StoreError> {
        let mut journal = Journal::standard(input.kind);
        if let Some(code) = input.code {
            journal.code = code.to_uppercase();
        }
        if let Some(name) = input.name {
            journal.name = name;
        }
        journal.description = input.description;

        let created = self.journals.insert(journal).await?;
        info!(
            code = %created.code,
            kind = %created.kind,
            created_by = %created_by,
            "Journal created"
        );
        Ok(created)
    }

    /// Create the five standard SYSCOHADA journals, skipping any whose
    /// code already exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    pub async fn install_standard_journals(
        &self,
        created_by: UserId,
    ) -> Result<Vec<Journal>, StoreError> {
        let mut created = Vec::new();
        for kind in JournalKind::ALL {
            if self.journals.fetch_by_code(kind.code()).await?.is_some() {
                continue;
            }
            created.push(self.journals.insert(Journal::standard(kind)).await?);
        }
        info!(
            count = created.len(),
            created_by = %created_by,
            "Standard journals installed"
        );
        Ok(created)
    }

    /// Fetch one journal by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the journal does not exist.
    pub async fn get_journal(&self, id: JournalId) -> Result<Journal, StoreError> {
        self.journals
            .fetch(id)
            .await?
            .ok_or(StoreError::JournalNotFound(id))
    }

    /// Look up a journal by its code.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    pub async fn find_journal(&self, code: &str) -> Result<Option<Journal>, StoreError> {
        self.journals.fetch_by_code(code).await
    }

    /// List all journals ordered by code.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    pub async fn list_journals(&self) -> Result<Vec<Journal>, StoreError> {
        self.journals.list().await
    }

    /// Close a journal for an accounting period.
    ///
    /// The posted entries of the pair must balance within the
    /// configured tolerance.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The journal does not exist
    /// - The pair is already closed
    /// - The posted totals differ beyond the tolerance
    pub async fn close_period(
        &self,
        journal_id: JournalId,
        period_id: PeriodId,
        closed_by: UserId,
    ) -> Result<JournalPeriod, StoreError> {
        let journal = self
            .journals
            .fetch(journal_id)
            .await?
            .ok_or(StoreError::JournalNotFound(journal_id))?;

        let record = self
            .journals
            .period_state(journal_id, period_id)
            .await?
            .unwrap_or_else(|| JournalPeriod::open(journal_id, period_id));

        let (debit_total, credit_total) = self.posted_totals(journal_id, period_id).await?;
        let closed = JournalCloseService::close(
            &record,
            debit_total,
            credit_total,
            self.balance_tolerance,
            closed_by,
        )?;
        let stored = self.journals.upsert_period(closed).await?;
        info!(
            journal = %journal.code,
            debit_total = %debit_total,
            credit_total = %credit_total,
            closed_by = %closed_by,
            "Journal period closed"
        );
        Ok(stored)
    }

    /// Reopen a closed journal period.
    ///
    /// # Errors
    ///
    /// Returns an error if the journal does not exist or the pair is
    /// not closed.
    pub async fn reopen_period(
        &self,
        journal_id: JournalId,
        period_id: PeriodId,
        reopened_by: UserId,
    ) -> Result<JournalPeriod, StoreError> {
        let journal = self
            .journals
            .fetch(journal_id)
            .await?
            .ok_or(StoreError::JournalNotFound(journal_id))?;

        let record = self
            .journals
            .period_state(journal_id, period_id)
            .await?
            .ok_or(StoreError::Journal(JournalError::PeriodNotClosed))?;

        let reopened = JournalCloseService::reopen(&record)?;
        let stored = self.journals.upsert_period(reopened).await?;
        info!(
            journal = %journal.code,
            reopened_by = %reopened_by,
            "Journal period reopened"
        );
        Ok(stored)
    }

    /// Sums the posted debit and credit lines of a (journal, period) pair.
    async fn posted_totals(
        &self,
        journal_id: JournalId,
        period_id: PeriodId,
    ) -> Result<(Decimal, Decimal), StoreError> {
        let entries = self.entries.list_by_journal(journal_id).await?;
        let posted: Vec<&JournalEntry> = entries
            .iter()
            .filter(|e| e.status == EntryStatus::Posted && e.period_id == Some(period_id))
            .collect();
        let debit_total = posted.iter().map(|e| e.total_debit()).sum();
        let credit_total = posted.iter().map(|e| e.total_credit()).sum();
        Ok((debit_total, credit_total))
    }
}
