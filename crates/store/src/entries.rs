//! Journal entry application service.
//!
//! Wires the rule engine to the repositories: every entry passes the
//! validator before it is stored, and every status change goes through
//! the workflow service.

use std::collections::BTreeMap;
use std::sync::Arc;

use balafon_core::fiscal::AccountingPeriod;
use balafon_core::journal::JournalCloseService;
use balafon_core::ledger::{
    EntryContext, EntryDraft, EntryIssue, EntryReport, EntryStatus, EntryValidator, JournalEntry,
    JournalEntryLine,
};
use balafon_core::workflow::{
    ApprovalStatus, ApprovalThresholdResolver, ApprovalWorkflow, Threshold, WorkflowService,
};
use balafon_shared::config::AppConfig;
use balafon_shared::types::{EntryId, EntryLineId, PageRequest, PageResponse, UserId};
use chrono::{Datelike, Utc};
use rust_decimal::Decimal;
use tracing::info;

use crate::error::StoreError;
use crate::repository::{
    AccountRepository, EntryRepository, JournalRepository, PeriodRepository, WorkflowRepository,
};

/// Service for recording journal entries and driving their lifecycle.
pub struct EntryService<A, E, J, W, P>
where
    A: AccountRepository,
    E: EntryRepository,
    J: JournalRepository,
    W: WorkflowRepository,
    P: PeriodRepository,
{
    accounts: Arc<A>,
    entries: Arc<E>,
    journals: Arc<J>,
    workflows: Arc<W>,
    periods: Arc<P>,
    balance_tolerance: Decimal,
    thresholds: BTreeMap<u8, Threshold>,
}

impl<A, E, J, W, P> EntryService<A, E, J, W, P>
where
    A: AccountRepository,
    E: EntryRepository,
    J: JournalRepository,
    W: WorkflowRepository,
    P: PeriodRepository,
{
    /// Create a new entry service using the configured tolerance and
    /// approval limits.
    #[must_use]
    pub fn new(
        accounts: Arc<A>,
        entries: Arc<E>,
        journals: Arc<J>,
        workflows: Arc<W>,
        periods: Arc<P>,
        config: &AppConfig,
    ) -> Self {
        Self {
            accounts,
            entries,
            journals,
            workflows,
            periods,
            balance_tolerance: config.validation.balance_tolerance,
            thresholds: ApprovalThresholdResolver::thresholds_from_limits(
                config.approval.level_1_limit,
                config.approval.level_2_limit,
            ),
        }
    }

    /// Validate a draft without storing anything.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    pub async fn validate_draft(&self, draft: &EntryDraft) -> Result<EntryReport, StoreError> {
        let (report, _) = self.draft_report(draft).await?;
        Ok(report)
    }

    /// Create a new draft entry.
    ///
    /// The draft must pass validation. When no reference is supplied,
    /// one is generated from the journal code, the accounting year and
    /// the next free sequence number.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The draft has any hard validation error
    /// - The journal does not exist or is inactive
    pub async fn create_entry(
        &self,
        draft: EntryDraft,
        created_by: UserId,
    ) -> Result<JournalEntry, StoreError> {
        let (report, period) = self.draft_report(&draft).await?;
        if !report.is_valid {
            return Err(StoreError::EntryInvalid {
                issues: report.errors,
            });
        }

        // A valid report guarantees a journal was picked.
        let Some(journal_id) = draft.journal_id else {
            return Err(StoreError::EntryInvalid {
                issues: vec![EntryIssue::MissingJournal],
            });
        };
        let journal = self
            .journals
            .fetch(journal_id)
            .await?
            .ok_or(StoreError::JournalNotFound(journal_id))?;
        if !journal.is_active {
            return Err(StoreError::JournalInactive(journal.code));
        }

        let accounting_date = draft.accounting_date.unwrap_or(draft.entry_date);
        let reference = match draft.reference.as_deref() {
            Some(reference) if !reference.trim().is_empty() => reference.to_string(),
            _ => {
                let year = accounting_date.year();
                let sequence = self.entries.next_sequence(journal_id, year).await?;
                JournalCloseService::next_reference(&journal.code, year, sequence)
            }
        };

        let lines = build_lines(&draft)?;
        let now = Utc::now();
        let entry = JournalEntry {
            id: EntryId::new(),
            journal_id,
            reference,
            entry_date: draft.entry_date,
            accounting_date,
            description: draft.description,
            status: EntryStatus::Draft,
            period_id: period.map(|p| p.id),
            created_by,
            created_at: now,
            updated_at: now,
            lines,
        };

        let created = self.entries.insert(entry).await?;
        info!(
            reference = %created.reference,
            journal = %journal.code,
            created_by = %created_by,
            "Journal entry created"
        );
        Ok(created)
    }

    /// Replace an editable entry's content.
    ///
    /// Only Draft and Rejected entries can be updated. The entry keeps
    /// its identity, status and reference.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The entry does not exist or is not editable
    /// - The new draft has any hard validation error
    /// - The journal does not exist or is inactive
    pub async fn update_entry(
        &self,
        id: EntryId,
        draft: EntryDraft,
        updated_by: UserId,
    ) -> Result<JournalEntry, StoreError> {
        let existing = self
            .entries
            .fetch(id)
            .await?
            .ok_or(StoreError::EntryNotFound(id))?;
        if !existing.is_editable() {
            return Err(StoreError::NotEditable {
                status: existing.status,
            });
        }

        let (report, period) = self.draft_report(&draft).await?;
        if !report.is_valid {
            return Err(StoreError::EntryInvalid {
                issues: report.errors,
            });
        }

        let Some(journal_id) = draft.journal_id else {
            return Err(StoreError::EntryInvalid {
                issues: vec![EntryIssue::MissingJournal],
            });
        };
        let journal = self
            .journals
            .fetch(journal_id)
            .await?
            .ok_or(StoreError::JournalNotFound(journal_id))?;
        if !journal.is_active {
            return Err(StoreError::JournalInactive(journal.code));
        }

        let lines = build_lines(&draft)?;
        let entry = JournalEntry {
            id: existing.id,
            journal_id,
            reference: existing.reference,
            entry_date: draft.entry_date,
            accounting_date: draft.accounting_date.unwrap_or(draft.entry_date),
            description: draft.description,
            status: existing.status,
            period_id: period.map(|p| p.id),
            created_by: existing.created_by,
            created_at: existing.created_at,
            updated_at: Utc::now(),
            lines,
        };

        let updated = self.entries.update(entry).await?;
        info!(
            reference = %updated.reference,
            updated_by = %updated_by,
            "Journal entry updated"
        );
        Ok(updated)
    }

    /// Fetch one entry by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the entry does not exist.
    pub async fn get_entry(&self, id: EntryId) -> Result<JournalEntry, StoreError> {
        self.entries
            .fetch(id)
            .await?
            .ok_or(StoreError::EntryNotFound(id))
    }

    /// List entries in creation order, one page at a time.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    pub async fn list_entries(
        &self,
        page: &PageRequest,
    ) -> Result<PageResponse<JournalEntry>, StoreError> {
        let entries = self.entries.list().await?;
        let total = u64::try_from(entries.len()).unwrap_or(u64::MAX);
        let offset = usize::try_from(page.offset()).unwrap_or(usize::MAX);
        let limit = usize::try_from(page.limit()).unwrap_or(usize::MAX);
        let data = entries.into_iter().skip(offset).take(limit).collect();
        Ok(PageResponse::new(data, page.page, page.per_page, total))
    }

    /// Submit an entry for approval.
    ///
    /// The entry is re-validated, then one pending approval record is
    /// created per required level. Resubmitting a rejected entry starts
    /// over with a fresh set of pending records.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The entry does not exist
    /// - The entry has any hard validation error
    /// - The entry is not in Draft or Rejected status
    pub async fn submit_entry(
        &self,
        id: EntryId,
        submitted_by: UserId,
    ) -> Result<JournalEntry, StoreError> {
        let mut entry = self
            .entries
            .fetch(id)
            .await?
            .ok_or(StoreError::EntryNotFound(id))?;

        let (report, _) = self.draft_report(&entry.to_draft()).await?;
        if !report.is_valid {
            return Err(StoreError::EntryInvalid {
                issues: report.errors,
            });
        }

        let action = WorkflowService::submit(entry.status, submitted_by)?;
        let plan =
            ApprovalThresholdResolver::required_levels(&self.thresholds, entry.total_amount());

        self.workflows.clear_for_entry(id).await?;
        for level in &plan.required_levels {
            self.workflows
                .insert(ApprovalWorkflow::pending(id, *level))
                .await?;
        }

        entry.status = action.new_status();
        entry.updated_at = Utc::now();
        let updated = self.entries.update(entry).await?;
        info!(
            reference = %updated.reference,
            required_levels = ?plan.required_levels,
            submitted_by = %submitted_by,
            "Journal entry submitted"
        );
        Ok(updated)
    }

    /// Record an approve or reject decision for one approval level.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No approval record exists for the entry at this level
    /// - The level has already been decided
    /// - The verdict is Pending
    pub async fn decide_level(
        &self,
        entry_id: EntryId,
        level: u8,
        verdict: ApprovalStatus,
        decided_by: UserId,
        notes: Option<String>,
    ) -> Result<ApprovalWorkflow, StoreError> {
        let record = self
            .workflows
            .list_for_entry(entry_id)
            .await?
            .into_iter()
            .find(|w| w.level == level)
            .ok_or(StoreError::ApprovalNotFound { entry_id, level })?;

        let decided = WorkflowService::decide(&record, verdict, decided_by, notes)?;
        let updated = self.workflows.update(decided).await?;
        info!(
            entry_id = %entry_id,
            level = updated.level,
            verdict = updated.status.as_str(),
            decided_by = %decided_by,
            "Approval level decided"
        );
        Ok(updated)
    }

    /// List the approval records of an entry, ordered by level.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    pub async fn list_approvals(
        &self,
        entry_id: EntryId,
    ) -> Result<Vec<ApprovalWorkflow>, StoreError> {
        self.workflows.list_for_entry(entry_id).await
    }

    /// Move a fully signed-off entry to Approved.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The entry does not exist
    /// - The entry is not in Submitted status
    /// - Any required approval level has not approved
    pub async fn approve_entry(
        &self,
        id: EntryId,
        approved_by: UserId,
        approval_notes: Option<String>,
    ) -> Result<JournalEntry, StoreError> {
        let mut entry = self
            .entries
            .fetch(id)
            .await?
            .ok_or(StoreError::EntryNotFound(id))?;

        let outstanding: Vec<u8> = self
            .workflows
            .list_for_entry(id)
            .await?
            .iter()
            .filter(|w| w.status != ApprovalStatus::Approved)
            .map(|w| w.level)
            .collect();

        let action =
            WorkflowService::approve(entry.status, approved_by, approval_notes, &outstanding)?;
        entry.status = action.new_status();
        entry.updated_at = Utc::now();
        let updated = self.entries.update(entry).await?;
        info!(
            reference = %updated.reference,
            approved_by = %approved_by,
            "Journal entry approved"
        );
        Ok(updated)
    }

    /// Reject a submitted entry, returning it to an editable state.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The entry does not exist
    /// - The entry is not in Submitted status
    /// - The rejection reason is blank
    pub async fn reject_entry(
        &self,
        id: EntryId,
        rejected_by: UserId,
        rejection_reason: String,
    ) -> Result<JournalEntry, StoreError> {
        let mut entry = self
            .entries
            .fetch(id)
            .await?
            .ok_or(StoreError::EntryNotFound(id))?;

        let action = WorkflowService::reject(entry.status, rejected_by, rejection_reason)?;
        entry.status = action.new_status();
        entry.updated_at = Utc::now();
        let updated = self.entries.update(entry).await?;
        info!(
            reference = %updated.reference,
            rejected_by = %rejected_by,
            "Journal entry rejected"
        );
        Ok(updated)
    }

    /// Post an approved entry to the ledger.
    ///
    /// Posting re-checks that the accounting period is still open and
    /// that the journal has not been closed for that period.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The entry does not exist
    /// - The entry is not in Approved status
    /// - The accounting period is closed
    /// - The journal is closed for the period
    pub async fn post_entry(
        &self,
        id: EntryId,
        posted_by: UserId,
    ) -> Result<JournalEntry, StoreError> {
        let mut entry = self
            .entries
            .fetch(id)
            .await?
            .ok_or(StoreError::EntryNotFound(id))?;

        let action = WorkflowService::post(entry.status, posted_by)?;

        if let Some(period_id) = entry.period_id {
            let period = self
                .periods
                .fetch(period_id)
                .await?
                .ok_or(StoreError::PeriodNotFound(period_id))?;
            if !period.is_open() {
                return Err(StoreError::PeriodClosed(period.name));
            }
            let closure = self
                .journals
                .period_state(entry.journal_id, period_id)
                .await?;
            if closure.is_some_and(|record| !record.is_open()) {
                let journal = self
                    .journals
                    .fetch(entry.journal_id)
                    .await?
                    .ok_or(StoreError::JournalNotFound(entry.journal_id))?;
                return Err(StoreError::JournalPeriodClosed(journal.code));
            }
        }

        entry.status = action.new_status();
        entry.updated_at = Utc::now();
        let updated = self.entries.update(entry).await?;
        info!(
            reference = %updated.reference,
            posted_by = %posted_by,
            "Journal entry posted"
        );
        Ok(updated)
    }

    /// Runs the validator against the chart and period on record.
    async fn draft_report(
        &self,
        draft: &EntryDraft,
    ) -> Result<(EntryReport, Option<AccountingPeriod>), StoreError> {
        let chart = self.accounts.list().await?;
        let accounting_date = draft.accounting_date.unwrap_or(draft.entry_date);
        let period = self.periods.find_for_date(accounting_date).await?;
        let ctx = EntryContext {
            today: Utc::now().date_naive(),
            balance_tolerance: self.balance_tolerance,
            period: period.as_ref(),
            chart: &chart,
        };
        Ok((EntryValidator::validate(draft, &ctx), period))
    }
}

/// Turns validated draft lines into entry lines.
fn build_lines(draft: &EntryDraft) -> Result<Vec<JournalEntryLine>, StoreError> {
    let mut lines = Vec::with_capacity(draft.lines.len());
    for (index, line) in draft.lines.iter().enumerate() {
        let Some(account_id) = line.account_id else {
            return Err(StoreError::EntryInvalid {
                issues: vec![EntryIssue::MissingLineAccount { line: index + 1 }],
            });
        };
        lines.push(JournalEntryLine {
            id: EntryLineId::new(),
            account_id,
            side: line.side,
            amount: line.amount,
            description: line.description.clone(),
        });
    }
    Ok(lines)
}
