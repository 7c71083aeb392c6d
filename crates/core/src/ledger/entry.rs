//! Journal entry aggregate and line types.

use balafon_shared::types::{AccountId, EntryId, EntryLineId, JournalId, PeriodId, UserId};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::types::{EntryDraft, LineDraft};

/// Which side of the ledger a line touches.
///
/// In double-entry bookkeeping:
/// - Debits increase asset/expense accounts, decrease liability/equity/income accounts
/// - Credits decrease asset/expense accounts, increase liability/equity/income accounts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineSide {
    /// Debit line.
    Debit,
    /// Credit line.
    Credit,
}

impl LineSide {
    /// Returns the lowercase string form.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Debit => "debit",
            Self::Credit => "credit",
        }
    }
}

/// Lifecycle status of a journal entry.
///
/// Entries progress from draft through approval to posting. A rejected
/// entry returns to an editable state and can be resubmitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryStatus {
    /// Entry is being drafted and can be modified.
    Draft,
    /// Entry has been submitted for approval.
    Submitted,
    /// Entry has cleared every required approval level.
    Approved,
    /// Entry was rejected and can be edited and resubmitted.
    Rejected,
    /// Entry has been posted to the ledger (immutable).
    Posted,
}

impl EntryStatus {
    /// Returns the lowercase string form.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Submitted => "submitted",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Posted => "posted",
        }
    }

    /// Returns true if an entry in this status can be modified.
    #[must_use]
    pub fn is_editable(self) -> bool {
        matches!(self, Self::Draft | Self::Rejected)
    }
}

impl std::fmt::Display for EntryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single debit or credit line in a journal entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalEntryLine {
    /// Unique identifier for this line.
    pub id: EntryLineId,
    /// The account this line touches.
    pub account_id: AccountId,
    /// Whether this is a debit or credit.
    pub side: LineSide,
    /// Amount in FCFA (always positive).
    pub amount: Decimal,
    /// Description of this line.
    pub description: String,
}

impl JournalEntryLine {
    /// Returns the signed amount (positive for debit, negative for credit).
    #[must_use]
    pub fn signed_amount(&self) -> Decimal {
        match self.side {
            LineSide::Debit => self.amount,
            LineSide::Credit => -self.amount,
        }
    }
}

/// A balanced set of debit and credit lines recorded against a journal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalEntry {
    /// Unique identifier.
    pub id: EntryId,
    /// Journal this entry is recorded in.
    pub journal_id: JournalId,
    /// Entry reference number, e.g. `VTE-2025-0001`.
    pub reference: String,
    /// Date the entry was written.
    pub entry_date: NaiveDate,
    /// Date the entry takes accounting effect.
    pub accounting_date: NaiveDate,
    /// Entry description.
    pub description: String,
    /// Current lifecycle status.
    pub status: EntryStatus,
    /// Accounting period the entry falls in, when one is assigned.
    pub period_id: Option<PeriodId>,
    /// User who created the entry.
    pub created_by: UserId,
    /// When the entry was created.
    pub created_at: DateTime<Utc>,
    /// When the entry was last updated.
    pub updated_at: DateTime<Utc>,
    /// Debit and credit lines.
    #[serde(default)]
    pub lines: Vec<JournalEntryLine>,
}

impl JournalEntry {
    /// Returns true if the entry can be edited.
    #[must_use]
    pub fn is_editable(&self) -> bool {
        self.status.is_editable()
    }

    /// Returns true if the entry can be submitted for approval.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        matches!(self.status, EntryStatus::Draft | EntryStatus::Rejected)
    }

    /// Returns true if the entry can be approved or rejected.
    #[must_use]
    pub fn can_approve(&self) -> bool {
        self.status == EntryStatus::Submitted
    }

    /// Returns true if the entry can be posted.
    #[must_use]
    pub fn can_post(&self) -> bool {
        self.status == EntryStatus::Approved
    }

    /// Sum of all debit lines.
    #[must_use]
    pub fn total_debit(&self) -> Decimal {
        self.lines
            .iter()
            .filter(|line| line.side == LineSide::Debit)
            .map(|line| line.amount)
            .sum()
    }

    /// Sum of all credit lines.
    #[must_use]
    pub fn total_credit(&self) -> Decimal {
        self.lines
            .iter()
            .filter(|line| line.side == LineSide::Credit)
            .map(|line| line.amount)
            .sum()
    }

    /// The entry's total amount: the larger of the two sides.
    #[must_use]
    pub fn total_amount(&self) -> Decimal {
        self.total_debit().max(self.total_credit())
    }

    /// Rebuilds the draft view of this entry for re-validation.
    #[must_use]
    pub fn to_draft(&self) -> EntryDraft {
        EntryDraft {
            journal_id: Some(self.journal_id),
            entry_date: self.entry_date,
            accounting_date: Some(self.accounting_date),
            description: self.description.clone(),
            reference: Some(self.reference.clone()),
            lines: self
                .lines
                .iter()
                .map(|line| LineDraft {
                    account_id: Some(line.account_id),
                    side: line.side,
                    amount: line.amount,
                    description: line.description.clone(),
                })
                .collect(),
        }
    }
}
