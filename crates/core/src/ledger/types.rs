//! Input types for journal entry creation and validation.
//!
//! Drafts capture what the user typed, before any rule has run. Fields
//! that the validator treats as required are optional here so a missing
//! value surfaces as a validation issue instead of a construction error.

use balafon_shared::types::{AccountId, JournalId};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::entry::LineSide;

/// A line as captured from user input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineDraft {
    /// The account to post to, when one was picked.
    pub account_id: Option<AccountId>,
    /// Whether this is a debit or credit line.
    pub side: LineSide,
    /// Amount in FCFA.
    pub amount: Decimal,
    /// Description of this line.
    pub description: String,
}

/// A journal entry as captured from user input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntryDraft {
    /// The journal to record the entry in, when one was picked.
    pub journal_id: Option<JournalId>,
    /// Date the entry was written.
    pub entry_date: NaiveDate,
    /// Date the entry takes accounting effect; defaults to the entry date.
    pub accounting_date: Option<NaiveDate>,
    /// Entry description.
    pub description: String,
    /// Optional reference number; generated at creation when absent.
    pub reference: Option<String>,
    /// Debit and credit lines.
    pub lines: Vec<LineDraft>,
}

impl EntryDraft {
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

    /// The draft's total amount: the larger of the two sides.
    #[must_use]
    pub fn total_amount(&self) -> Decimal {
        self.total_debit().max(self.total_credit())
    }
}
