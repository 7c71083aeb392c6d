//! Journal domain types.
//!
//! A journal is a named sub-ledger grouping entries by business
//! function. Each accounting period is closed per journal, and a
//! closed (journal, period) pair no longer accepts postings.

use balafon_shared::types::{JournalId, PeriodId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The business function a journal serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JournalKind {
    /// Miscellaneous operations (code GEN).
    General,
    /// Customer invoicing (code VTE).
    Sales,
    /// Supplier invoices (code ACH).
    Purchases,
    /// Bank movements (code BNQ).
    Bank,
    /// Cash movements (code CAI).
    Cash,
}

impl JournalKind {
    /// All journal kinds, in conventional order.
    pub const ALL: [Self; 5] = [
        Self::General,
        Self::Sales,
        Self::Purchases,
        Self::Bank,
        Self::Cash,
    ];

    /// Returns the SYSCOHADA journal code.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::General => "GEN",
            Self::Sales => "VTE",
            Self::Purchases => "ACH",
            Self::Bank => "BNQ",
            Self::Cash => "CAI",
        }
    }

    /// Parses a kind from its journal code.
    pub fn parse_code(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "GEN" => Some(Self::General),
            "VTE" => Some(Self::Sales),
            "ACH" => Some(Self::Purchases),
            "BNQ" => Some(Self::Bank),
            "CAI" => Some(Self::Cash),
            _ => None,
        }
    }

    /// Returns the conventional French name for this journal.
    #[must_use]
    pub fn default_name(&self) -> &'static str {
        match self {
            Self::General => "Journal général",
            Self::Sales => "Journal des ventes",
            Self::Purchases => "Journal des achats",
            Self::Bank => "Journal de banque",
            Self::Cash => "Journal de caisse",
        }
    }

    /// Account code prefixes typically used on entries in this journal.
    ///
    /// Entry forms offer these as defaults; they are suggestions,
    /// never a restriction on which accounts an entry may use.
    #[must_use]
    pub fn suggested_accounts(&self) -> &'static [&'static str] {
        match self {
            Self::General => &[],
            Self::Sales => &["70", "41", "44"],
            Self::Purchases => &["60", "40", "44"],
            Self::Bank => &["52"],
            Self::Cash => &["57"],
        }
    }
}

impl fmt::Display for JournalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A named sub-ledger grouping related entries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Journal {
    /// Unique identifier.
    pub id: JournalId,
    /// Short code used in entry references, e.g. `VTE`.
    pub code: String,
    /// Human-readable name.
    pub name: String,
    /// The business function this journal serves.
    pub kind: JournalKind,
    /// Optional free-text description.
    pub description: Option<String>,
    /// Inactive journals no longer accept new entries.
    pub is_active: bool,
}

impl Journal {
    /// Creates an active journal with the kind's conventional code and name.
    #[must_use]
    pub fn standard(kind: JournalKind) -> Self {
        Self {
            id: JournalId::new(),
            code: kind.code().to_string(),
            name: kind.default_name().to_string(),
            kind,
            description: None,
            is_active: true,
        }
    }
}

/// Whether a (journal, period) pair still accepts postings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JournalPeriodState {
    /// Entries may still be posted.
    Open,
    /// The pair is closed; postings are refused.
    Closed,
}

/// Closure record for one journal in one accounting period.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalPeriod {
    /// The journal being closed.
    pub journal_id: JournalId,
    /// The accounting period being closed.
    pub period_id: PeriodId,
    /// Current state of the pair.
    pub state: JournalPeriodState,
    /// The user who closed the pair, while closed.
    pub closed_by: Option<UserId>,
    /// When the pair was closed.
    pub closed_at: Option<DateTime<Utc>>,
}

impl JournalPeriod {
    /// Creates a fresh open record for a journal and period.
    #[must_use]
    pub fn open(journal_id: JournalId, period_id: PeriodId) -> Self {
        Self {
            journal_id,
            period_id,
            state: JournalPeriodState::Open,
            closed_by: None,
            closed_at: None,
        }
    }

    /// Returns true while the pair accepts postings.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.state == JournalPeriodState::Open
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_codes_round_trip() {
        for kind in JournalKind::ALL {
            assert_eq!(JournalKind::parse_code(kind.code()), Some(kind));
        }
        assert_eq!(JournalKind::parse_code("vte"), Some(JournalKind::Sales));
        assert_eq!(JournalKind::parse_code("XYZ"), None);
    }

    #[test]
    fn test_suggested_accounts_per_kind() {
        assert_eq!(JournalKind::Sales.suggested_accounts(), ["70", "41", "44"]);
        assert_eq!(
            JournalKind::Purchases.suggested_accounts(),
            ["60", "40", "44"]
        );
        assert_eq!(JournalKind::Bank.suggested_accounts(), ["52"]);
        assert_eq!(JournalKind::Cash.suggested_accounts(), ["57"]);
        assert!(JournalKind::General.suggested_accounts().is_empty());
    }

    #[test]
    fn test_standard_journal() {
        let journal = Journal::standard(JournalKind::Bank);
        assert_eq!(journal.code, "BNQ");
        assert_eq!(journal.name, "Journal de banque");
        assert!(journal.is_active);
    }

    #[test]
    fn test_open_record() {
        let record = JournalPeriod::open(JournalId::new(), PeriodId::new());
        assert!(record.is_open());
        assert!(record.closed_by.is_none());
        assert!(record.closed_at.is_none());
    }
}
