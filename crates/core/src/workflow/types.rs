//! Workflow domain types for entry lifecycle management.
//!
//! This module defines the types used for managing entry status
//! transitions, per-level approval records and workflow actions.

use balafon_shared::types::{ApprovalId, EntryId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::ledger::entry::EntryStatus;

/// Status of a single approval level for an entry.
///
/// Each required level gets its own record; deciding one level never
/// cascades into the others.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApprovalStatus {
    /// Awaiting a decision.
    Pending,
    /// This level has signed off.
    Approved,
    /// This level has refused.
    Rejected,
}

impl ApprovalStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    /// Parses a status from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pending" => Some(Self::Pending),
            "approved" => Some(Self::Approved),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }
}

impl fmt::Display for ApprovalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One approval record per (entry, required level) pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApprovalWorkflow {
    /// Unique identifier.
    pub id: ApprovalId,
    /// The entry awaiting sign-off.
    pub entry_id: EntryId,
    /// The approval level this record covers.
    pub level: u8,
    /// Current status of this level.
    pub status: ApprovalStatus,
    /// The user who decided this level, once decided.
    pub decided_by: Option<UserId>,
    /// When the decision was made.
    pub decided_at: Option<DateTime<Utc>>,
    /// Optional notes from the decider.
    pub notes: Option<String>,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
}

impl ApprovalWorkflow {
    /// Creates a fresh pending record for an entry and level.
    #[must_use]
    pub fn pending(entry_id: EntryId, level: u8) -> Self {
        Self {
            id: ApprovalId::new(),
            entry_id,
            level,
            status: ApprovalStatus::Pending,
            decided_by: None,
            decided_at: None,
            notes: None,
            created_at: Utc::now(),
        }
    }

    /// Returns true while this level awaits a decision.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.status == ApprovalStatus::Pending
    }
}

/// Workflow action representing a state transition with audit data.
///
/// Each variant captures the action performed, the resulting status,
/// and the audit trail information (who, when, why).
#[derive(Debug, Clone)]
pub enum WorkflowAction {
    /// Submit an entry for approval.
    Submit {
        /// The new status after submission.
        new_status: EntryStatus,
        /// The user who submitted the entry.
        submitted_by: UserId,
        /// When the entry was submitted.
        submitted_at: DateTime<Utc>,
    },
    /// Approve a submitted entry.
    Approve {
        /// The new status after approval.
        new_status: EntryStatus,
        /// The user who approved the entry.
        approved_by: UserId,
        /// When the entry was approved.
        approved_at: DateTime<Utc>,
        /// Optional notes from the approver.
        approval_notes: Option<String>,
    },
    /// Reject a submitted entry.
    Reject {
        /// The new status after rejection.
        new_status: EntryStatus,
        /// The user who rejected the entry.
        rejected_by: UserId,
        /// When the entry was rejected.
        rejected_at: DateTime<Utc>,
        /// The reason for rejection.
        rejection_reason: String,
    },
    /// Post an approved entry to the ledger.
    Post {
        /// The new status after posting.
        new_status: EntryStatus,
        /// The user who posted the entry.
        posted_by: UserId,
        /// When the entry was posted.
        posted_at: DateTime<Utc>,
    },
}

impl WorkflowAction {
    /// Returns the new status resulting from this action.
    #[must_use]
    pub fn new_status(&self) -> EntryStatus {
        match self {
            Self::Submit { new_status, .. }
            | Self::Approve { new_status, .. }
            | Self::Reject { new_status, .. }
            | Self::Post { new_status, .. } => *new_status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_approval_status_as_str() {
        assert_eq!(ApprovalStatus::Pending.as_str(), "pending");
        assert_eq!(ApprovalStatus::Approved.as_str(), "approved");
        assert_eq!(ApprovalStatus::Rejected.as_str(), "rejected");
    }

    #[test]
    fn test_approval_status_parse() {
        assert_eq!(
            ApprovalStatus::parse("pending"),
            Some(ApprovalStatus::Pending)
        );
        assert_eq!(
            ApprovalStatus::parse("APPROVED"),
            Some(ApprovalStatus::Approved)
        );
        assert_eq!(
            ApprovalStatus::parse("Rejected"),
            Some(ApprovalStatus::Rejected)
        );
        assert_eq!(ApprovalStatus::parse("invalid"), None);
    }

    #[test]
    fn test_pending_record() {
        let entry_id = EntryId::new();
        let record = ApprovalWorkflow::pending(entry_id, 2);
        assert_eq!(record.entry_id, entry_id);
        assert_eq!(record.level, 2);
        assert!(record.is_pending());
        assert!(record.decided_by.is_none());
        assert!(record.decided_at.is_none());
    }

    #[test]
    fn test_action_new_status() {
        let action = WorkflowAction::Submit {
            new_status: EntryStatus::Submitted,
            submitted_by: UserId::new(),
            submitted_at: Utc::now(),
        };
        assert_eq!(action.new_status(), EntryStatus::Submitted);
    }
}
