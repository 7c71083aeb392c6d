//! Workflow error types for the entry lifecycle.
//!
//! This module defines all error types that can occur during
//! workflow operations such as status transitions, approval
//! decisions, and posting.

use thiserror::Error;

use crate::ledger::EntryStatus;

/// Errors that can occur during workflow operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkflowError {
    /// Attempted an invalid status transition.
    #[error("Invalid status transition from {from} to {to}")]
    InvalidTransition {
        /// The current status.
        from: EntryStatus,
        /// The attempted target status.
        to: EntryStatus,
    },

    /// Rejection reason is required but not provided.
    #[error("Rejection reason is required")]
    RejectionReasonRequired,

    /// Approval levels are still pending for the entry.
    #[error("Approval levels {levels:?} are still pending")]
    LevelsOutstanding {
        /// The levels that have not yet been approved.
        levels: Vec<u8>,
    },

    /// The approval at this level has already been decided.
    #[error("Approval at level {level} has already been decided")]
    AlreadyDecided {
        /// The workflow level.
        level: u8,
    },

    /// An approval decision must be approved or rejected, never pending.
    #[error("An approval decision cannot be pending")]
    InvalidVerdict,
}

impl WorkflowError {
    /// Returns the error code for reporting.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidTransition { .. } => "INVALID_TRANSITION",
            Self::RejectionReasonRequired => "REJECTION_REASON_REQUIRED",
            Self::LevelsOutstanding { .. } => "LEVELS_OUTSTANDING",
            Self::AlreadyDecided { .. } => "ALREADY_DECIDED",
            Self::InvalidVerdict => "INVALID_VERDICT",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_transition_error() {
        let err = WorkflowError::InvalidTransition {
            from: EntryStatus::Draft,
            to: EntryStatus::Posted,
        };
        assert_eq!(err.error_code(), "INVALID_TRANSITION");
        assert!(err.to_string().contains("draft"));
        assert!(err.to_string().contains("posted"));
    }

    #[test]
    fn test_rejection_reason_required_error() {
        let err = WorkflowError::RejectionReasonRequired;
        assert_eq!(err.error_code(), "REJECTION_REASON_REQUIRED");
    }

    #[test]
    fn test_levels_outstanding_error() {
        let err = WorkflowError::LevelsOutstanding { levels: vec![1, 2] };
        assert_eq!(err.error_code(), "LEVELS_OUTSTANDING");
        assert!(err.to_string().contains("[1, 2]"));
    }

    #[test]
    fn test_already_decided_error() {
        let err = WorkflowError::AlreadyDecided { level: 2 };
        assert_eq!(err.error_code(), "ALREADY_DECIDED");
        assert!(err.to_string().contains('2'));
    }

    #[test]
    fn test_invalid_verdict_error() {
        let err = WorkflowError::InvalidVerdict;
        assert_eq!(err.error_code(), "INVALID_VERDICT");
    }
}
