//! Workflow service for entry state transitions.
//!
//! This module implements the core state machine logic for
//! moving journal entries through the approval workflow.

use balafon_shared::types::UserId;
use chrono::Utc;

use crate::ledger::EntryStatus;
use crate::workflow::error::WorkflowError;
use crate::workflow::types::{ApprovalStatus, ApprovalWorkflow, WorkflowAction};

/// Stateless service for managing entry workflow transitions.
///
/// All methods are associated functions that validate and execute
/// state transitions, returning the appropriate `WorkflowAction`
/// with audit trail information.
pub struct WorkflowService;

impl WorkflowService {
    /// Submit an entry for approval.
    ///
    /// Rejected entries can be corrected and resubmitted, so both
    /// Draft and Rejected are accepted here.
    ///
    /// # Arguments
    /// * `current_status` - The current status of the entry
    /// * `submitted_by` - The user submitting the entry
    ///
    /// # Returns
    /// * `Ok(WorkflowAction::Submit)` if the transition is valid
    /// * `Err(WorkflowError::InvalidTransition)` if not Draft or Rejected
    pub fn submit(
        current_status: EntryStatus,
        submitted_by: UserId,
    ) -> Result<WorkflowAction, WorkflowError> {
        match current_status {
            EntryStatus::Draft | EntryStatus::Rejected => Ok(WorkflowAction::Submit {
                new_status: EntryStatus::Submitted,
                submitted_by,
                submitted_at: Utc::now(),
            }),
            _ => Err(WorkflowError::InvalidTransition {
                from: current_status,
                to: EntryStatus::Submitted,
            }),
        }
    }

    /// Approve a submitted entry.
    ///
    /// The entry only moves to Approved once every required approval
    /// level has signed off, so the caller passes the levels that are
    /// still pending.
    ///
    /// # Arguments
    /// * `current_status` - The current status of the entry
    /// * `approved_by` - The user approving the entry
    /// * `approval_notes` - Optional notes from the approver
    /// * `outstanding_levels` - Required levels not yet approved
    ///
    /// # Returns
    /// * `Ok(WorkflowAction::Approve)` if the transition is valid
    /// * `Err(WorkflowError::InvalidTransition)` if not in Submitted status
    /// * `Err(WorkflowError::LevelsOutstanding)` if levels remain pending
    pub fn approve(
        current_status: EntryStatus,
        approved_by: UserId,
        approval_notes: Option<String>,
        outstanding_levels: &[u8],
    ) -> Result<WorkflowAction, WorkflowError> {
        if current_status != EntryStatus::Submitted {
            return Err(WorkflowError::InvalidTransition {
                from: current_status,
                to: EntryStatus::Approved,
            });
        }

        if !outstanding_levels.is_empty() {
            return Err(WorkflowError::LevelsOutstanding {
                levels: outstanding_levels.to_vec(),
            });
        }

        Ok(WorkflowAction::Approve {
            new_status: EntryStatus::Approved,
            approved_by,
            approved_at: Utc::now(),
            approval_notes,
        })
    }

    /// Reject a submitted entry.
    ///
    /// # Arguments
    /// * `current_status` - The current status of the entry
    /// * `rejected_by` - The user rejecting the entry
    /// * `rejection_reason` - The reason for rejection (required)
    ///
    /// # Returns
    /// * `Ok(WorkflowAction::Reject)` if the transition is valid
    /// * `Err(WorkflowError::InvalidTransition)` if not in Submitted status
    /// * `Err(WorkflowError::RejectionReasonRequired)` if reason is empty
    pub fn reject(
        current_status: EntryStatus,
        rejected_by: UserId,
        rejection_reason: String,
    ) -> Result<WorkflowAction, WorkflowError> {
        if rejection_reason.trim().is_empty() {
            return Err(WorkflowError::RejectionReasonRequired);
        }

        match current_status {
            EntryStatus::Submitted => Ok(WorkflowAction::Reject {
                new_status: EntryStatus::Rejected,
                rejected_by,
                rejected_at: Utc::now(),
                rejection_reason,
            }),
            _ => Err(WorkflowError::InvalidTransition {
                from: current_status,
                to: EntryStatus::Rejected,
            }),
        }
    }

    /// Post an approved entry to the ledger.
    ///
    /// # Arguments
    /// * `current_status` - The current status of the entry
    /// * `posted_by` - The user posting the entry
    ///
    /// # Returns
    /// * `Ok(WorkflowAction::Post)` if the transition is valid
    /// * `Err(WorkflowError::InvalidTransition)` if not in Approved status
    pub fn post(
        current_status: EntryStatus,
        posted_by: UserId,
    ) -> Result<WorkflowAction, WorkflowError> {
        match current_status {
            EntryStatus::Approved => Ok(WorkflowAction::Post {
                new_status: EntryStatus::Posted,
                posted_by,
                posted_at: Utc::now(),
            }),
            _ => Err(WorkflowError::InvalidTransition {
                from: current_status,
                to: EntryStatus::Posted,
            }),
        }
    }

    /// Record the decision for one approval level.
    ///
    /// Each level is decided independently; approving or rejecting one
    /// level never changes the records of the other levels.
    ///
    /// # Arguments
    /// * `workflow` - The pending approval record
    /// * `verdict` - The decision, either Approved or Rejected
    /// * `decided_by` - The user making the decision
    /// * `notes` - Optional notes attached to the decision
    ///
    /// # Returns
    /// * `Ok(ApprovalWorkflow)` with the decided record
    /// * `Err(WorkflowError::AlreadyDecided)` if the level is not pending
    /// * `Err(WorkflowError::InvalidVerdict)` if the verdict is Pending
    pub fn decide(
        workflow: &ApprovalWorkflow,
        verdict: ApprovalStatus,
        decided_by: UserId,
        notes: Option<String>,
    ) -> Result<ApprovalWorkflow, WorkflowError> {
        if verdict == ApprovalStatus::Pending {
            return Err(WorkflowError::InvalidVerdict);
        }

        if !workflow.is_pending() {
            return Err(WorkflowError::AlreadyDecided {
                level: workflow.level,
            });
        }

        let mut decided = workflow.clone();
        decided.status = verdict;
        decided.decided_by = Some(decided_by);
        decided.decided_at = Some(Utc::now());
        decided.notes = notes;
        Ok(decided)
    }

    /// Check if a status transition is valid.
    ///
    /// Valid transitions:
    /// - Draft → Submitted (submit)
    /// - Rejected → Submitted (resubmit)
    /// - Submitted → Approved (approve)
    /// - Submitted → Rejected (reject)
    /// - Approved → Posted (post)
    ///
    /// # Arguments
    /// * `from` - The current status
    /// * `to` - The target status
    ///
    /// # Returns
    /// `true` if the transition is valid, `false` otherwise
    #[must_use]
    pub fn is_valid_transition(from: EntryStatus, to: EntryStatus) -> bool {
        matches!(
            (from, to),
            (EntryStatus::Draft | EntryStatus::Rejected, EntryStatus::Submitted)
                | (
                    EntryStatus::Submitted,
                    EntryStatus::Approved | EntryStatus::Rejected
                )
                | (EntryStatus::Approved, EntryStatus::Posted)
        )
    }
}

#[cfg(test)]
mod tests {
    use balafon_shared::types::EntryId;

    use super::*;

    #[test]
    fn test_submit_from_draft() {
        let user_id = UserId::new();
        let result = WorkflowService::submit(EntryStatus::Draft, user_id);
        assert!(result.is_ok());
        let action = result.unwrap();
        assert_eq!(action.new_status(), EntryStatus::Submitted);
    }

    #[test]
    fn test_submit_from_rejected() {
        let user_id = UserId::new();
        let result = WorkflowService::submit(EntryStatus::Rejected, user_id);
        assert!(result.is_ok());
        assert_eq!(result.unwrap().new_status(), EntryStatus::Submitted);
    }

    #[test]
    fn test_submit_from_posted_fails() {
        let user_id = UserId::new();
        let result = WorkflowService::submit(EntryStatus::Posted, user_id);
        assert!(matches!(
            result,
            Err(WorkflowError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn test_approve_from_submitted() {
        let user_id = UserId::new();
        let result = WorkflowService::approve(EntryStatus::Submitted, user_id, None, &[]);
        assert!(result.is_ok());
        assert_eq!(result.unwrap().new_status(), EntryStatus::Approved);
    }

    #[test]
    fn test_approve_with_outstanding_levels_fails() {
        let user_id = UserId::new();
        let result = WorkflowService::approve(EntryStatus::Submitted, user_id, None, &[2]);
        assert!(matches!(
            result,
            Err(WorkflowError::LevelsOutstanding { levels }) if levels == vec![2]
        ));
    }

    #[test]
    fn test_approve_from_draft_fails() {
        let user_id = UserId::new();
        let result = WorkflowService::approve(EntryStatus::Draft, user_id, None, &[]);
        assert!(matches!(
            result,
            Err(WorkflowError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn test_reject_from_submitted() {
        let user_id = UserId::new();
        let result = WorkflowService::reject(
            EntryStatus::Submitted,
            user_id,
            "Wrong account on line 2".to_string(),
        );
        assert!(result.is_ok());
        assert_eq!(result.unwrap().new_status(), EntryStatus::Rejected);
    }

    #[test]
    fn test_reject_empty_reason_fails() {
        let user_id = UserId::new();
        let result = WorkflowService::reject(EntryStatus::Submitted, user_id, String::new());
        assert!(matches!(
            result,
            Err(WorkflowError::RejectionReasonRequired)
        ));
    }

    #[test]
    fn test_reject_whitespace_reason_fails() {
        let user_id = UserId::new();
        let result = WorkflowService::reject(EntryStatus::Submitted, user_id, "   ".to_string());
        assert!(matches!(
            result,
            Err(WorkflowError::RejectionReasonRequired)
        ));
    }

    #[test]
    fn test_post_from_approved() {
        let user_id = UserId::new();
        let result = WorkflowService::post(EntryStatus::Approved, user_id);
        assert!(result.is_ok());
        assert_eq!(result.unwrap().new_status(), EntryStatus::Posted);
    }

    #[test]
    fn test_post_from_submitted_fails() {
        let user_id = UserId::new();
        let result = WorkflowService::post(EntryStatus::Submitted, user_id);
        assert!(matches!(
            result,
            Err(WorkflowError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn test_decide_pending_level() {
        let record = ApprovalWorkflow::pending(EntryId::new(), 1);
        let user_id = UserId::new();
        let decided = WorkflowService::decide(
            &record,
            ApprovalStatus::Approved,
            user_id,
            Some("Checked against the invoice".to_string()),
        )
        .unwrap();
        assert_eq!(decided.status, ApprovalStatus::Approved);
        assert_eq!(decided.decided_by, Some(user_id));
        assert!(decided.decided_at.is_some());
        assert_eq!(decided.level, record.level);
        assert_eq!(decided.entry_id, record.entry_id);
    }

    #[test]
    fn test_decide_already_decided_fails() {
        let record = ApprovalWorkflow::pending(EntryId::new(), 2);
        let decided =
            WorkflowService::decide(&record, ApprovalStatus::Rejected, UserId::new(), None)
                .unwrap();
        let result = WorkflowService::decide(&decided, ApprovalStatus::Approved, UserId::new(), None);
        assert!(matches!(
            result,
            Err(WorkflowError::AlreadyDecided { level: 2 })
        ));
    }

    #[test]
    fn test_decide_pending_verdict_fails() {
        let record = ApprovalWorkflow::pending(EntryId::new(), 1);
        let result = WorkflowService::decide(&record, ApprovalStatus::Pending, UserId::new(), None);
        assert!(matches!(result, Err(WorkflowError::InvalidVerdict)));
    }

    #[test]
    fn test_is_valid_transition() {
        // Valid transitions
        assert!(WorkflowService::is_valid_transition(
            EntryStatus::Draft,
            EntryStatus::Submitted
        ));
        assert!(WorkflowService::is_valid_transition(
            EntryStatus::Rejected,
            EntryStatus::Submitted
        ));
        assert!(WorkflowService::is_valid_transition(
            EntryStatus::Submitted,
            EntryStatus::Approved
        ));
        assert!(WorkflowService::is_valid_transition(
            EntryStatus::Submitted,
            EntryStatus::Rejected
        ));
        assert!(WorkflowService::is_valid_transition(
            EntryStatus::Approved,
            EntryStatus::Posted
        ));

        // Invalid transitions
        assert!(!WorkflowService::is_valid_transition(
            EntryStatus::Draft,
            EntryStatus::Approved
        ));
        assert!(!WorkflowService::is_valid_transition(
            EntryStatus::Draft,
            EntryStatus::Posted
        ));
        assert!(!WorkflowService::is_valid_transition(
            EntryStatus::Posted,
            EntryStatus::Draft
        ));
    }
}
