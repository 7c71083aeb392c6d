//! Property-based tests for threshold resolution and the entry
//! state machine.

use proptest::prelude::*;

use balafon_shared::types::{EntryId, UserId};
use rust_decimal::Decimal;

use crate::ledger::EntryStatus;
use crate::workflow::approval::ApprovalThresholdResolver;
use crate::workflow::error::WorkflowError;
use crate::workflow::service::WorkflowService;
use crate::workflow::types::{ApprovalStatus, ApprovalWorkflow, WorkflowAction};

/// Strategy for generating random entry statuses.
fn arb_status() -> impl Strategy<Value = EntryStatus> {
    prop_oneof![
        Just(EntryStatus::Draft),
        Just(EntryStatus::Submitted),
        Just(EntryStatus::Approved),
        Just(EntryStatus::Rejected),
        Just(EntryStatus::Posted),
    ]
}

/// Strategy for a decided verdict (pending is not a decision).
fn arb_verdict() -> impl Strategy<Value = ApprovalStatus> {
    prop_oneof![Just(ApprovalStatus::Approved), Just(ApprovalStatus::Rejected)]
}

/// Strategy for entry amounts spanning all threshold buckets.
fn arb_amount() -> impl Strategy<Value = Decimal> {
    (0i64..5_000_000i64).prop_map(Decimal::from)
}

/// Strategy for non-empty free text (for rejection reasons).
fn arb_reason() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ]{1,100}".prop_map(|s| s.trim().to_string())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // =========================================================================
    // Threshold resolution
    // =========================================================================

    /// Resolving the same amount twice yields the same plan.
    #[test]
    fn prop_resolver_is_pure(amount in arb_amount()) {
        let thresholds = ApprovalThresholdResolver::default_thresholds();
        let first = ApprovalThresholdResolver::required_levels(&thresholds, amount);
        let second = ApprovalThresholdResolver::required_levels(&thresholds, amount);
        prop_assert_eq!(first, second);
    }

    /// Required levels come out sorted and the highest matches the last.
    #[test]
    fn prop_levels_sorted_and_highest_is_max(amount in arb_amount()) {
        let thresholds = ApprovalThresholdResolver::default_thresholds();
        let plan = ApprovalThresholdResolver::required_levels(&thresholds, amount);
        prop_assert!(plan.required_levels.windows(2).all(|w| w[0] < w[1]));
        prop_assert_eq!(plan.highest_level, plan.required_levels.last().copied());
    }

    /// With the standard table, the required levels follow the amount bucket.
    #[test]
    fn prop_buckets_follow_thresholds(amount in arb_amount()) {
        let thresholds = ApprovalThresholdResolver::default_thresholds();
        let plan = ApprovalThresholdResolver::required_levels(&thresholds, amount);

        let expected: Vec<u8> = if amount <= Decimal::from(100_000_i64) {
            vec![]
        } else if amount <= Decimal::from(1_000_000_i64) {
            vec![1]
        } else {
            vec![1, 2]
        };
        prop_assert_eq!(plan.required_levels, expected);
    }

    /// The unbounded top level never appears in a plan.
    #[test]
    fn prop_unbounded_level_never_required(amount in arb_amount()) {
        let thresholds = ApprovalThresholdResolver::default_thresholds();
        let plan = ApprovalThresholdResolver::required_levels(&thresholds, amount);
        prop_assert!(!plan.required_levels.contains(&3));
    }

    /// Pending required levels block the entry-level approval.
    #[test]
    fn prop_outstanding_levels_block_approve(amount in arb_amount()) {
        let thresholds = ApprovalThresholdResolver::default_thresholds();
        let plan = ApprovalThresholdResolver::required_levels(&thresholds, amount);

        let result = WorkflowService::approve(
            EntryStatus::Submitted,
            UserId::new(),
            None,
            &plan.required_levels,
        );
        if plan.is_empty() {
            prop_assert!(result.is_ok());
        } else {
            match result {
                Err(WorkflowError::LevelsOutstanding { levels }) => {
                    prop_assert_eq!(levels, plan.required_levels);
                }
                _ => prop_assert!(false, "Expected LevelsOutstanding error"),
            }
        }
    }

    // =========================================================================
    // Entry state machine
    // =========================================================================

    /// Submit succeeds exactly from Draft and Rejected.
    #[test]
    fn prop_submit_only_from_editable(status in arb_status()) {
        let result = WorkflowService::submit(status, UserId::new());
        let editable = matches!(status, EntryStatus::Draft | EntryStatus::Rejected);
        prop_assert_eq!(result.is_ok(), editable);
        if let Ok(action) = result {
            prop_assert_eq!(action.new_status(), EntryStatus::Submitted);
        }
    }

    /// Reject keeps the caller and the reason in the audit trail.
    #[test]
    fn prop_reject_preserves_caller_and_reason(reason in arb_reason()) {
        prop_assume!(!reason.trim().is_empty());

        let user_id = UserId::new();
        let action =
            WorkflowService::reject(EntryStatus::Submitted, user_id, reason.clone()).unwrap();
        match action {
            WorkflowAction::Reject { rejected_by, rejection_reason, new_status, .. } => {
                prop_assert_eq!(rejected_by, user_id);
                prop_assert_eq!(rejection_reason, reason);
                prop_assert_eq!(new_status, EntryStatus::Rejected);
            }
            _ => prop_assert!(false, "Expected Reject action"),
        }
    }

    /// is_valid_transition agrees with the transition table.
    #[test]
    fn prop_is_valid_transition_consistency(
        from in arb_status(),
        to in arb_status()
    ) {
        let is_valid = WorkflowService::is_valid_transition(from, to);

        let expected_valid = matches!(
            (from, to),
            (EntryStatus::Draft, EntryStatus::Submitted)
                | (EntryStatus::Rejected, EntryStatus::Submitted)
                | (EntryStatus::Submitted, EntryStatus::Approved)
                | (EntryStatus::Submitted, EntryStatus::Rejected)
                | (EntryStatus::Approved, EntryStatus::Posted)
        );

        prop_assert_eq!(is_valid, expected_valid,
            "is_valid_transition({:?}, {:?}) = {}, expected {}",
            from, to, is_valid, expected_valid);
    }

    /// Deciding a level keeps its identity and records the verdict.
    #[test]
    fn prop_decide_preserves_identity(
        verdict in arb_verdict(),
        level in 1u8..=3u8
    ) {
        let record = ApprovalWorkflow::pending(EntryId::new(), level);
        let user_id = UserId::new();
        let decided = WorkflowService::decide(&record, verdict, user_id, None).unwrap();
        prop_assert_eq!(decided.id, record.id);
        prop_assert_eq!(decided.entry_id, record.entry_id);
        prop_assert_eq!(decided.level, level);
        prop_assert_eq!(decided.status, verdict);
        prop_assert_eq!(decided.decided_by, Some(user_id));
        prop_assert!(decided.decided_at.is_some());
    }

    /// A level can only be decided once.
    #[test]
    fn prop_decide_is_single_shot(
        first in arb_verdict(),
        second in arb_verdict(),
        level in 1u8..=3u8
    ) {
        let record = ApprovalWorkflow::pending(EntryId::new(), level);
        let decided = WorkflowService::decide(&record, first, UserId::new(), None).unwrap();
        let result = WorkflowService::decide(&decided, second, UserId::new(), None);
        match result {
            Err(WorkflowError::AlreadyDecided { level: reported }) => {
                prop_assert_eq!(reported, level);
            }
            _ => prop_assert!(false, "Expected AlreadyDecided error"),
        }
    }
}

// =========================================================================
// Unit tests for edge cases
// =========================================================================

#[cfg(test)]
mod edge_case_tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn test_amount_exactly_at_each_threshold() {
        let thresholds = ApprovalThresholdResolver::default_thresholds();

        let plan = ApprovalThresholdResolver::required_levels(&thresholds, dec!(100_000));
        assert!(plan.required_levels.is_empty());

        let plan = ApprovalThresholdResolver::required_levels(&thresholds, dec!(1_000_000));
        assert_eq!(plan.required_levels, vec![1]);
    }

    #[test]
    fn test_zero_amount_requires_nothing() {
        let thresholds = ApprovalThresholdResolver::default_thresholds();
        let plan = ApprovalThresholdResolver::required_levels(&thresholds, Decimal::ZERO);
        assert!(plan.is_empty());
        assert_eq!(plan.highest_level, None);
    }

    #[test]
    fn test_posted_entry_is_terminal() {
        for to in [
            EntryStatus::Draft,
            EntryStatus::Submitted,
            EntryStatus::Approved,
            EntryStatus::Rejected,
            EntryStatus::Posted,
        ] {
            assert!(
                !WorkflowService::is_valid_transition(EntryStatus::Posted, to),
                "Posted should not transition to {to:?}"
            );
        }
    }
}
