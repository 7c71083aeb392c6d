//! Property-based tests for account validation, child code generation
//! and compliance scoring.

use proptest::prelude::*;

use balafon_shared::types::AccountId;

use crate::chart::compliance::ComplianceScorer;
use crate::chart::error::ChartError;
use crate::chart::rules;
use crate::chart::structure::ChartStructureValidator;
use crate::chart::template::standard_chart;
use crate::chart::types::{AccountClass, ChartAccount};
use crate::chart::validate::{AccountRuleViolation, AccountValidator};

/// Strategy for a structurally well-formed account.
///
/// The code starts with the class digit, the type is drawn from the
/// class's allowed set and the name is short and non-blank.
fn arb_valid_account() -> impl Strategy<Value = ChartAccount> {
    (
        1u8..=9u8,
        proptest::collection::vec(0u8..=9u8, 1..=5),
        0usize..4,
        "[A-Za-z][A-Za-z ]{0,60}",
    )
        .prop_map(|(digit, tail, type_idx, name)| {
            let class = AccountClass::from_digit(digit).unwrap();
            let mut code = digit.to_string();
            for d in tail {
                code.push(char::from(b'0' + d));
            }
            let allowed = rules::allowed_types(class);
            let account_type = allowed[type_idx % allowed.len()];
            ChartAccount {
                id: AccountId::new(),
                code,
                class,
                account_type,
                name,
                description: None,
                parent_id: None,
                level: 1,
                is_auxiliary: false,
                is_reconcilable: false,
                is_active: true,
            }
        })
}

/// Strategy for a parent code that still has room for children.
fn arb_parent_code() -> impl Strategy<Value = String> {
    (1u8..=9u8, proptest::collection::vec(0u8..=9u8, 1..=4)).prop_map(|(digit, tail)| {
        let mut code = digit.to_string();
        for d in tail {
            code.push(char::from(b'0' + d));
        }
        code
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // =========================================================================
    // Account validation
    // =========================================================================

    /// Accounts honoring all code rules validate cleanly
    #[test]
    fn prop_well_formed_account_is_valid(account in arb_valid_account()) {
        let report = AccountValidator::validate(&account);
        prop_assert!(report.is_valid, "unexpected errors: {:?}", report.errors);
    }

    /// A wrong declared class trips both the class and the range rule
    #[test]
    fn prop_class_mismatch_fires_independent_rules(
        account in arb_valid_account(),
        shift in 1u8..=8u8
    ) {
        let mut account = account;
        let digit = account.class.digit();
        let wrong = ((digit - 1 + shift) % 9) + 1;
        account.class = AccountClass::from_digit(wrong).unwrap();

        let report = AccountValidator::validate(&account);
        prop_assert!(!report.is_valid);
        prop_assert!(
            report.errors.iter().any(|e| matches!(e, AccountRuleViolation::ClassCodeMismatch { .. })),
            "expected a class mismatch in {:?}", report.errors
        );
        prop_assert!(
            report.errors.iter().any(|e| matches!(e, AccountRuleViolation::CodeOutOfRange { .. })),
            "expected a range violation in {:?}", report.errors
        );
    }

    /// Blanking the name always invalidates, whatever the code
    #[test]
    fn prop_blank_name_is_invalid(account in arb_valid_account()) {
        let mut account = account;
        account.name = "   ".to_string();
        let report = AccountValidator::validate(&account);
        prop_assert!(!report.is_valid);
        prop_assert!(report.errors.contains(&AccountRuleViolation::EmptyName));
    }

    // =========================================================================
    // Child code generation
    // =========================================================================

    /// Generated child codes extend the parent by exactly one digit and
    /// take the smallest free suffix
    #[test]
    fn prop_child_code_takes_first_gap(
        parent in arb_parent_code(),
        suffixes in proptest::collection::btree_set(1u32..=9u32, 0..=8)
    ) {
        let existing: Vec<String> = suffixes.iter().map(|s| format!("{parent}{s}")).collect();
        let refs: Vec<&str> = existing.iter().map(String::as_str).collect();

        let code = ChartStructureValidator::generate_child_code(&parent, &refs).unwrap();
        prop_assert!(code.starts_with(parent.as_str()));
        prop_assert_eq!(code.len(), parent.len() + 1);
        prop_assert!(!existing.contains(&code));

        let suffix: u32 = code[parent.len()..].parse().unwrap();
        for candidate in 1..suffix {
            prop_assert!(suffixes.contains(&candidate), "suffix {} skipped a free slot", suffix);
        }
    }

    /// Nine children exhaust a parent
    #[test]
    fn prop_child_code_exhaustion(parent in arb_parent_code()) {
        let existing: Vec<String> = (1..=9).map(|s| format!("{parent}{s}")).collect();
        let refs: Vec<&str> = existing.iter().map(String::as_str).collect();

        let result = ChartStructureValidator::generate_child_code(&parent, &refs);
        prop_assert!(matches!(result, Err(ChartError::ChildCodesExhausted(_))));
    }

    // =========================================================================
    // Compliance scoring
    // =========================================================================

    /// The score is a multiple of twenty and compliance means exactly 100
    #[test]
    fn prop_score_is_quantized(
        accounts in proptest::collection::vec(arb_valid_account(), 0..40)
    ) {
        let report = ComplianceScorer::check_compliance(&accounts);
        prop_assert!(report.score <= 100);
        prop_assert_eq!(report.score % 20, 0);
        prop_assert_eq!(report.is_compliant, report.score == 100);
    }

    /// Dropping any mandatory account breaks structural validity
    #[test]
    fn prop_missing_mandatory_detected(idx in 0usize..rules::MANDATORY_CODES.len()) {
        let dropped = rules::MANDATORY_CODES[idx];
        let chart: Vec<ChartAccount> = standard_chart()
            .into_iter()
            .filter(|a| a.code != dropped)
            .collect();

        let report = ChartStructureValidator::validate(&chart);
        prop_assert!(!report.is_valid);
        prop_assert!(report.missing_accounts.iter().any(|c| c == dropped));
    }
}

#[cfg(test)]
mod edge_case_tests {
    use super::*;

    #[test]
    fn test_single_digit_parent_is_rejected() {
        let result = ChartStructureValidator::generate_child_code("4", &[]);
        assert!(matches!(result, Err(ChartError::InvalidParentCode(_))));
    }

    #[test]
    fn test_child_suffix_zero_is_never_generated() {
        let code = ChartStructureValidator::generate_child_code("52", &["520"]).unwrap();
        assert_eq!(code, "521");
    }
}
