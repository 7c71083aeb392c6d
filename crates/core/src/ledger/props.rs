//! Property-based tests for journal entry validation.

use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use balafon_shared::types::{AccountId, JournalId};
use chrono::NaiveDate;

use crate::chart::{standard_chart, ChartAccount};
use crate::ledger::entry::LineSide;
use crate::ledger::types::{EntryDraft, LineDraft};
use crate::ledger::validation::{EntryContext, EntryIssue, EntryValidator};

/// Strategy for a positive whole-franc amount.
fn arb_amount() -> impl Strategy<Value = Decimal> {
    (1i64..10_000_000i64).prop_map(Decimal::from)
}

fn line(account_id: Option<AccountId>, side: LineSide, amount: Decimal) -> LineDraft {
    LineDraft {
        account_id,
        side,
        amount,
        description: "Line".to_string(),
    }
}

fn draft(lines: Vec<LineDraft>) -> EntryDraft {
    EntryDraft {
        journal_id: Some(JournalId::new()),
        entry_date: NaiveDate::from_ymd_opt(2025, 3, 15).unwrap(),
        accounting_date: None,
        description: "Generated entry".to_string(),
        reference: None,
        lines,
    }
}

fn ctx(chart: &[ChartAccount]) -> EntryContext<'_> {
    EntryContext {
        today: NaiveDate::from_ymd_opt(2025, 3, 31).unwrap(),
        balance_tolerance: dec!(0.01),
        period: None,
        chart,
    }
}

fn account_id(chart: &[ChartAccount], code: &str) -> AccountId {
    chart.iter().find(|a| a.code == code).unwrap().id
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Mirrored debit/credit lines always balance and validate
    #[test]
    fn prop_mirrored_lines_balance(amounts in proptest::collection::vec(arb_amount(), 1..6)) {
        let chart = standard_chart();
        let cash = account_id(&chart, "57");
        let sales = account_id(&chart, "70");

        let mut lines = Vec::new();
        for amount in &amounts {
            lines.push(line(Some(cash), LineSide::Debit, *amount));
            lines.push(line(Some(sales), LineSide::Credit, *amount));
        }
        let d = draft(lines);

        let report = EntryValidator::validate(&d, &ctx(&chart));
        prop_assert!(report.balance.is_balanced);
        prop_assert!(report.is_valid, "unexpected errors: {:?}", report.errors);
        prop_assert_eq!(report.balance.debit_total, report.balance.credit_total);
    }

    /// Skewing one side beyond the tolerance reports the exact difference
    #[test]
    fn prop_skew_reports_exact_difference(
        amounts in proptest::collection::vec(arb_amount(), 1..6),
        skew in 1i64..1_000_000i64
    ) {
        let chart = standard_chart();
        let cash = account_id(&chart, "57");
        let sales = account_id(&chart, "70");

        let mut lines = Vec::new();
        for amount in &amounts {
            lines.push(line(Some(cash), LineSide::Debit, *amount));
            lines.push(line(Some(sales), LineSide::Credit, *amount));
        }
        lines[0].amount += Decimal::from(skew);
        let d = draft(lines);

        let report = EntryValidator::validate(&d, &ctx(&chart));
        prop_assert!(!report.balance.is_balanced);
        prop_assert!(!report.is_valid);
        prop_assert_eq!(report.balance.difference, Decimal::from(skew));
        prop_assert!(
            report.errors.iter().any(|e| matches!(e, EntryIssue::Unbalanced { .. })),
            "expected an Unbalanced error: {:?}",
            report.errors
        );
    }

    /// Validation is pure: the same input yields the same report
    #[test]
    fn prop_validation_is_pure(
        amounts in proptest::collection::vec(arb_amount(), 1..4),
        skew in 0i64..100i64
    ) {
        let chart = standard_chart();
        let cash = account_id(&chart, "57");
        let sales = account_id(&chart, "70");

        let mut lines = Vec::new();
        for amount in &amounts {
            lines.push(line(Some(cash), LineSide::Debit, *amount));
            lines.push(line(Some(sales), LineSide::Credit, *amount));
        }
        lines[0].amount += Decimal::from(skew);
        let d = draft(lines);
        let context = ctx(&chart);

        let first = EntryValidator::validate(&d, &context);
        let second = EntryValidator::validate(&d, &context);
        prop_assert_eq!(first.is_valid, second.is_valid);
        prop_assert_eq!(first.errors, second.errors);
        prop_assert_eq!(first.warnings, second.warnings);
        prop_assert_eq!(first.balance, second.balance);
        prop_assert_eq!(first.accounts, second.accounts);
    }

    /// Line issues carry the 1-based index of the offending line
    #[test]
    fn prop_line_issues_point_at_offender(
        amounts in proptest::collection::vec(arb_amount(), 2..6),
        pick in 0usize..6
    ) {
        let chart = standard_chart();
        let cash = account_id(&chart, "57");
        let sales = account_id(&chart, "70");

        let mut lines = Vec::new();
        for amount in &amounts {
            lines.push(line(Some(cash), LineSide::Debit, *amount));
            lines.push(line(Some(sales), LineSide::Credit, *amount));
        }
        let bad = pick % lines.len();
        lines[bad].account_id = None;
        let count = lines.len();
        let d = draft(lines);

        let report = EntryValidator::validate(&d, &ctx(&chart));
        prop_assert!(
            report.errors.contains(&EntryIssue::MissingLineAccount { line: bad + 1 }),
            "expected MissingLineAccount for line {}: {:?}",
            bad + 1,
            report.errors
        );
        for issue in &report.errors {
            if let EntryIssue::MissingLineAccount { line } = issue {
                prop_assert!(*line >= 1 && *line <= count);
            }
        }
    }
}
