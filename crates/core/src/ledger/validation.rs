//! Business rule validation for journal entries.
//!
//! The validator is total: it never fails, it returns a structured
//! report listing every issue found. Hard errors block saving and
//! submission, warnings are surfaced but non-blocking.

use std::collections::HashSet;

use balafon_shared::types::PeriodId;
use balafon_shared::types::money::round_fcfa;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::chart::{AccountValidator, ChartAccount};
use crate::fiscal::AccountingPeriod;

use super::types::{EntryDraft, LineDraft};

/// Hard errors that block saving or submitting an entry.
///
/// Line-level variants carry the 1-based index of the offending line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EntryIssue {
    // ========== Line Issues ==========
    /// A line has no account selected.
    #[error("Line {line}: an account must be selected")]
    MissingLineAccount {
        /// 1-based line index.
        line: usize,
    },

    /// A line amount is zero or negative.
    #[error("Line {line}: amount must be positive")]
    NonPositiveLineAmount {
        /// 1-based line index.
        line: usize,
    },

    /// A line has no description.
    #[error("Line {line}: a description is required")]
    MissingLineDescription {
        /// 1-based line index.
        line: usize,
    },

    /// A line references an account that is not in the chart.
    #[error("Line {line}: account does not exist")]
    UnknownAccount {
        /// 1-based line index.
        line: usize,
    },

    /// A line references an inactive account.
    #[error("Line {line}: account {code} is inactive")]
    InactiveAccount {
        /// 1-based line index.
        line: usize,
        /// The inactive account's code.
        code: String,
    },

    // ========== Entry Issues ==========
    /// No journal was selected.
    #[error("A journal must be selected")]
    MissingJournal,

    /// The entry has no description.
    #[error("A description is required")]
    MissingDescription,

    /// The entry date lies in the future.
    #[error("Entry date {entry_date} is in the future")]
    FutureDate {
        /// The offending date.
        entry_date: NaiveDate,
    },

    /// The entry has fewer than two lines.
    #[error("An entry requires at least 2 lines, got {count}")]
    TooFewLines {
        /// Number of lines present.
        count: usize,
    },

    /// Debits and credits differ beyond the tolerance.
    #[error("Entry is unbalanced: debit {debit_total} vs credit {credit_total}, difference {difference:.2} FCFA")]
    Unbalanced {
        /// Sum of debit lines.
        debit_total: Decimal,
        /// Sum of credit lines.
        credit_total: Decimal,
        /// Absolute difference, rounded to 2 decimal places.
        difference: Decimal,
    },

    /// The accounting period is closed.
    #[error("Accounting period {name} is closed")]
    PeriodClosed {
        /// The closed period's name.
        name: String,
    },
}

/// Non-blocking findings surfaced alongside an entry validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EntryWarning {
    /// A line references an account that breaks chart rules.
    #[error("Line {line}: account {code} does not satisfy chart rules")]
    NonCompliantAccount {
        /// 1-based line index.
        line: usize,
        /// The offending account's code.
        code: String,
    },
}

/// Balance summary of an entry's lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BalanceCheck {
    /// True when the difference is within tolerance.
    pub is_balanced: bool,
    /// Sum of debit lines.
    pub debit_total: Decimal,
    /// Sum of credit lines.
    pub credit_total: Decimal,
    /// Absolute difference, rounded to 2 decimal places.
    pub difference: Decimal,
}

/// Accounting period summary for an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodCheck {
    /// True when no period applies or the applicable period is open.
    pub is_open: bool,
    /// The applicable period, when one was supplied.
    pub period_id: Option<PeriodId>,
}

/// Distinct-account tallies over an entry's lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccountChecks {
    /// Distinct accounts referenced by the lines.
    pub referenced_accounts: usize,
    /// How many of those resolve to a chart account.
    pub valid_accounts: usize,
    /// How many resolve to an active account.
    pub active_accounts: usize,
    /// How many resolve to an account passing chart rules.
    pub compliant_accounts: usize,
}

/// Result of validating a journal entry draft.
#[derive(Debug, Clone)]
pub struct EntryReport {
    /// True when no hard error was found.
    pub is_valid: bool,
    /// Hard errors blocking save and submit.
    pub errors: Vec<EntryIssue>,
    /// Non-blocking findings.
    pub warnings: Vec<EntryWarning>,
    /// Balance summary.
    pub balance: BalanceCheck,
    /// Period summary.
    pub period: PeriodCheck,
    /// Account tallies.
    pub accounts: AccountChecks,
}

/// Everything the validator needs to know beside the draft itself.
#[derive(Debug, Clone, Copy)]
pub struct EntryContext<'a> {
    /// Today's date, for the future-date rule.
    pub today: NaiveDate,
    /// Maximum tolerated debit/credit difference.
    pub balance_tolerance: Decimal,
    /// The accounting period the entry falls in, when periods are managed.
    pub period: Option<&'a AccountingPeriod>,
    /// The chart of accounts to resolve lines against.
    pub chart: &'a [ChartAccount],
}

/// Stateless validator for journal entry drafts.
pub struct EntryValidator;

impl EntryValidator {
    /// Validates a single line: account picked, positive amount,
    /// non-blank description.
    #[must_use]
    pub fn validate_line(line_number: usize, line: &LineDraft) -> Vec<EntryIssue> {
        let mut issues = Vec::new();
        if line.account_id.is_none() {
            issues.push(EntryIssue::MissingLineAccount { line: line_number });
        }
        if line.amount <= Decimal::ZERO {
            issues.push(EntryIssue::NonPositiveLineAmount { line: line_number });
        }
        if line.description.trim().is_empty() {
            issues.push(EntryIssue::MissingLineDescription { line: line_number });
        }
        issues
    }

    /// Validates a whole draft against the given context.
    ///
    /// All rules run; one failing rule does not suppress the others.
    #[must_use]
    pub fn validate(draft: &EntryDraft, ctx: &EntryContext<'_>) -> EntryReport {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        if draft.journal_id.is_none() {
            errors.push(EntryIssue::MissingJournal);
        }
        if draft.description.trim().is_empty() {
            errors.push(EntryIssue::MissingDescription);
        }
        if draft.entry_date > ctx.today {
            errors.push(EntryIssue::FutureDate {
                entry_date: draft.entry_date,
            });
        }
        if draft.lines.len() < 2 {
            errors.push(EntryIssue::TooFewLines {
                count: draft.lines.len(),
            });
        }

        for (index, line) in draft.lines.iter().enumerate() {
            errors.extend(Self::validate_line(index + 1, line));
        }

        let accounts = Self::check_accounts(draft, ctx.chart, &mut errors, &mut warnings);
        let balance = Self::check_balance(draft, ctx.balance_tolerance, &mut errors);
        let period = Self::check_period(ctx.period, &mut errors);

        EntryReport {
            is_valid: errors.is_empty(),
            errors,
            warnings,
            balance,
            period,
            accounts,
        }
    }

    fn check_accounts(
        draft: &EntryDraft,
        chart: &[ChartAccount],
        errors: &mut Vec<EntryIssue>,
        warnings: &mut Vec<EntryWarning>,
    ) -> AccountChecks {
        let mut referenced = HashSet::new();
        let mut valid = HashSet::new();
        let mut active = HashSet::new();
        let mut compliant = HashSet::new();

        for (index, line) in draft.lines.iter().enumerate() {
            let line_number = index + 1;
            let Some(account_id) = line.account_id else {
                continue;
            };
            referenced.insert(account_id);

            let Some(account) = chart.iter().find(|a| a.id == account_id) else {
                errors.push(EntryIssue::UnknownAccount { line: line_number });
                continue;
            };
            valid.insert(account_id);

            if account.is_active {
                active.insert(account_id);
            } else {
                errors.push(EntryIssue::InactiveAccount {
                    line: line_number,
                    code: account.code.clone(),
                });
            }

            if AccountValidator::validate(account).is_valid {
                compliant.insert(account_id);
            } else {
                warnings.push(EntryWarning::NonCompliantAccount {
                    line: line_number,
                    code: account.code.clone(),
                });
            }
        }

        AccountChecks {
            referenced_accounts: referenced.len(),
            valid_accounts: valid.len(),
            active_accounts: active.len(),
            compliant_accounts: compliant.len(),
        }
    }

    fn check_balance(
        draft: &EntryDraft,
        tolerance: Decimal,
        errors: &mut Vec<EntryIssue>,
    ) -> BalanceCheck {
        let debit_total = draft.total_debit();
        let credit_total = draft.total_credit();
        let difference = round_fcfa((debit_total - credit_total).abs());
        let is_balanced = (debit_total - credit_total).abs() <= tolerance;

        if !is_balanced {
            errors.push(EntryIssue::Unbalanced {
                debit_total,
                credit_total,
                difference,
            });
        }

        BalanceCheck {
            is_balanced,
            debit_total,
            credit_total,
            difference,
        }
    }

    fn check_period(
        period: Option<&AccountingPeriod>,
        errors: &mut Vec<EntryIssue>,
    ) -> PeriodCheck {
        match period {
            None => PeriodCheck {
                is_open: true,
                period_id: None,
            },
            Some(period) => {
                let is_open = period.is_open();
                if !is_open {
                    errors.push(EntryIssue::PeriodClosed {
                        name: period.name.clone(),
                    });
                }
                PeriodCheck {
                    is_open,
                    period_id: Some(period.id),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::standard_chart;
    use crate::fiscal::PeriodStatus;
    use crate::ledger::entry::LineSide;
    use balafon_shared::types::{AccountId, JournalId};
    use rust_decimal_macros::dec;

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
            description: "Cash sale".to_string(),
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

    #[test]
    fn test_balanced_entry_is_valid() {
        let chart = standard_chart();
        let cash = account_id(&chart, "57");
        let sales = account_id(&chart, "70");
        let d = draft(vec![
            line(Some(cash), LineSide::Debit, dec!(100_000)),
            line(Some(sales), LineSide::Credit, dec!(100_000)),
        ]);

        let report = EntryValidator::validate(&d, &ctx(&chart));
        assert!(report.is_valid, "unexpected errors: {:?}", report.errors);
        assert!(report.balance.is_balanced);
        assert_eq!(report.balance.difference, Decimal::ZERO);
        assert!(report.period.is_open);
        assert_eq!(report.accounts.referenced_accounts, 2);
        assert_eq!(report.accounts.valid_accounts, 2);
        assert_eq!(report.accounts.active_accounts, 2);
        assert_eq!(report.accounts.compliant_accounts, 2);
    }

    #[test]
    fn test_unbalanced_entry_reports_difference() {
        let chart = standard_chart();
        let cash = account_id(&chart, "57");
        let sales = account_id(&chart, "70");
        let d = draft(vec![
            line(Some(cash), LineSide::Debit, dec!(100_000)),
            line(Some(sales), LineSide::Credit, dec!(99_000)),
        ]);

        let report = EntryValidator::validate(&d, &ctx(&chart));
        assert!(!report.is_valid);
        assert!(!report.balance.is_balanced);
        assert_eq!(report.balance.difference, dec!(1000));

        let unbalanced = report
            .errors
            .iter()
            .find(|e| matches!(e, EntryIssue::Unbalanced { .. }))
            .unwrap();
        assert!(unbalanced.to_string().contains("1000.00 FCFA"));
    }

    #[test]
    fn test_difference_within_tolerance_is_balanced() {
        let chart = standard_chart();
        let cash = account_id(&chart, "57");
        let sales = account_id(&chart, "70");
        let d = draft(vec![
            line(Some(cash), LineSide::Debit, dec!(100.01)),
            line(Some(sales), LineSide::Credit, dec!(100.00)),
        ]);

        let report = EntryValidator::validate(&d, &ctx(&chart));
        assert!(report.balance.is_balanced);
        assert!(report.is_valid);
    }

    #[test]
    fn test_difference_just_over_tolerance_is_unbalanced() {
        let chart = standard_chart();
        let cash = account_id(&chart, "57");
        let sales = account_id(&chart, "70");
        let d = draft(vec![
            line(Some(cash), LineSide::Debit, dec!(100.02)),
            line(Some(sales), LineSide::Credit, dec!(100.00)),
        ]);

        let report = EntryValidator::validate(&d, &ctx(&chart));
        assert!(!report.balance.is_balanced);
    }

    #[test]
    fn test_missing_journal_and_description() {
        let chart = standard_chart();
        let cash = account_id(&chart, "57");
        let sales = account_id(&chart, "70");
        let mut d = draft(vec![
            line(Some(cash), LineSide::Debit, dec!(1000)),
            line(Some(sales), LineSide::Credit, dec!(1000)),
        ]);
        d.journal_id = None;
        d.description = "  ".to_string();

        let report = EntryValidator::validate(&d, &ctx(&chart));
        assert!(report.errors.contains(&EntryIssue::MissingJournal));
        assert!(report.errors.contains(&EntryIssue::MissingDescription));
    }

    #[test]
    fn test_future_date_is_rejected_today_is_allowed() {
        let chart = standard_chart();
        let cash = account_id(&chart, "57");
        let sales = account_id(&chart, "70");
        let lines = vec![
            line(Some(cash), LineSide::Debit, dec!(1000)),
            line(Some(sales), LineSide::Credit, dec!(1000)),
        ];

        let mut d = draft(lines.clone());
        d.entry_date = NaiveDate::from_ymd_opt(2025, 4, 1).unwrap();
        let report = EntryValidator::validate(&d, &ctx(&chart));
        assert!(report
            .errors
            .iter()
            .any(|e| matches!(e, EntryIssue::FutureDate { .. })));

        let mut d = draft(lines);
        d.entry_date = NaiveDate::from_ymd_opt(2025, 3, 31).unwrap();
        let report = EntryValidator::validate(&d, &ctx(&chart));
        assert!(report.is_valid);
    }

    #[test]
    fn test_too_few_lines() {
        let chart = standard_chart();
        let cash = account_id(&chart, "57");
        let d = draft(vec![line(Some(cash), LineSide::Debit, dec!(1000))]);

        let report = EntryValidator::validate(&d, &ctx(&chart));
        assert!(report.errors.contains(&EntryIssue::TooFewLines { count: 1 }));
    }

    #[test]
    fn test_line_issues_carry_one_based_index() {
        let chart = standard_chart();
        let cash = account_id(&chart, "57");
        let mut second = line(None, LineSide::Credit, dec!(0));
        second.description = String::new();
        let d = draft(vec![line(Some(cash), LineSide::Debit, dec!(1000)), second]);

        let report = EntryValidator::validate(&d, &ctx(&chart));
        assert!(report.errors.contains(&EntryIssue::MissingLineAccount { line: 2 }));
        assert!(report.errors.contains(&EntryIssue::NonPositiveLineAmount { line: 2 }));
        assert!(report.errors.contains(&EntryIssue::MissingLineDescription { line: 2 }));
    }

    #[test]
    fn test_unknown_account_is_an_error() {
        let chart = standard_chart();
        let cash = account_id(&chart, "57");
        let d = draft(vec![
            line(Some(cash), LineSide::Debit, dec!(1000)),
            line(Some(AccountId::new()), LineSide::Credit, dec!(1000)),
        ]);

        let report = EntryValidator::validate(&d, &ctx(&chart));
        assert!(report.errors.contains(&EntryIssue::UnknownAccount { line: 2 }));
        assert_eq!(report.accounts.referenced_accounts, 2);
        assert_eq!(report.accounts.valid_accounts, 1);
    }

    #[test]
    fn test_inactive_account_is_an_error() {
        let mut chart = standard_chart();
        if let Some(account) = chart.iter_mut().find(|a| a.code == "70") {
            account.is_active = false;
        }
        let cash = account_id(&chart, "57");
        let sales = account_id(&chart, "70");
        let d = draft(vec![
            line(Some(cash), LineSide::Debit, dec!(1000)),
            line(Some(sales), LineSide::Credit, dec!(1000)),
        ]);

        let report = EntryValidator::validate(&d, &ctx(&chart));
        assert!(report.errors.iter().any(
            |e| matches!(e, EntryIssue::InactiveAccount { line: 2, code } if code == "70")
        ));
        assert_eq!(report.accounts.active_accounts, 1);
    }

    #[test]
    fn test_non_compliant_account_is_a_warning() {
        let mut chart = standard_chart();
        if let Some(account) = chart.iter_mut().find(|a| a.code == "70") {
            account.class = crate::chart::AccountClass::OperatingExpenses;
        }
        let cash = account_id(&chart, "57");
        let sales = account_id(&chart, "70");
        let d = draft(vec![
            line(Some(cash), LineSide::Debit, dec!(1000)),
            line(Some(sales), LineSide::Credit, dec!(1000)),
        ]);

        let report = EntryValidator::validate(&d, &ctx(&chart));
        assert!(report.is_valid);
        assert!(report.warnings.iter().any(
            |w| matches!(w, EntryWarning::NonCompliantAccount { line: 2, code } if code == "70")
        ));
        assert_eq!(report.accounts.compliant_accounts, 1);
    }

    #[test]
    fn test_closed_period_blocks_entry() {
        let chart = standard_chart();
        let cash = account_id(&chart, "57");
        let sales = account_id(&chart, "70");
        let d = draft(vec![
            line(Some(cash), LineSide::Debit, dec!(1000)),
            line(Some(sales), LineSide::Credit, dec!(1000)),
        ]);

        let period = AccountingPeriod {
            id: balafon_shared::types::PeriodId::new(),
            name: "Mars 2025".to_string(),
            start_date: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 3, 31).unwrap(),
            status: PeriodStatus::Closed,
        };
        let mut context = ctx(&chart);
        context.period = Some(&period);

        let report = EntryValidator::validate(&d, &context);
        assert!(!report.is_valid);
        assert!(!report.period.is_open);
        assert_eq!(report.period.period_id, Some(period.id));
        assert!(report
            .errors
            .iter()
            .any(|e| matches!(e, EntryIssue::PeriodClosed { name } if name == "Mars 2025")));
    }

    #[test]
    fn test_open_period_passes() {
        let chart = standard_chart();
        let cash = account_id(&chart, "57");
        let sales = account_id(&chart, "70");
        let d = draft(vec![
            line(Some(cash), LineSide::Debit, dec!(1000)),
            line(Some(sales), LineSide::Credit, dec!(1000)),
        ]);

        let period = AccountingPeriod {
            id: balafon_shared::types::PeriodId::new(),
            name: "Mars 2025".to_string(),
            start_date: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 3, 31).unwrap(),
            status: PeriodStatus::Open,
        };
        let mut context = ctx(&chart);
        context.period = Some(&period);

        let report = EntryValidator::validate(&d, &context);
        assert!(report.is_valid);
        assert!(report.period.is_open);
    }

    #[test]
    fn test_duplicate_account_counted_once() {
        let chart = standard_chart();
        let cash = account_id(&chart, "57");
        let sales = account_id(&chart, "70");
        let d = draft(vec![
            line(Some(cash), LineSide::Debit, dec!(500)),
            line(Some(cash), LineSide::Debit, dec!(500)),
            line(Some(sales), LineSide::Credit, dec!(1000)),
        ]);

        let report = EntryValidator::validate(&d, &ctx(&chart));
        assert!(report.is_valid);
        assert_eq!(report.accounts.referenced_accounts, 2);
    }
}
