//! Chart and entry file auditor for Balafon.
//!
//! Validates a chart of accounts CSV against the SYSCOHADA rules and,
//! optionally, a journal entry batch against that chart. Prints a
//! report and exits non-zero when any hard error is found.
//!
//! Usage: auditor <chart.csv> [entries.csv]

use std::fs::File;
use std::process::ExitCode;

use balafon_core::chart::{ChartAccount, ChartStructureValidator, ComplianceScorer};
use balafon_core::journal::{Journal, JournalKind};
use balafon_io::{AccountCsvImporter, ChartImport, EntryCsvImporter, EntryImport};
use balafon_shared::types::format_fcfa;
use balafon_shared::AppConfig;
use rust_decimal::Decimal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<ExitCode> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "balafon=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut args = std::env::args().skip(1);
    let Some(chart_path) = args.next() else {
        eprintln!("Usage: auditor <chart.csv> [entries.csv]");
        return Ok(ExitCode::FAILURE);
    };
    let entries_path = args.next();

    let config = AppConfig::load()?;
    info!(chart = %chart_path, "Auditing chart file");

    let chart_file = File::open(&chart_path)?;
    let import = AccountCsvImporter::import(chart_file)?;

    let mut failed = report_chart_import(&import);
    failed |= report_structure(&import.accounts);
    report_compliance(&import.accounts);

    if let Some(path) = entries_path {
        info!(entries = %path, "Auditing entry file");
        let entry_file = File::open(&path)?;
        let journals: Vec<Journal> = JournalKind::ALL
            .iter()
            .map(|kind| Journal::standard(*kind))
            .collect();
        let batch = EntryCsvImporter::import(
            entry_file,
            &journals,
            &import.accounts,
            config.validation.balance_tolerance,
        )?;
        failed |= report_entries(&batch);
    }

    Ok(if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

/// Prints import totals and row errors. Returns true on any error.
fn report_chart_import(import: &ChartImport) -> bool {
    println!(
        "Chart: {} accounts imported, {} rows rejected",
        import.accounts.len(),
        import.errors.len()
    );
    for error in &import.errors {
        println!("  {error}");
    }
    !import.is_clean()
}

/// Prints the structural report. Returns true when the chart is invalid.
fn report_structure(accounts: &[ChartAccount]) -> bool {
    let report = ChartStructureValidator::validate(accounts);
    if report.is_valid {
        println!(
            "Structure: OK ({} active / {} total)",
            report.active_accounts, report.total_accounts
        );
    } else {
        println!("Structure: {} issue(s)", report.errors.len());
        for issue in &report.errors {
            println!("  {issue}");
        }
    }
    if !report.missing_accounts.is_empty() {
        println!(
            "  Missing mandatory accounts: {}",
            report.missing_accounts.join(", ")
        );
    }
    !report.is_valid
}

/// Prints the compliance score with its findings. Advisory only.
fn report_compliance(accounts: &[ChartAccount]) {
    let report = ComplianceScorer::check_compliance(accounts);
    let verdict = if report.is_compliant {
        "compliant"
    } else {
        "not compliant"
    };
    println!("Compliance: {}/100 ({verdict})", report.score);
    for line in &report.details {
        println!("  {line}");
    }
    for line in &report.recommendations {
        println!("  -> {line}");
    }
}

/// Prints the entry batch outcome. Returns true on any rejected row.
fn report_entries(batch: &EntryImport) -> bool {
    let total: Decimal = batch.drafts.iter().map(|d| d.total_amount()).sum();
    println!(
        "Entries: {} accepted ({}), {} rejected",
        batch.drafts.len(),
        format_fcfa(total),
        batch.errors.len()
    );
    for error in &batch.errors {
        println!("  {error}");
    }
    for (row, warning) in &batch.warnings {
        println!("  Row {row} warning: {warning}");
    }
    !batch.is_clean()
}
