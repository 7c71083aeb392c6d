//! Reference chart seeder for Balafon.
//!
//! Writes the SYSCOHADA starter chart of accounts to a CSV file that
//! the importer and the auditor accept as-is.
//!
//! Usage: cargo run --bin seeder [-- <output.csv>]

use std::fs::File;
use std::path::PathBuf;

use balafon_core::chart::standard_chart;
use balafon_io::AccountCsvExporter;

fn main() -> anyhow::Result<()> {
    let output = std::env::args()
        .nth(1)
        .map_or_else(|| PathBuf::from("chart-syscohada.csv"), PathBuf::from);

    let chart = standard_chart();
    println!(
        "Writing {} accounts to {}...",
        chart.len(),
        output.display()
    );

    let file = File::create(&output)?;
    AccountCsvExporter::export(&chart, file)?;

    println!("Seeding complete!");
    Ok(())
}
