//! Batch journal entry CSV import.
//!
//! Each data row describes one complete entry as a debit/credit pair:
//! {Journal, Date Écriture, Date Comptable, Description, Référence,
//! Compte Débit, Montant Débit, Description Débit, Compte Crédit,
//! Montant Crédit, Description Crédit}. Journals and accounts are
//! resolved by code against the caller's records, and every surviving
//! row runs through the entry validator.

use std::io::Read;

use balafon_core::chart::ChartAccount;
use balafon_core::journal::Journal;
use balafon_core::ledger::{
    EntryContext, EntryDraft, EntryValidator, EntryWarning, LineDraft, LineSide,
};
use balafon_shared::types::AccountId;
use chrono::{NaiveDate, Utc};
use csv::StringRecord;
use rust_decimal::Decimal;

use crate::error::ImportError;

/// Outcome of a batch entry import.
#[derive(Debug, Clone)]
pub struct EntryImport {
    /// Validated entry drafts, in file order.
    pub drafts: Vec<EntryDraft>,
    /// Errors for the rejected rows.
    pub errors: Vec<ImportError>,
    /// Non-blocking findings, keyed by 1-based data row number.
    pub warnings: Vec<(usize, EntryWarning)>,
}

impl EntryImport {
    /// Returns true when every row was accepted.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Column indexes resolved from the header row.
struct Columns {
    journal: usize,
    entry_date: usize,
    accounting_date: Option<usize>,
    description: Option<usize>,
    reference: Option<usize>,
    debit_account: usize,
    debit_amount: usize,
    debit_description: Option<usize>,
    credit_account: usize,
    credit_amount: usize,
    credit_description: Option<usize>,
}

impl Columns {
    fn resolve(headers: &StringRecord) -> Result<Self, ImportError> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim().to_lowercase() == name.to_lowercase())
        };
        let require = |name: &'static str| {
            find(name).ok_or_else(|| ImportError::MissingColumn(name.to_string()))
        };

        Ok(Self {
            journal: require("Journal")?,
            entry_date: require("Date Écriture")?,
            accounting_date: find("Date Comptable"),
            description: find("Description"),
            reference: find("Référence"),
            debit_account: require("Compte Débit")?,
            debit_amount: require("Montant Débit")?,
            debit_description: find("Description Débit"),
            credit_account: require("Compte Crédit")?,
            credit_amount: require("Montant Crédit")?,
            credit_description: find("Description Crédit"),
        })
    }
}

/// Stateless CSV importer for journal entry batches.
pub struct EntryCsvImporter;

impl EntryCsvImporter {
    /// Import entry drafts from CSV.
    ///
    /// # Errors
    ///
    /// Returns an error when the header row is unreadable or a
    /// required column is missing. Row-level failures are collected in
    /// the result instead.
    pub fn import(
        input: impl Read,
        journals: &[Journal],
        chart: &[ChartAccount],
        tolerance: Decimal,
    ) -> Result<EntryImport, ImportError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(input);

        let headers = reader
            .headers()
            .map_err(|e| ImportError::Malformed(e.to_string()))?
            .clone();
        let columns = Columns::resolve(&headers)?;

        let today = Utc::now().date_naive();
        let mut drafts = Vec::new();
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        for (index, result) in reader.records().enumerate() {
            let row = index + 1;
            let record = match result {
                Ok(record) => record,
                Err(e) => {
                    errors.push(ImportError::Malformed(format!("row {row}: {e}")));
                    continue;
                }
            };

            let draft = match Self::parse_row(row, &record, &columns, journals, chart, tolerance) {
                Ok(draft) => draft,
                Err(e) => {
                    errors.push(e);
                    continue;
                }
            };

            let ctx = EntryContext {
                today,
                balance_tolerance: tolerance,
                period: None,
                chart,
            };
            let report = EntryValidator::validate(&draft, &ctx);
            if report.is_valid {
                warnings.extend(report.warnings.into_iter().map(|w| (row, w)));
                drafts.push(draft);
            } else {
                errors.push(ImportError::EntryRejected {
                    row,
                    issues: report.errors,
                });
            }
        }

        Ok(EntryImport {
            drafts,
            errors,
            warnings,
        })
    }

    fn parse_row(
        row: usize,
        record: &StringRecord,
        columns: &Columns,
        journals: &[Journal],
        chart: &[ChartAccount],
        tolerance: Decimal,
    ) -> Result<EntryDraft, ImportError> {
        let field = |index: usize| record.get(index).unwrap_or("").trim();
        let optional = |index: Option<usize>| index.map(field).filter(|v| !v.is_empty());

        let journal_code = field(columns.journal);
        if journal_code.is_empty() {
            return Err(ImportError::MissingField {
                row,
                field: "Journal",
            });
        }
        let journal_id = journals
            .iter()
            .find(|j| j.code.eq_ignore_ascii_case(journal_code))
            .map(|j| j.id)
            .ok_or_else(|| ImportError::UnknownJournal {
                row,
                code: journal_code.to_string(),
            })?;

        let entry_date_raw = field(columns.entry_date);
        if entry_date_raw.is_empty() {
            return Err(ImportError::MissingField {
                row,
                field: "Date Écriture",
            });
        }
        let entry_date = parse_date(entry_date_raw).ok_or_else(|| ImportError::InvalidField {
            row,
            field: "Date Écriture",
            value: entry_date_raw.to_string(),
        })?;
        let accounting_date = match optional(columns.accounting_date) {
            Some(raw) => Some(parse_date(raw).ok_or_else(|| ImportError::InvalidField {
                row,
                field: "Date Comptable",
                value: raw.to_string(),
            })?),
            None => None,
        };

        let debit_account = Self::resolve_account(row, "Compte Débit", field(columns.debit_account), chart)?;
        let credit_account =
            Self::resolve_account(row, "Compte Crédit", field(columns.credit_account), chart)?;

        let debit_amount = Self::parse_amount_field(row, "Montant Débit", field(columns.debit_amount))?;
        let credit_amount =
            Self::parse_amount_field(row, "Montant Crédit", field(columns.credit_amount))?;

        if (debit_amount - credit_amount).abs() > tolerance {
            return Err(ImportError::RowUnbalanced {
                row,
                debit: debit_amount,
                credit: credit_amount,
            });
        }

        let description = optional(columns.description).unwrap_or("").to_string();
        let debit_description = optional(columns.debit_description)
            .unwrap_or(&description)
            .to_string();
        let credit_description = optional(columns.credit_description)
            .unwrap_or(&description)
            .to_string();

        Ok(EntryDraft {
            journal_id: Some(journal_id),
            entry_date,
            accounting_date,
            description,
            reference: optional(columns.reference).map(str::to_string),
            lines: vec![
                LineDraft {
                    account_id: Some(debit_account),
                    side: LineSide::Debit,
                    amount: debit_amount,
                    description: debit_description,
                },
                LineDraft {
                    account_id: Some(credit_account),
                    side: LineSide::Credit,
                    amount: credit_amount,
                    description: credit_description,
                },
            ],
        })
    }

    fn resolve_account(
        row: usize,
        field: &'static str,
        code: &str,
        chart: &[ChartAccount],
    ) -> Result<AccountId, ImportError> {
        if code.is_empty() {
            return Err(ImportError::MissingField { row, field });
        }
        chart
            .iter()
            .find(|a| a.code == code)
            .map(|a| a.id)
            .ok_or_else(|| ImportError::InvalidField {
                row,
                field,
                value: code.to_string(),
            })
    }

    fn parse_amount_field(
        row: usize,
        field: &'static str,
        value: &str,
    ) -> Result<Decimal, ImportError> {
        if value.is_empty() {
            return Err(ImportError::MissingField { row, field });
        }
        parse_amount(value).ok_or_else(|| ImportError::InvalidField {
            row,
            field,
            value: value.to_string(),
        })
    }
}

/// Accepts ISO dates and the French day-first form.
fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(value, "%d/%m/%Y"))
        .ok()
}

/// Accepts plain decimals, comma decimals and spaced thousands.
fn parse_amount(value: &str) -> Option<Decimal> {
    let cleaned: String = value.chars().filter(|c| !c.is_whitespace()).collect();
    cleaned
        .parse::<Decimal>()
        .or_else(|_| cleaned.replace(',', ".").parse::<Decimal>())
        .ok()
}
