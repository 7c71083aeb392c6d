//! Chart of accounts CSV import and export.
//!
//! The import contract: columns {Code, Classe, Type, Nom, Description,
//! Auxiliaire, Rapprochable, Actif, Parent}, where the first four are
//! required. The exporter's longer column names are accepted as
//! aliases, so an exported chart imports unchanged. Every accepted row
//! passes the SYSCOHADA account rules before it appears in the result.
//! Parents are resolved by code against the rows of the same file.

use std::collections::HashMap;
use std::io::{Read, Write};

use balafon_core::chart::{AccountClass, AccountType, AccountValidator, ChartAccount};
use balafon_shared::types::AccountId;
use csv::StringRecord;

use crate::error::{ExportError, ImportError};

/// Export column order.
const EXPORT_HEADER: &[&str] = &[
    "Code",
    "Classe",
    "Type Compte",
    "Nom Compte",
    "Compte Auxiliaire",
    "Compte Rapprochable",
    "Statut",
    "Compte Parent",
    "Description",
];

/// Outcome of a chart import.
///
/// Row failures never abort the file: rejected rows land in `errors`
/// while every clean row still produces an account.
#[derive(Debug, Clone)]
pub struct ChartImport {
    /// Accounts accepted after validation, in file order.
    pub accounts: Vec<ChartAccount>,
    /// Errors for the rejected rows.
    pub errors: Vec<ImportError>,
}

impl ChartImport {
    /// Returns true when every row was accepted.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Column indexes resolved from the header row.
struct Columns {
    code: usize,
    class: usize,
    account_type: usize,
    name: usize,
    description: Option<usize>,
    auxiliary: Option<usize>,
    reconcilable: Option<usize>,
    active: Option<usize>,
    parent: Option<usize>,
}

impl Columns {
    fn resolve(headers: &StringRecord) -> Result<Self, ImportError> {
        let find = |names: &[&str]| {
            headers.iter().position(|h| {
                let header = h.trim();
                names.iter().any(|name| header.eq_ignore_ascii_case(name))
            })
        };
        let require = |name: &'static str, aliases: &[&str]| {
            find(aliases).ok_or_else(|| ImportError::MissingColumn(name.to_string()))
        };

        Ok(Self {
            code: require("Code", &["Code"])?,
            class: require("Classe", &["Classe"])?,
            account_type: require("Type", &["Type", "Type Compte"])?,
            name: require("Nom", &["Nom", "Nom Compte"])?,
            description: find(&["Description"]),
            auxiliary: find(&["Auxiliaire", "Compte Auxiliaire"]),
            reconcilable: find(&["Rapprochable", "Compte Rapprochable"]),
            active: find(&["Actif", "Statut"]),
            parent: find(&["Parent", "Compte Parent"]),
        })
    }
}

/// One parsed data row, before parent linking.
struct ParsedRow {
    row: usize,
    code: String,
    class: AccountClass,
    account_type: AccountType,
    name: String,
    description: Option<String>,
    is_auxiliary: bool,
    is_reconcilable: bool,
    is_active: bool,
    parent_code: Option<String>,
}

/// Stateless CSV importer for the chart of accounts.
pub struct AccountCsvImporter;

impl AccountCsvImporter {
    /// Import a chart from CSV.
    ///
    /// # Errors
    ///
    /// Returns an error when the header row is unreadable or a
    /// required column is missing. Row-level failures are collected in
    /// the result instead.
    pub fn import(input: impl Read) -> Result<ChartImport, ImportError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(input);

        let headers = reader
            .headers()
            .map_err(|e| ImportError::Malformed(e.to_string()))?
            .clone();
        let columns = Columns::resolve(&headers)?;

        let mut rows = Vec::new();
        let mut errors = Vec::new();
        for (index, result) in reader.records().enumerate() {
            let row = index + 1;
            let record = match result {
                Ok(record) => record,
                Err(e) => {
                    errors.push(ImportError::Malformed(format!("row {row}: {e}")));
                    continue;
                }
            };
            match Self::parse_row(row, &record, &columns) {
                Ok(parsed) => rows.push(parsed),
                Err(e) => errors.push(e),
            }
        }

        let accounts = Self::link_and_validate(rows, &mut errors);
        Ok(ChartImport { accounts, errors })
    }

    fn parse_row(
        row: usize,
        record: &StringRecord,
        columns: &Columns,
    ) -> Result<ParsedRow, ImportError> {
        let field = |index: usize| record.get(index).unwrap_or("").trim();
        let optional = |index: Option<usize>| index.map(field).filter(|v| !v.is_empty());

        let code = field(columns.code);
        if code.is_empty() {
            return Err(ImportError::MissingField { row, field: "Code" });
        }
        let class_raw = field(columns.class);
        if class_raw.is_empty() {
            return Err(ImportError::MissingField {
                row,
                field: "Classe",
            });
        }
        let type_raw = field(columns.account_type);
        if type_raw.is_empty() {
            return Err(ImportError::MissingField { row, field: "Type" });
        }
        let name = field(columns.name);
        if name.is_empty() {
            return Err(ImportError::MissingField { row, field: "Nom" });
        }

        let class = class_raw
            .parse::<u8>()
            .ok()
            .and_then(AccountClass::from_digit)
            .ok_or_else(|| ImportError::InvalidField {
                row,
                field: "Classe",
                value: class_raw.to_string(),
            })?;
        let account_type =
            AccountType::parse(type_raw).ok_or_else(|| ImportError::InvalidField {
                row,
                field: "Type",
                value: type_raw.to_string(),
            })?;

        let is_auxiliary = parse_oui_non(row, "Auxiliaire", optional(columns.auxiliary), false)?;
        let is_reconcilable =
            parse_oui_non(row, "Rapprochable", optional(columns.reconcilable), false)?;
        let is_active = parse_oui_non(row, "Actif", optional(columns.active), true)?;

        Ok(ParsedRow {
            row,
            code: code.to_string(),
            class,
            account_type,
            name: name.to_string(),
            description: optional(columns.description).map(str::to_string),
            is_auxiliary,
            is_reconcilable,
            is_active,
            parent_code: optional(columns.parent).map(str::to_string),
        })
    }

    /// Links parents by code, then runs the account rules on each row.
    fn link_and_validate(rows: Vec<ParsedRow>, errors: &mut Vec<ImportError>) -> Vec<ChartAccount> {
        let with_ids: Vec<(ParsedRow, AccountId)> = rows
            .into_iter()
            .map(|parsed| (parsed, AccountId::new()))
            .collect();

        let mut id_by_code: HashMap<String, AccountId> = HashMap::new();
        for (parsed, id) in &with_ids {
            id_by_code.entry(parsed.code.clone()).or_insert(*id);
        }

        let mut accounts = Vec::with_capacity(with_ids.len());
        for (parsed, id) in with_ids {
            let parent_id = match &parsed.parent_code {
                Some(parent_code) => match id_by_code.get(parent_code) {
                    Some(parent_id) => Some(*parent_id),
                    None => {
                        errors.push(ImportError::InvalidField {
                            row: parsed.row,
                            field: "Parent",
                            value: parent_code.clone(),
                        });
                        continue;
                    }
                },
                None => None,
            };

            let level = u8::try_from(parsed.code.len().saturating_sub(1))
                .unwrap_or(u8::MAX)
                .max(1);
            let account = ChartAccount {
                id,
                code: parsed.code,
                class: parsed.class,
                account_type: parsed.account_type,
                name: parsed.name,
                description: parsed.description,
                parent_id,
                level,
                is_auxiliary: parsed.is_auxiliary,
                is_reconcilable: parsed.is_reconcilable,
                is_active: parsed.is_active,
            };

            let report = AccountValidator::validate(&account);
            if report.is_valid {
                accounts.push(account);
            } else {
                errors.push(ImportError::AccountRejected {
                    row: parsed.row,
                    violations: report.errors,
                });
            }
        }
        accounts
    }
}

/// Stateless CSV exporter for the chart of accounts.
pub struct AccountCsvExporter;

impl AccountCsvExporter {
    /// Export a chart to CSV with the French column set.
    ///
    /// # Errors
    ///
    /// Returns an error when writing fails.
    pub fn export(accounts: &[ChartAccount], output: impl Write) -> Result<(), ExportError> {
        let code_by_id: HashMap<AccountId, &str> = accounts
            .iter()
            .map(|a| (a.id, a.code.as_str()))
            .collect();

        let mut writer = csv::Writer::from_writer(output);
        writer.write_record(EXPORT_HEADER)?;
        for account in accounts {
            let class_digit = account.class.digit().to_string();
            let parent_code = account
                .parent_id
                .and_then(|id| code_by_id.get(&id).copied())
                .unwrap_or("");
            writer.write_record([
                account.code.as_str(),
                class_digit.as_str(),
                account.account_type.french_name(),
                account.name.as_str(),
                oui_non(account.is_auxiliary),
                oui_non(account.is_reconcilable),
                if account.is_active { "Actif" } else { "Inactif" },
                parent_code,
                account.description.as_deref().unwrap_or(""),
            ])?;
        }
        writer.flush()?;
        Ok(())
    }
}

fn oui_non(value: bool) -> &'static str {
    if value {
        "Oui"
    } else {
        "Non"
    }
}

fn parse_oui_non(
    row: usize,
    field: &'static str,
    value: Option<&str>,
    default: bool,
) -> Result<bool, ImportError> {
    let Some(value) = value else {
        return Ok(default);
    };
    match value.to_lowercase().as_str() {
        "oui" | "actif" => Ok(true),
        "non" | "inactif" => Ok(false),
        _ => Err(ImportError::InvalidField {
            row,
            field,
            value: value.to_string(),
        }),
    }
}
