//! CSV import and export for Balafon.
//!
//! Charts of accounts and journal entry batches move in and out of the
//! system as CSV files with French column names. Importers collect
//! row-level errors instead of stopping at the first bad row, so a
//! whole file can be reviewed in one pass.
//!
//! # Modules
//!
//! - `accounts` - Chart of accounts import and export
//! - `entries` - Journal entry batch import
//! - `error` - Import and export error types

pub mod accounts;
pub mod entries;
pub mod error;

pub use accounts::{AccountCsvExporter, AccountCsvImporter, ChartImport};
pub use entries::{EntryCsvImporter, EntryImport};
pub use error::{ExportError, ImportError};
