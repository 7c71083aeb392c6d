//! Journal management for Balafon.
//!
//! Journals group entries by business function (sales, purchases,
//! bank, cash, general) and are closed per accounting period.
//!
//! # Modules
//!
//! - `types` - Journal domain types (JournalKind, Journal, JournalPeriod)
//! - `error` - Journal-specific error types
//! - `service` - Period closing rules and reference generation

pub mod error;
pub mod service;
pub mod types;

pub use error::JournalError;
pub use service::JournalCloseService;
pub use types::{Journal, JournalKind, JournalPeriod, JournalPeriodState};
