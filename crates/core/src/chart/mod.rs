//! SYSCOHADA chart of accounts logic.
//!
//! This module implements the chart of accounts rule engine:
//! - Account classes, types and codes
//! - Static rule tables (class ranges, mandatory accounts, reference names)
//! - Single account validation
//! - Whole chart structure validation and child code generation
//! - Compliance scoring
//! - The standard reference chart

pub mod compliance;
pub mod error;
pub mod rules;
pub mod structure;
pub mod template;
pub mod types;
pub mod validate;

#[cfg(test)]
mod props;

pub use compliance::{ComplianceChecks, ComplianceReport, ComplianceScorer};
pub use error::ChartError;
pub use structure::{ChartIssue, ChartReport, ChartStructureValidator};
pub use template::standard_chart;
pub use types::{AccountClass, AccountType, ChartAccount};
pub use validate::{
    AccountReport, AccountRuleViolation, AccountSuggestion, AccountValidator, AccountWarning,
};
