//! Accounting period management.

pub mod period;

pub use period::{AccountingPeriod, PeriodStatus};
