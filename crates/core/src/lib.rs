//! Core accounting rules for Balafon.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and calculations live here.
//!
//! # Modules
//!
//! - `chart` - SYSCOHADA chart-of-accounts validation and compliance
//! - `ledger` - Journal entry validation and balance checking
//! - `journal` - Journals and per-period closing rules
//! - `workflow` - Entry lifecycle and approval thresholds
//! - `fiscal` - Accounting period management

pub mod chart;
pub mod fiscal;
pub mod journal;
pub mod ledger;
pub mod workflow;
