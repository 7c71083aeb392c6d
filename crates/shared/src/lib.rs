//! Shared types and configuration for Balafon.
//!
//! This crate provides common types used across all other crates:
//! - Typed IDs for type-safe entity references
//! - FCFA amount formatting with decimal precision
//! - Pagination types for list operations
//! - Configuration management

pub mod config;
pub mod types;

pub use config::AppConfig;
