//! Repositories and application services for Balafon.
//!
//! This crate connects the rule engine in `balafon-core` to a backing
//! store. Repository traits describe the persistence surface, the
//! in-memory implementations back the tests and the CLI tools, and the
//! services run every rule gate before a mutation is stored.
//!
//! # Modules
//!
//! - `repository` - Repository traits for each aggregate
//! - `memory` - In-memory repository implementations
//! - `chart` - Chart of accounts service
//! - `entries` - Journal entry lifecycle service
//! - `journals` - Journal and period closure service
//! - `error` - Store error types

pub mod chart;
pub mod entries;
pub mod error;
pub mod journals;
pub mod memory;
pub mod repository;

pub use chart::{AccountInput, ChartService};
pub use entries::EntryService;
pub use error::StoreError;
pub use journals::{JournalInput, JournalService};
pub use memory::{
    InMemoryAccountRepository, InMemoryEntryRepository, InMemoryJournalRepository,
    InMemoryPeriodRepository, InMemoryWorkflowRepository,
};
pub use repository::{
    AccountRepository, EntryRepository, JournalRepository, PeriodRepository, WorkflowRepository,
};
