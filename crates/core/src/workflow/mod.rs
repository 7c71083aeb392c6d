//! Entry workflow management for Balafon.
//!
//! This module implements the entry lifecycle state machine,
//! the approval threshold resolver and per-level approval records.
//!
//! # Modules
//!
//! - `types` - Workflow domain types (ApprovalStatus, ApprovalWorkflow, WorkflowAction)
//! - `error` - Workflow-specific error types
//! - `service` - State transition logic
//! - `approval` - Approval threshold resolution

pub mod approval;
pub mod error;
pub mod service;
pub mod types;

#[cfg(test)]
mod props;

pub use approval::{ApprovalPlan, ApprovalThresholdResolver, Threshold};
pub use error::WorkflowError;
pub use service::WorkflowService;
pub use types::{ApprovalStatus, ApprovalWorkflow, WorkflowAction};
