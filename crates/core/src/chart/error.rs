//! Chart of accounts error types.

use thiserror::Error;

/// Errors raised by chart operations that cannot be expressed as a
/// validation report, such as child code generation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChartError {
    /// The parent code is not a well-formed account code.
    #[error("Parent code {0} is not a valid account code")]
    InvalidParentCode(String),

    /// The parent code already has the maximum 6 digits.
    #[error("Cannot create a sub-account under {0}: codes are limited to 6 digits")]
    MaxDepthReached(String),

    /// All nine one-digit child suffixes are already taken.
    #[error("All child codes 1-9 under {0} are already in use")]
    ChildCodesExhausted(String),
}

impl ChartError {
    /// Returns the error code for reporting.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidParentCode(_) => "INVALID_PARENT_CODE",
            Self::MaxDepthReached(_) => "MAX_DEPTH_REACHED",
            Self::ChildCodesExhausted(_) => "CHILD_CODES_EXHAUSTED",
        }
    }
}
