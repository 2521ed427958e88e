//! Error types for control block operations.

use thiserror::Error;

/// Result type for control block operations.
pub type ControlResult<T> = Result<T, ControlError>;

/// Errors that can occur when building or tuning control blocks.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ControlError {
    /// Invalid argument provided to a control block constructor.
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },
}
