//! Error types for simulator construction.
//!
//! A built simulator does not error: `step` absorbs degenerate `dt` and
//! numeric edge cases. Everything here can only surface while the
//! simulator is being constructed from a configuration.

use thiserror::Error;

/// Result type for simulator operations.
pub type SimResult<T> = Result<T, SimError>;

/// Errors that can occur while building a simulator.
#[derive(Debug, Error)]
pub enum SimError {
    /// Process model tag not in the dispatch table.
    #[error("Unknown process model: {name}")]
    UnknownModel { name: String },

    /// Channel name not present in the simulator.
    #[error("Unknown channel: {name}")]
    UnknownChannel { name: String },

    /// Model parameter outside its valid domain.
    #[error("Invalid parameter: {what}")]
    InvalidParameter { what: &'static str },

    /// Control block rejected its configuration.
    #[error("Control block error: {0}")]
    Control(#[from] pl_controls::ControlError),

    /// Configuration failed to load or validate.
    #[error("Project error: {0}")]
    Project(#[from] pl_project::ProjectError),
}

impl From<pl_project::ValidationError> for SimError {
    fn from(err: pl_project::ValidationError) -> Self {
        Self::Project(err.into())
    }
}
