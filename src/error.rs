//! Error types for unocr library.

use std::io;
use thiserror::Error;

/// Result type alias for unocr operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while configuring or running normalization.
///
/// Normalization entry points never return these directly; a failed run
/// is reported as [`crate::Normalized::Degraded`] carrying the error.
#[derive(Error, Debug)]
pub enum Error {
    /// The input is not text (binary data, invalid UTF-8, non-string value).
    #[error("Input is not text: {0}")]
    InputType(String),

    /// A pipeline stage failed unexpectedly.
    #[error("Stage '{stage}' failed: {message}")]
    StageFailure {
        /// Name of the failing stage
        stage: String,
        /// Failure description
        message: String,
    },

    /// A pattern table entry failed to compile.
    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// A configuration value is invalid.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// JSON (configuration or collaborator payload) could not be parsed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error when reading configuration files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a stage failure error.
    pub fn stage(stage: impl Into<String>, message: impl Into<String>) -> Self {
        Error::StageFailure {
            stage: stage.into(),
            message: message.into(),
        }
    }

    /// Name of the failing stage, if this is a stage failure.
    pub fn stage_name(&self) -> Option<&str> {
        match self {
            Error::StageFailure { stage, .. } => Some(stage),
            _ => None,
        }
    }
}
