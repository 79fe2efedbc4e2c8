//! # Error Types
//!
//! Structured error types for quote_core. The calculator and assembler
//! themselves never fail on precondition-satisfying input; these errors
//! cover input validation, persistence, and rendering.
//!
//! ## Example
//!
//! ```rust
//! use quote_core::errors::{QuoteError, QuoteResult};
//!
//! fn validate_efficiency(eff: f64) -> QuoteResult<()> {
//!     if eff <= 0.0 || eff > 1.0 {
//!         return Err(QuoteError::invalid_input(
//!             "efficiency",
//!             eff.to_string(),
//!             "Efficiency must be in (0, 1]",
//!         ));
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for quote_core operations
pub type QuoteResult<T> = Result<T, QuoteError>;

/// Structured error type for quote operations.
///
/// Each variant carries enough context for the caller to report the
/// failure without re-deriving what went wrong.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum QuoteError {
    /// An input value is invalid (out of range, wrong type, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A required field is missing
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// No business profile has been configured yet
    #[error("No business profile configured - run setup first")]
    ProfileNotConfigured,

    /// A job id was not found in the job store
    #[error("Job not found: {id}")]
    JobNotFound { id: String },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Schema version mismatch in a persisted file
    #[error("Version mismatch: file version {file_version}, expected {expected_version}")]
    VersionMismatch {
        file_version: String,
        expected_version: String,
    },

    /// PDF rendering failed
    #[error("Render error: {message}")]
    Render { message: String },
}

impl QuoteError {
    /// Create an InvalidInput error
    pub fn invalid_input(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        QuoteError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a MissingField error
    pub fn missing_field(field: impl Into<String>) -> Self {
        QuoteError::MissingField {
            field: field.into(),
        }
    }

    /// Create a JobNotFound error
    pub fn job_not_found(id: impl Into<String>) -> Self {
        QuoteError::JobNotFound { id: id.into() }
    }

    /// Create a FileError
    pub fn file_error(
        operation: impl Into<String>,
        path: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        QuoteError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a Render error
    pub fn render(message: impl Into<String>) -> Self {
        QuoteError::Render {
            message: message.into(),
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            QuoteError::InvalidInput { .. } => "INVALID_INPUT",
            QuoteError::MissingField { .. } => "MISSING_FIELD",
            QuoteError::ProfileNotConfigured => "PROFILE_NOT_CONFIGURED",
            QuoteError::JobNotFound { .. } => "JOB_NOT_FOUND",
            QuoteError::FileError { .. } => "FILE_ERROR",
            QuoteError::SerializationError { .. } => "SERIALIZATION_ERROR",
            QuoteError::VersionMismatch { .. } => "VERSION_MISMATCH",
            QuoteError::Render { .. } => "RENDER_ERROR",
        }
    }
}
