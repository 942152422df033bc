//! Error types for restyle-ir
//!
//! Provides unified error handling for the parts of the crate that can fail
//! outside of the lowering bail path (expression parsing, configuration I/O).
//! A lowering bail is not an error of this kind: see
//! [`crate::features::lowering::domain::Bail`].

use thiserror::Error;

/// Main error type for restyle-ir operations
#[derive(Debug, Error)]
pub enum RestyleError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Slot expression or resolver output could not be parsed
    #[error("Parse error: {0}")]
    Parse(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON (de)serialization of the IR failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Internal invariant violated (bug)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl RestyleError {
    /// Create a parse error
    pub fn parse(msg: impl Into<String>) -> Self {
        RestyleError::Parse(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        RestyleError::Config(msg.into())
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        RestyleError::Internal(msg.into())
    }
}

/// Result type alias for restyle operations
pub type Result<T> = std::result::Result<T, RestyleError>;
