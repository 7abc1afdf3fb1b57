//! Error types for the Orthovar library.
//!
//! All fallible operations return [`OrthovarError`] through the crate-wide
//! [`Result`] alias. Classification that merely fails to find a single edited
//! span is not an error; it surfaces as `Ok(None)` from the template builder.
//!
//! # Examples
//!
//! ```
//! use orthovar::error::{OrthovarError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(OrthovarError::corpus("no words to compare"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

use crate::spelling::operation::EditOperation;

/// The main error type for Orthovar operations.
#[derive(Error, Debug)]
pub enum OrthovarError {
    /// I/O errors (corpus and edit map files, report output)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Corpus reading or vocabulary errors
    #[error("Corpus error: {0}")]
    Corpus(String),

    /// Unparsable input records
    #[error("Parse error: {0}")]
    Parse(String),

    /// An edit operation that does not fit the word pair it was recorded for
    #[error("Malformed operation {operation} for {source_word} -> {target_word}: {reason}")]
    MalformedOperation {
        source_word: String,
        target_word: String,
        operation: EditOperation,
        reason: String,
    },

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),

    /// Errors carrying context attached by the command layer
    #[error("{0:#}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with OrthovarError.
pub type Result<T> = std::result::Result<T, OrthovarError>;

impl OrthovarError {
    /// Create a new corpus error.
    pub fn corpus<S: Into<String>>(msg: S) -> Self {
        OrthovarError::Corpus(msg.into())
    }

    /// Create a new parse error.
    pub fn parse<S: Into<String>>(msg: S) -> Self {
        OrthovarError::Parse(msg.into())
    }

    /// Create a new malformed operation error.
    pub fn malformed_operation<S: Into<String>>(
        source_word: &str,
        target_word: &str,
        operation: EditOperation,
        reason: S,
    ) -> Self {
        OrthovarError::MalformedOperation {
            source_word: source_word.to_string(),
            target_word: target_word.to_string(),
            operation,
            reason: reason.into(),
        }
    }

    /// Create a new invalid config error.
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        OrthovarError::Other(format!("Invalid configuration: {}", msg.into()))
    }

    /// Create a new internal error.
    pub fn internal<S: Into<String>>(msg: S) -> Self {
        OrthovarError::Other(format!("Internal error: {}", msg.into()))
    }

    /// Whether this error describes a single bad operation record rather than
    /// a failure of the whole input.
    pub fn is_malformed_operation(&self) -> bool {
        matches!(self, OrthovarError::MalformedOperation { .. })
    }
}
