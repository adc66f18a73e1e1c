//! Custom error types for Pennywise
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions. The warning classifier and the calculator
//! never produce these; they sit on the keystroke path and recover locally.

use thiserror::Error;

/// The main error type for Pennywise operations
#[derive(Error, Debug)]
pub enum PennywiseError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for data models and settings
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// No user is signed in
    #[error("Not signed in. Run 'pennywise login <user>' first")]
    NotSignedIn,

    /// TUI errors
    #[error("TUI error: {0}")]
    Tui(String),
}

impl PennywiseError {
    /// Create a "not found" error for transactions
    pub fn transaction_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Transaction",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for deleted transactions
    pub fn deleted_transaction_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Deleted transaction",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for transaction labels
    pub fn label_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Transaction label",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<std::io::Error> for PennywiseError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for PennywiseError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<crate::warning::ThresholdError> for PennywiseError {
    fn from(err: crate::warning::ThresholdError) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<crate::calculator::ExpressionError> for PennywiseError {
    fn from(err: crate::calculator::ExpressionError) -> Self {
        Self::Validation(err.to_string())
    }
}

/// Result type alias for Pennywise operations
pub type PennywiseResult<T> = Result<T, PennywiseError>;
