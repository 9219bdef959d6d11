//! Error types for the data grid.

use crate::value::Value;

/// Errors produced by grid state holders and configuration loading.
///
/// Most invalid-state operations return `None` or `false` instead of an
/// error. The exceptions are opening a second edit session, which would
/// otherwise drop unsaved work, and malformed configuration or input.
#[derive(Debug, thiserror::Error)]
pub enum GridError {
    /// An edit session is already open for another row.
    #[error("an edit session is already active for row {id}")]
    SessionActive { id: Value },

    /// The operation needs an open edit session.
    #[error("no edit session is active")]
    NoActiveSession,

    /// The selection mode name was not recognised.
    #[error("unknown selection mode '{0}', expected 'single' or 'multiple'")]
    InvalidMode(String),

    /// A row does not carry the configured identifier field.
    #[error("row is missing identifier field '{field}'")]
    MissingIdField { field: String },

    /// User input could not be converted to the field's type.
    #[error("invalid input for field '{field}': {message}")]
    InvalidInput { field: String, message: String },

    /// The grid configuration failed validation.
    #[error("invalid grid configuration: {0}")]
    Config(String),

    /// The configuration or row data was not valid JSON.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl GridError {
    /// Creates a new invalid input error.
    pub fn invalid_input(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Creates a new missing identifier error.
    pub fn missing_id(field: impl Into<String>) -> Self {
        Self::MissingIdField {
            field: field.into(),
        }
    }
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, GridError>;
