//! # Error Types
//!
//! Defines error types used across the CMS crates.

use thiserror::Error;

/// Errors returned by the hosted backend (tables, storage, auth).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The requested row does not exist.
    #[error("Record not found in {table}: {id}")]
    NotFound { table: String, id: String },

    /// The backend answered with an error status.
    #[error("Request rejected ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// Missing or expired credentials.
    #[error("Not authorized: {0}")]
    Unauthorized(String),

    /// The request never produced a response.
    #[error("Transport failure: {0}")]
    Transport(String),

    /// The response body could not be decoded into the expected row type.
    #[error("Malformed payload: {0}")]
    Decode(String),
}

impl StoreError {
    /// Build a `NotFound` error for a table and id.
    pub fn not_found(table: &str, id: impl ToString) -> Self {
        StoreError::NotFound {
            table: table.to_string(),
            id: id.to_string(),
        }
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Decode(err.to_string())
    }
}

/// A required field is missing or malformed. Raised before any network call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    /// Form field that failed.
    pub field: &'static str,
    /// Message shown to the user.
    pub message: String,
}

impl ValidationError {
    /// Create a validation error for a field.
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }

    /// The field is required but blank.
    pub fn required(field: &'static str) -> Self {
        Self::new(field, "is required")
    }
}
