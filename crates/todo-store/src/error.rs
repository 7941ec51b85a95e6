//! Error types for the storage layer.

use thiserror::Error;
use todo_core::TodoId;

/// Result type alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur during write operations.
///
/// Reads never fail; a missing todo on a read is reported as `None`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// A required field was missing or empty.
    #[error("invalid input: {field} {reason}")]
    InvalidInput { field: &'static str, reason: String },

    /// The referenced todo does not exist.
    #[error("todo not found: {0}")]
    NotFound(TodoId),
}

impl StoreError {
    /// Shorthand for an empty required field.
    pub(crate) fn empty_field(field: &'static str) -> Self {
        Self::InvalidInput {
            field,
            reason: "must not be empty".to_string(),
        }
    }
}
