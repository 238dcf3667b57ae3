//! Domain error type shared by every layer.
//!
//! The API layer maps each variant onto an HTTP status in
//! `taskdesk_api::error::AppError`.

use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A task or deadline request does not exist (or is not visible to the caller).
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    /// Missing or malformed input.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// The target is no longer in a state that accepts the operation.
    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The caller is authenticated but does not control the task.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    pub fn not_found(entity: &'static str, id: DbId) -> Self {
        CoreError::NotFound { entity, id }
    }

    /// Raised when a deadline request has left the `pending` state.
    pub fn already_reviewed() -> Self {
        CoreError::Conflict("Request already reviewed".into())
    }
}
