use crate::types::DbId;

/// Domain-level error shared by every crate in the workspace.
///
/// The HTTP layer maps each variant onto a status code; nothing in here
/// knows about HTTP.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: DbId },

    /// A lookup by something other than a primary key came up empty
    /// (QR code, badge, current pregnancy).
    #[error("{0}")]
    Missing(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Shorthand for a validation error about a required field.
    pub fn required(field: &str) -> Self {
        CoreError::Validation(format!("Field '{field}' is required"))
    }
}
