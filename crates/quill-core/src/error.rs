//! Domain-level error types.

use thiserror::Error;

/// Domain errors - business logic failures.
///
/// `Validation` and `Duplicate` carry the message shown to the user as a
/// flash notice; the other variants map to HTTP statuses.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("{entity_type} id {id} doesn't exist.")]
    NotFound { entity_type: &'static str, id: i32 },

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Duplicate(String),

    #[error("Forbidden")]
    Forbidden,

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("Entity not found")]
    NotFound,

    #[error("Constraint violation: {0}")]
    Constraint(String),
}

impl From<RepoError> for DomainError {
    fn from(err: RepoError) -> Self {
        DomainError::Internal(err.to_string())
    }
}
