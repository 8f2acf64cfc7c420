//! Domain-level error types.

use thiserror::Error;

use crate::ports::AuthError;

/// A uniqueness or referential rule rejected by the storage layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConstraintViolation {
    #[error("email already registered")]
    EmailTaken,

    #[error("a post with this title already exists")]
    TitleTaken,

    #[error("referenced row does not exist")]
    MissingReference,
}

/// Domain errors - business logic failures.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound { entity_type: &'static str, id: i32 },

    #[error("Constraint violation: {0}")]
    Constraint(ConstraintViolation),

    #[error(transparent)]
    Auth(#[from] AuthError),

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
    Constraint(ConstraintViolation),
}

impl From<RepoError> for DomainError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::Constraint(violation) => DomainError::Constraint(violation),
            RepoError::NotFound => DomainError::Internal("row vanished mid-request".to_string()),
            RepoError::Connection(msg) | RepoError::Query(msg) => DomainError::Internal(msg),
        }
    }
}
