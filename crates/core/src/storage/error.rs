use thiserror::Error;

/// Errors that can occur during repository operations.
///
/// `ConstraintViolation` covers the person-to-city foreign key in both
/// directions: an unknown city on a person write, and deleting a city that
/// still has residents.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("{entity_type} not found: {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },
    #[error("{entity_type} already exists: {id}")]
    AlreadyExists {
        entity_type: &'static str,
        id: String,
    },
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
    #[error("Query failed: {0}")]
    QueryFailed(String),
    #[error("Invalid data: {0}")]
    InvalidData(String),
    /// The write committed but cache invalidation for it failed.
    #[error("Invalidation failed after commit: {0}")]
    InvalidationFailed(String),
}

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, RepositoryError>;
