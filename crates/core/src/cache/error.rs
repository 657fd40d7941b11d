use thiserror::Error;

/// Errors that can occur during cache operations.
///
/// The in-process cache never produces these on its own; they exist so a
/// cache backend can report trouble and callers can degrade to the store.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// The backend could not be reached at all.
    #[error("Cache unavailable: {0}")]
    Unavailable(String),
    /// The backend was reached but the operation did not complete.
    #[error("Cache operation failed: {0}")]
    OperationFailed(String),
}

/// Result type for cache operations.
pub type Result<T> = std::result::Result<T, CacheError>;
