use thiserror::Error;

use crate::cache::CacheError;
use crate::storage::RepositoryError;

/// Errors raised by an event handler while reacting to a domain event.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HandlerError {
    #[error("Store read failed during event handling: {0}")]
    Store(#[from] RepositoryError),
    #[error("Cache operation failed during event handling: {0}")]
    Cache(#[from] CacheError),
}

/// Error returned by the event bus when a handler failure is propagated.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Handler '{handler}' failed on {event}: {source}")]
pub struct PublishError {
    pub handler: &'static str,
    pub event: String,
    #[source]
    pub source: HandlerError,
}

impl From<PublishError> for RepositoryError {
    fn from(err: PublishError) -> Self {
        RepositoryError::InvalidationFailed(err.to_string())
    }
}
