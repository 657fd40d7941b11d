mod error;
mod traits;
mod types;

pub use error::{HandlerError, PublishError};
pub use traits::EventHandler;
pub use types::{DomainEvent, EventKind};
