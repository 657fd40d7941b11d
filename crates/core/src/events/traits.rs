use async_trait::async_trait;

use super::{DomainEvent, HandlerError};

/// A subscriber that reacts to domain events.
///
/// Handlers are invoked by the bus one after another, in registration order,
/// and the publisher waits for all of them before it returns.
#[async_trait]
pub trait EventHandler: Send + Sync {
    /// Short, stable name used in logs and errors.
    fn name(&self) -> &'static str;

    /// Returns true if this handler wants to see `event`.
    fn handles(&self, event: &DomainEvent) -> bool;

    /// Reacts to the event.
    async fn handle(&self, event: &DomainEvent) -> Result<(), HandlerError>;
}
