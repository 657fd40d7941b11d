use async_trait::async_trait;

use cachemgmt_core::events::{DomainEvent, EventHandler, HandlerError};

/// Traces every published event at debug level.
#[derive(Debug, Default)]
pub struct EventLogger;

#[async_trait]
impl EventHandler for EventLogger {
    fn name(&self) -> &'static str {
        "event-logger"
    }

    fn handles(&self, _event: &DomainEvent) -> bool {
        true
    }

    async fn handle(&self, event: &DomainEvent) -> Result<(), HandlerError> {
        tracing::debug!(event = %event.kind(), id = %event.id(), "Domain event published");
        Ok(())
    }
}
