//! Synchronous in-process event bus.
//!
//! Handlers are invoked one at a time, in registration order, and `publish`
//! only returns once every interested handler has finished. A write that
//! awaits `publish` therefore acknowledges only after invalidation is done.

use std::sync::Arc;

use cachemgmt_core::events::{DomainEvent, EventHandler, PublishError};

use crate::config::FailurePolicy;

/// Ordered list of event handlers with a failure policy.
#[derive(Clone, Default)]
pub struct EventBus {
    handlers: Vec<Arc<dyn EventHandler>>,
    policy: FailurePolicy,
}

impl EventBus {
    /// Creates an empty bus with the given failure policy.
    pub fn new(policy: FailurePolicy) -> Self {
        Self {
            handlers: Vec::new(),
            policy,
        }
    }

    /// Appends a handler. Handlers run in the order they were registered.
    pub fn register(mut self, handler: Arc<dyn EventHandler>) -> Self {
        tracing::debug!(handler = handler.name(), "Registered event handler");
        self.handlers.push(handler);
        self
    }

    pub fn policy(&self) -> FailurePolicy {
        self.policy
    }

    /// Delivers `event` to every handler that accepts it.
    ///
    /// Under [`FailurePolicy::Isolate`] a failing handler is logged and
    /// skipped, and this always returns `Ok`. Under
    /// [`FailurePolicy::Propagate`] dispatch stops at the first failure,
    /// which is returned to the publisher.
    pub async fn publish(&self, event: &DomainEvent) -> Result<(), PublishError> {
        for handler in self.handlers.iter().filter(|h| h.handles(event)) {
            let Err(source) = handler.handle(event).await else {
                continue;
            };

            match self.policy {
                FailurePolicy::Isolate => {
                    tracing::error!(
                        handler = handler.name(),
                        event = %event.kind(),
                        id = %event.id(),
                        error = %source,
                        "Event handler failed; continuing"
                    );
                }
                FailurePolicy::Propagate => {
                    return Err(PublishError {
                        handler: handler.name(),
                        event: event.kind().to_string(),
                        source,
                    });
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use uuid::Uuid;

    use cachemgmt_core::cache::CacheError;
    use cachemgmt_core::events::HandlerError;

    /// Handler that appends its name to a shared journal.
    struct Recorder {
        name: &'static str,
        journal: Arc<Mutex<Vec<&'static str>>>,
        fail: bool,
        person_only: bool,
    }

    impl Recorder {
        fn new(name: &'static str, journal: &Arc<Mutex<Vec<&'static str>>>) -> Self {
            Self {
                name,
                journal: journal.clone(),
                fail: false,
                person_only: false,
            }
        }

        fn failing(mut self) -> Self {
            self.fail = true;
            self
        }

        fn person_only(mut self) -> Self {
            self.person_only = true;
            self
        }
    }

    #[async_trait]
    impl EventHandler for Recorder {
        fn name(&self) -> &'static str {
            self.name
        }

        fn handles(&self, event: &DomainEvent) -> bool {
            !self.person_only || event.is_person_event()
        }

        async fn handle(&self, _event: &DomainEvent) -> Result<(), HandlerError> {
            // Yield so that out-of-order completion would show up in the journal.
            tokio::task::yield_now().await;
            self.journal.lock().unwrap().push(self.name);
            if self.fail {
                return Err(HandlerError::Cache(CacheError::OperationFailed(
                    "boom".to_string(),
                )));
            }
            Ok(())
        }
    }

    fn person_created() -> DomainEvent {
        DomainEvent::PersonCreated { id: Uuid::new_v4() }
    }

    #[tokio::test]
    async fn test_handlers_run_in_registration_order() {
        let journal = Arc::new(Mutex::new(Vec::new()));
        let bus = EventBus::new(FailurePolicy::Isolate)
            .register(Arc::new(Recorder::new("first", &journal)))
            .register(Arc::new(Recorder::new("second", &journal)))
            .register(Arc::new(Recorder::new("third", &journal)));

        bus.publish(&person_created()).await.unwrap();

        assert_eq!(*journal.lock().unwrap(), vec!["first", "second", "third"]);
    }

    #[tokio::test]
    async fn test_uninterested_handlers_are_skipped() {
        let journal = Arc::new(Mutex::new(Vec::new()));
        let bus = EventBus::new(FailurePolicy::Isolate)
            .register(Arc::new(Recorder::new("people", &journal).person_only()))
            .register(Arc::new(Recorder::new("all", &journal)));

        bus.publish(&DomainEvent::CityUpdated { id: Uuid::new_v4() })
            .await
            .unwrap();

        assert_eq!(*journal.lock().unwrap(), vec!["all"]);
    }

    #[tokio::test]
    async fn test_isolate_continues_after_failure() {
        let journal = Arc::new(Mutex::new(Vec::new()));
        let bus = EventBus::new(FailurePolicy::Isolate)
            .register(Arc::new(Recorder::new("broken", &journal).failing()))
            .register(Arc::new(Recorder::new("after", &journal)));

        let result = bus.publish(&person_created()).await;

        assert!(result.is_ok());
        assert_eq!(*journal.lock().unwrap(), vec!["broken", "after"]);
    }

    #[tokio::test]
    async fn test_propagate_stops_at_first_failure() {
        let journal = Arc::new(Mutex::new(Vec::new()));
        let bus = EventBus::new(FailurePolicy::Propagate)
            .register(Arc::new(Recorder::new("broken", &journal).failing()))
            .register(Arc::new(Recorder::new("after", &journal)));

        let err = bus.publish(&person_created()).await.unwrap_err();

        assert_eq!(err.handler, "broken");
        assert_eq!(err.event, "PersonCreated");
        assert_eq!(*journal.lock().unwrap(), vec!["broken"]);
    }

    #[tokio::test]
    async fn test_empty_bus_publishes() {
        let bus = EventBus::default();
        assert_eq!(bus.policy(), FailurePolicy::Isolate);
        assert!(bus.publish(&person_created()).await.is_ok());
    }
}
