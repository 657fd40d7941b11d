//! Domain event dispatch.
//!
//! Writes publish a `DomainEvent` on the [`EventBus`] after the store has
//! committed. The bus runs the registered handlers in order:
//!
//! 1. [`EventLogger`] traces the event.
//! 2. [`PeopleCacheInvalidator`] handles person events.
//! 3. [`CityCacheInvalidator`] handles city events, cascading to people.

mod bus;
mod invalidation;
mod logger;

pub use bus::EventBus;
pub use invalidation::{CityCacheInvalidator, PeopleCacheInvalidator};
pub use logger::EventLogger;
