//! Cached repository decorators.
//!
//! This module provides decorator implementations that wrap repository traits
//! with caching and event publication:
//!
//! - **Reads**: Check cache first, on miss fetch from repository and populate cache
//! - **Writes**: Persist to repository, then publish a domain event whose
//!   handlers invalidate the affected keys
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! let repo = Arc::new(SqliteRepository::new("cachemgmt.db").await?);
//! let cache = Arc::new(MemoryCache::new(10_000));
//! let bus = Arc::new(EventBus::default());
//!
//! let people = CachedPersonRepository::new(repo.clone(), cache, bus.clone(), Duration::from_secs(300));
//! let cities = EventedCityRepository::new(repo, bus);
//! ```

mod city;
mod person;

pub use city::EventedCityRepository;
pub use person::CachedPersonRepository;
