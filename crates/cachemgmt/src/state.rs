//! Application state with repository-based storage.
//!
//! This module defines the shared application state that is passed to all
//! request handlers. Handlers only see repository trait objects; the cache
//! and the event bus live behind them.

use std::sync::Arc;

use cachemgmt_core::storage::{CityRepository, PersonRepository};

use crate::cache::MemoryCache;
use crate::config::Config;
use crate::events::{CityCacheInvalidator, EventBus, EventLogger, PeopleCacheInvalidator};
use crate::storage::{CachedPersonRepository, EventedCityRepository};

/// Shared application state.
///
/// This is cloned for each request handler.
#[derive(Clone)]
pub struct AppState {
    /// Person repository (cached, wraps underlying storage).
    pub person_repo: Arc<dyn PersonRepository>,
    /// City repository (uncached reads, writes publish events).
    pub city_repo: Arc<dyn CityRepository>,
}

impl AppState {
    /// Wires the cache, the event bus and the decorators around `store`.
    ///
    /// The city invalidator reads from the undecorated store so that a
    /// cascade lookup never goes through the cache it is clearing.
    fn build<R>(store: Arc<R>, config: &Config) -> Self
    where
        R: CityRepository + PersonRepository + 'static,
    {
        let memory_cache = Arc::new(MemoryCache::new(config.cache_max_entries));

        let bus = Arc::new(
            EventBus::new(config.event_failure_policy)
                .register(Arc::new(EventLogger))
                .register(Arc::new(PeopleCacheInvalidator::new(memory_cache.clone())))
                .register(Arc::new(CityCacheInvalidator::new(
                    memory_cache.clone(),
                    store.clone(),
                ))),
        );

        tracing::info!(
            ttl_seconds = config.cache_ttl_seconds,
            max_entries = config.cache_max_entries,
            failure_policy = %bus.policy(),
            "Cache and event bus initialized"
        );

        let person_repo = Arc::new(CachedPersonRepository::new(
            store.clone(),
            memory_cache,
            bus.clone(),
            config.cache_ttl(),
        ));
        let city_repo = Arc::new(EventedCityRepository::new(store, bus));

        Self {
            person_repo,
            city_repo,
        }
    }
}

// ============================================================================
// Factory functions for the storage backends
// ============================================================================

#[cfg(feature = "sqlite")]
mod sqlite_memory {
    use super::*;
    use crate::storage::SqliteRepository;

    impl AppState {
        /// Creates AppState with SQLite storage and in-memory cache.
        pub async fn new(config: &Config) -> Result<Self, anyhow::Error> {
            let sqlite_repo = Arc::new(SqliteRepository::new(&config.sqlite_path).await?);
            tracing::info!(path = %config.sqlite_path, "Opened SQLite store");
            Ok(Self::build(sqlite_repo, config))
        }
    }
}

#[cfg(feature = "inmemory")]
mod inmemory_memory {
    use super::*;
    use crate::storage::InMemoryRepository;

    impl AppState {
        /// Creates AppState with in-memory storage and cache.
        /// Useful for local runs without any external dependencies.
        pub async fn new(config: &Config) -> Result<Self, anyhow::Error> {
            let inmemory_repo = Arc::new(InMemoryRepository::new());
            Ok(Self::build(inmemory_repo, config))
        }
    }
}

// ============================================================================
// Test support - provides Default implementation for unit tests
// ============================================================================
