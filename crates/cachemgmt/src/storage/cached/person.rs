//! Cached person repository decorator.
//!
//! Wraps a `PersonRepository` implementation with cache-aside reads and
//! event-driven invalidation.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use uuid::Uuid;

use cachemgmt_core::cache::{
    deserialize_person_view, deserialize_person_views, people_key, person_key,
    serialize_person_view, serialize_person_views, Cache,
};
use cachemgmt_core::directory::{sort_person_views, Person, PersonView};
use cachemgmt_core::events::DomainEvent;
use cachemgmt_core::storage::{PersonRepository, Result};

use crate::events::EventBus;

/// Cached person repository decorator.
///
/// Implements the cache-aside pattern:
/// - **Reads**: Check cache first, on miss fetch from repository and populate cache
/// - **Writes**: Persist to repository, then publish a domain event
///
/// Writes never touch the cache directly. The invalidation handlers
/// registered on the bus remove the affected keys before `publish` returns,
/// so a write is acknowledged only once its stale entries are gone.
///
/// Misses that resolve to "not found" are not cached.
///
/// # Type Parameters
///
/// * `R` - The underlying repository implementation
/// * `C` - The cache implementation
pub struct CachedPersonRepository<R, C>
where
    R: PersonRepository,
    C: Cache,
{
    repository: Arc<R>,
    cache: Arc<C>,
    bus: Arc<EventBus>,
    ttl: Duration,
}

impl<R, C> CachedPersonRepository<R, C>
where
    R: PersonRepository,
    C: Cache,
{
    /// Creates a new cached person repository.
    ///
    /// # Arguments
    ///
    /// * `repository` - The underlying repository to cache
    /// * `cache` - The cache implementation
    /// * `bus` - Event bus notified after every committed write
    /// * `ttl` - Time-to-live for cached projections
    pub fn new(repository: Arc<R>, cache: Arc<C>, bus: Arc<EventBus>, ttl: Duration) -> Self {
        Self {
            repository,
            cache,
            bus,
            ttl,
        }
    }
}

#[async_trait]
impl<R, C> PersonRepository for CachedPersonRepository<R, C>
where
    R: PersonRepository + 'static,
    C: Cache + 'static,
{
    async fn get_person(&self, id: Uuid) -> Result<Option<Person>> {
        // Raw records are only read on the update path and are never cached
        self.repository.get_person(id).await
    }

    async fn get_person_view(&self, id: Uuid) -> Result<Option<PersonView>> {
        let cache_key = person_key(id);

        // Check cache first
        match self.cache.get(&cache_key).await {
            Ok(Some(bytes)) => {
                if let Ok(view) = deserialize_person_view(&bytes) {
                    tracing::trace!(person_id = %id, "Cache hit for person");
                    return Ok(Some(view));
                }
                // Deserialization failed - treat as cache miss
                tracing::warn!(person_id = %id, "Cache person deserialization failed");
            }
            Ok(None) => {}
            Err(err) => {
                tracing::warn!(person_id = %id, error = %err, "Cache read failed for person");
            }
        }

        // Cache miss - fetch from repository
        tracing::trace!(person_id = %id, "Cache miss for person");
        let view = self.repository.get_person_view(id).await?;

        // Populate cache on hit
        if let Some(ref v) = view {
            if let Ok(bytes) = serialize_person_view(v) {
                if let Err(err) = self.cache.set(&cache_key, &bytes, Some(self.ttl)).await {
                    tracing::warn!(person_id = %id, error = %err, "Failed to cache person");
                }
            }
        }

        Ok(view)
    }

    async fn list_person_views(&self) -> Result<Vec<PersonView>> {
        let cache_key = people_key();

        match self.cache.get(cache_key).await {
            Ok(Some(bytes)) => {
                if let Ok(views) = deserialize_person_views(&bytes) {
                    tracing::trace!(count = views.len(), "Cache hit for people");
                    return Ok(views);
                }
                tracing::warn!("Cache people deserialization failed");
            }
            Ok(None) => {}
            Err(err) => {
                tracing::warn!(error = %err, "Cache read failed for people");
            }
        }

        tracing::trace!("Cache miss for people");
        let mut views = self.repository.list_person_views().await?;
        sort_person_views(&mut views);

        if let Ok(bytes) = serialize_person_views(&views) {
            if let Err(err) = self.cache.set(cache_key, &bytes, Some(self.ttl)).await {
                tracing::warn!(error = %err, "Failed to cache people");
            }
        }

        Ok(views)
    }

    async fn list_person_ids_by_city(&self, city_id: Uuid) -> Result<Vec<Uuid>> {
        self.repository.list_person_ids_by_city(city_id).await
    }

    async fn create_person(&self, person: &Person) -> Result<()> {
        // 1. Persist to storage
        self.repository.create_person(person).await?;

        // 2. Invalidate via the bus (no cache population on create)
        self.bus
            .publish(&DomainEvent::PersonCreated { id: person.id })
            .await?;

        tracing::debug!(person_id = %person.id, first_name = %person.first_name, "Person created");
        Ok(())
    }

    async fn update_person(&self, person: &Person) -> Result<()> {
        self.repository.update_person(person).await?;

        self.bus
            .publish(&DomainEvent::PersonUpdated { id: person.id })
            .await?;

        tracing::debug!(person_id = %person.id, "Person updated");
        Ok(())
    }

    async fn delete_person(&self, id: Uuid) -> Result<u64> {
        let deleted = self.repository.delete_person(id).await?;

        if deleted > 0 {
            self.bus
                .publish(&DomainEvent::PersonDeleted { id })
                .await?;
            tracing::debug!(person_id = %id, "Person deleted");
        }

        Ok(deleted)
    }
}
