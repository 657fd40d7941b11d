//! Cache invalidation handlers.
//!
//! Both handlers turn a domain event into key removals using the pure plan
//! from `cachemgmt_core::cache::invalidation_keys`. Every planned key is
//! attempted even when an earlier removal fails; the first failure is then
//! reported to the bus.

use std::sync::Arc;

use async_trait::async_trait;

use cachemgmt_core::cache::{
    invalidation_keys, requires_cascade, Cache, CacheError, PERSON_KEY_PATTERN,
};
use cachemgmt_core::events::{DomainEvent, EventHandler, HandlerError};
use cachemgmt_core::storage::PersonRepository;

/// Removes every key in `keys`, returning the first failure after trying all.
async fn remove_keys<C: Cache>(cache: &C, keys: &[String]) -> Result<(), CacheError> {
    let mut first_error = None;

    for key in keys {
        if let Err(err) = cache.delete(key).await {
            tracing::warn!(key = %key, error = %err, "Failed to invalidate cache key");
            first_error.get_or_insert(err);
        }
    }

    match first_error {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

/// Invalidates cached person projections on person events.
pub struct PeopleCacheInvalidator<C>
where
    C: Cache,
{
    cache: Arc<C>,
}

impl<C> PeopleCacheInvalidator<C>
where
    C: Cache,
{
    pub fn new(cache: Arc<C>) -> Self {
        Self { cache }
    }
}

#[async_trait]
impl<C> EventHandler for PeopleCacheInvalidator<C>
where
    C: Cache + 'static,
{
    fn name(&self) -> &'static str {
        "people-cache-invalidator"
    }

    fn handles(&self, event: &DomainEvent) -> bool {
        event.is_person_event()
    }

    async fn handle(&self, event: &DomainEvent) -> Result<(), HandlerError> {
        let keys = invalidation_keys(event, &[]);
        remove_keys(self.cache.as_ref(), &keys).await?;

        tracing::debug!(
            event = %event.kind(),
            person_id = %event.id(),
            keys = ?keys,
            "Invalidated person cache"
        );
        Ok(())
    }
}

/// Invalidates city keys on city events, cascading to the cached
/// projections of every person living in an updated city.
///
/// Person projections embed the city name, and the cache keeps no link from
/// a city to the entries it contributed to, so the affected people are
/// re-derived from the store at invalidation time.
pub struct CityCacheInvalidator<C, R>
where
    C: Cache,
    R: PersonRepository,
{
    cache: Arc<C>,
    people: Arc<R>,
}

impl<C, R> CityCacheInvalidator<C, R>
where
    C: Cache,
    R: PersonRepository,
{
    pub fn new(cache: Arc<C>, people: Arc<R>) -> Self {
        Self { cache, people }
    }
}

#[async_trait]
impl<C, R> EventHandler for CityCacheInvalidator<C, R>
where
    C: Cache + 'static,
    R: PersonRepository + 'static,
{
    fn name(&self) -> &'static str {
        "city-cache-invalidator"
    }

    fn handles(&self, event: &DomainEvent) -> bool {
        event.is_city_event()
    }

    async fn handle(&self, event: &DomainEvent) -> Result<(), HandlerError> {
        if !requires_cascade(event) {
            let keys = invalidation_keys(event, &[]);
            remove_keys(self.cache.as_ref(), &keys).await?;
            return Ok(());
        }

        let city_id = event.id();
        match self.people.list_person_ids_by_city(city_id).await {
            Ok(residents) => {
                let keys = invalidation_keys(event, &residents);
                remove_keys(self.cache.as_ref(), &keys).await?;

                tracing::debug!(
                    city_id = %city_id,
                    residents = residents.len(),
                    "Invalidated city cache and resident projections"
                );
                Ok(())
            }
            Err(store_err) => {
                // Without the resident list, drop every person projection.
                tracing::warn!(
                    city_id = %city_id,
                    error = %store_err,
                    "Resident lookup failed; invalidating all person entries"
                );

                let pattern_result = self.cache.delete_pattern(PERSON_KEY_PATTERN).await;
                let keys = invalidation_keys(event, &[]);
                remove_keys(self.cache.as_ref(), &keys).await?;
                pattern_result?;

                Err(HandlerError::Store(store_err))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::time::Duration;

    use tokio::sync::RwLock;
    use uuid::Uuid;

    use cachemgmt_core::cache::{city_key, people_key, person_key, Result as CacheResult};
    use cachemgmt_core::directory::{Person, PersonView};
    use cachemgmt_core::storage::{RepositoryError, Result};

    use crate::cache::MemoryCache;

    // Mock person repository that only answers the resident lookup
    #[derive(Default)]
    struct MockPersonRepository {
        residents: RwLock<HashMap<Uuid, Vec<Uuid>>>,
        fail_lookup: AtomicBool,
        lookup_calls: AtomicUsize,
    }

    #[async_trait]
    impl PersonRepository for MockPersonRepository {
        async fn get_person(&self, _id: Uuid) -> Result<Option<Person>> {
            Ok(None)
        }

        async fn get_person_view(&self, _id: Uuid) -> Result<Option<PersonView>> {
            Ok(None)
        }

        async fn list_person_views(&self) -> Result<Vec<PersonView>> {
            Ok(Vec::new())
        }

        async fn list_person_ids_by_city(&self, city_id: Uuid) -> Result<Vec<Uuid>> {
            self.lookup_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_lookup.load(Ordering::SeqCst) {
                return Err(RepositoryError::ConnectionFailed("db down".to_string()));
            }
            Ok(self
                .residents
                .read()
                .await
                .get(&city_id)
                .cloned()
                .unwrap_or_default())
        }

        async fn create_person(&self, _person: &Person) -> Result<()> {
            Ok(())
        }

        async fn update_person(&self, _person: &Person) -> Result<()> {
            Ok(())
        }

        async fn delete_person(&self, _id: Uuid) -> Result<u64> {
            Ok(0)
        }
    }

    // Cache whose deletes of one key always fail
    struct FlakyCache {
        inner: MemoryCache,
        broken_key: String,
    }

    #[async_trait]
    impl Cache for FlakyCache {
        async fn get(&self, key: &str) -> CacheResult<Option<Vec<u8>>> {
            self.inner.get(key).await
        }

        async fn set(&self, key: &str, value: &[u8], ttl: Option<Duration>) -> CacheResult<()> {
            self.inner.set(key, value, ttl).await
        }

        async fn delete(&self, key: &str) -> CacheResult<()> {
            if key == self.broken_key {
                return Err(CacheError::OperationFailed("stuck".to_string()));
            }
            self.inner.delete(key).await
        }

        async fn delete_pattern(&self, pattern: &str) -> CacheResult<()> {
            self.inner.delete_pattern(pattern).await
        }
    }

    async fn seed(cache: &impl Cache, keys: &[String]) {
        for key in keys {
            cache.set(key, b"cached", None).await.unwrap();
        }
    }

    async fn is_cached(cache: &impl Cache, key: &str) -> bool {
        cache.get(key).await.unwrap().is_some()
    }

    #[tokio::test]
    async fn test_person_created_drops_list() {
        let cache = Arc::new(MemoryCache::new(100));
        let homer = Uuid::new_v4();
        seed(cache.as_ref(), &[people_key().to_string(), person_key(homer)]).await;

        let handler = PeopleCacheInvalidator::new(cache.clone());
        handler
            .handle(&DomainEvent::PersonCreated { id: Uuid::new_v4() })
            .await
            .unwrap();

        assert!(!is_cached(cache.as_ref(), people_key()).await);
        assert!(is_cached(cache.as_ref(), &person_key(homer)).await);
    }

    #[tokio::test]
    async fn test_person_updated_and_deleted_drop_entry_and_list() {
        let cache = Arc::new(MemoryCache::new(100));
        let handler = PeopleCacheInvalidator::new(cache.clone());
        let homer = Uuid::new_v4();
        let marge = Uuid::new_v4();

        for event in [
            DomainEvent::PersonUpdated { id: homer },
            DomainEvent::PersonDeleted { id: homer },
        ] {
            seed(
                cache.as_ref(),
                &[people_key().to_string(), person_key(homer), person_key(marge)],
            )
            .await;

            handler.handle(&event).await.unwrap();

            assert!(!is_cached(cache.as_ref(), people_key()).await);
            assert!(!is_cached(cache.as_ref(), &person_key(homer)).await);
            assert!(is_cached(cache.as_ref(), &person_key(marge)).await);
        }
    }

    #[tokio::test]
    async fn test_people_invalidator_ignores_city_events() {
        let handler = PeopleCacheInvalidator::new(Arc::new(MemoryCache::new(10)));
        assert!(!handler.handles(&DomainEvent::CityUpdated { id: Uuid::new_v4() }));
        assert!(handler.handles(&DomainEvent::PersonDeleted { id: Uuid::new_v4() }));
    }

    #[tokio::test]
    async fn test_city_updated_cascades_to_residents() {
        let cache = Arc::new(MemoryCache::new(100));
        let repo = Arc::new(MockPersonRepository::default());
        let springfield = Uuid::new_v4();
        let residents: Vec<Uuid> = (0..3).map(|_| Uuid::new_v4()).collect();
        let outsider = Uuid::new_v4();
        repo.residents
            .write()
            .await
            .insert(springfield, residents.clone());

        let mut keys: Vec<String> = residents.iter().copied().map(person_key).collect();
        keys.extend([
            person_key(outsider),
            people_key().to_string(),
            city_key(springfield),
            "Cities".to_string(),
        ]);
        seed(cache.as_ref(), &keys).await;

        let handler = CityCacheInvalidator::new(cache.clone(), repo.clone());
        handler
            .handle(&DomainEvent::CityUpdated { id: springfield })
            .await
            .unwrap();

        for resident in &residents {
            assert!(!is_cached(cache.as_ref(), &person_key(*resident)).await);
        }
        assert!(!is_cached(cache.as_ref(), people_key()).await);
        assert!(!is_cached(cache.as_ref(), &city_key(springfield)).await);
        assert!(!is_cached(cache.as_ref(), "Cities").await);
        assert!(is_cached(cache.as_ref(), &person_key(outsider)).await);
        assert_eq!(repo.lookup_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_city_created_and_deleted_skip_store_lookup() {
        let cache = Arc::new(MemoryCache::new(100));
        let repo = Arc::new(MockPersonRepository::default());
        seed(cache.as_ref(), &[people_key().to_string()]).await;

        let handler = CityCacheInvalidator::new(cache.clone(), repo.clone());
        let id = Uuid::new_v4();
        handler
            .handle(&DomainEvent::CityCreated { id })
            .await
            .unwrap();
        handler
            .handle(&DomainEvent::CityDeleted { id })
            .await
            .unwrap();

        assert_eq!(repo.lookup_calls.load(Ordering::SeqCst), 0);
        assert!(is_cached(cache.as_ref(), people_key()).await);
    }

    #[tokio::test]
    async fn test_city_lookup_failure_drops_all_person_entries() {
        let cache = Arc::new(MemoryCache::new(100));
        let repo = Arc::new(MockPersonRepository::default());
        repo.fail_lookup.store(true, Ordering::SeqCst);
        let springfield = Uuid::new_v4();
        let homer = Uuid::new_v4();
        let elsewhere = Uuid::new_v4();
        seed(
            cache.as_ref(),
            &[
                person_key(homer),
                person_key(elsewhere),
                people_key().to_string(),
                city_key(springfield),
            ],
        )
        .await;

        let handler = CityCacheInvalidator::new(cache.clone(), repo);
        let err = handler
            .handle(&DomainEvent::CityUpdated { id: springfield })
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            HandlerError::Store(RepositoryError::ConnectionFailed(_))
        ));
        assert!(!is_cached(cache.as_ref(), &person_key(homer)).await);
        assert!(!is_cached(cache.as_ref(), &person_key(elsewhere)).await);
        assert!(!is_cached(cache.as_ref(), people_key()).await);
        assert!(!is_cached(cache.as_ref(), &city_key(springfield)).await);
    }

    #[tokio::test]
    async fn test_cache_failure_still_attempts_remaining_keys() {
        let homer = Uuid::new_v4();
        let cache = Arc::new(FlakyCache {
            inner: MemoryCache::new(100),
            broken_key: person_key(homer),
        });
        seed(cache.as_ref(), &[people_key().to_string()]).await;

        let handler = PeopleCacheInvalidator::new(cache.clone());
        let err = handler
            .handle(&DomainEvent::PersonUpdated { id: homer })
            .await
            .unwrap_err();

        assert!(matches!(err, HandlerError::Cache(_)));
        assert!(!is_cached(cache.as_ref(), people_key()).await);
    }
}
