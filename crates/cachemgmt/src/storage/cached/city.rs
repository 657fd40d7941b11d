//! Evented city repository decorator.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use cachemgmt_core::directory::City;
use cachemgmt_core::events::DomainEvent;
use cachemgmt_core::storage::{CityRepository, Result};

use crate::events::EventBus;

/// City repository decorator that publishes a domain event after every
/// committed write.
///
/// City reads are not cached, so they go straight to the underlying
/// repository. A rename still has to reach the cache: person projections
/// embed the city name, and the `CityUpdated` event is what clears them.
pub struct EventedCityRepository<R>
where
    R: CityRepository,
{
    repository: Arc<R>,
    bus: Arc<EventBus>,
}

impl<R> EventedCityRepository<R>
where
    R: CityRepository,
{
    pub fn new(repository: Arc<R>, bus: Arc<EventBus>) -> Self {
        Self { repository, bus }
    }
}

#[async_trait]
impl<R> CityRepository for EventedCityRepository<R>
where
    R: CityRepository + 'static,
{
    async fn get_city(&self, id: Uuid) -> Result<Option<City>> {
        self.repository.get_city(id).await
    }

    async fn list_cities(&self) -> Result<Vec<City>> {
        self.repository.list_cities().await
    }

    async fn create_city(&self, city: &City) -> Result<()> {
        self.repository.create_city(city).await?;

        self.bus
            .publish(&DomainEvent::CityCreated { id: city.id })
            .await?;

        tracing::debug!(city_id = %city.id, name = %city.name, "City created");
        Ok(())
    }

    async fn update_city(&self, city: &City) -> Result<()> {
        self.repository.update_city(city).await?;

        self.bus
            .publish(&DomainEvent::CityUpdated { id: city.id })
            .await?;

        tracing::debug!(city_id = %city.id, name = %city.name, "City updated");
        Ok(())
    }

    async fn delete_city(&self, id: Uuid) -> Result<u64> {
        let deleted = self.repository.delete_city(id).await?;

        if deleted > 0 {
            self.bus.publish(&DomainEvent::CityDeleted { id }).await?;
            tracing::debug!(city_id = %id, "City deleted");
        }

        Ok(deleted)
    }
}
