use async_trait::async_trait;
use uuid::Uuid;

use crate::directory::{City, Person, PersonView};

use super::Result;

/// Repository for city operations.
#[async_trait]
pub trait CityRepository: Send + Sync {
    /// Gets a city by its ID.
    async fn get_city(&self, id: Uuid) -> Result<Option<City>>;

    /// Gets all cities ordered by name.
    async fn list_cities(&self) -> Result<Vec<City>>;

    /// Creates a new city.
    async fn create_city(&self, city: &City) -> Result<()>;

    /// Updates an existing city.
    async fn update_city(&self, city: &City) -> Result<()>;

    /// Deletes the city with the given ID, returning the number of rows removed.
    ///
    /// Fails with `ConstraintViolation` while any person still references it.
    async fn delete_city(&self, id: Uuid) -> Result<u64>;
}

/// Repository for person operations.
#[async_trait]
pub trait PersonRepository: Send + Sync {
    /// Gets a person record by its ID.
    async fn get_person(&self, id: Uuid) -> Result<Option<Person>>;

    /// Gets the projection of a person, joined with its city in a single fetch.
    async fn get_person_view(&self, id: Uuid) -> Result<Option<PersonView>>;

    /// Gets the projections of all people, joined with their cities.
    ///
    /// Ordering is not guaranteed; callers sort.
    async fn list_person_views(&self) -> Result<Vec<PersonView>>;

    /// Gets the IDs of every person whose `city_id` equals `city_id`.
    async fn list_person_ids_by_city(&self, city_id: Uuid) -> Result<Vec<Uuid>>;

    /// Creates a new person. Fails with `ConstraintViolation` for an unknown city.
    async fn create_person(&self, person: &Person) -> Result<()>;

    /// Updates an existing person. Fails with `ConstraintViolation` for an unknown city.
    async fn update_person(&self, person: &Person) -> Result<()>;

    /// Deletes the person with the given ID, returning the number of rows removed.
    async fn delete_person(&self, id: Uuid) -> Result<u64>;
}
