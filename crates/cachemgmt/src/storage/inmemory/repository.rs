//! In-memory repository implementation.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use cachemgmt_core::directory::{
    people_in_city, person_view, sort_cities, City, Person, PersonView,
};
use cachemgmt_core::storage::{CityRepository, PersonRepository, RepositoryError, Result};

/// In-memory storage backend.
///
/// Uses HashMaps wrapped in `Arc<RwLock<_>>` for thread-safe access.
/// Data is not persisted and will be lost when the repository is dropped.
///
/// The person-to-city foreign key is enforced the way a relational store
/// would: a person must reference an existing city, and a city cannot be
/// deleted while anyone references it. Operations touching both maps take
/// the `cities` lock before the `people` lock.
#[derive(Debug, Clone)]
pub struct InMemoryRepository {
    cities: Arc<RwLock<HashMap<Uuid, City>>>,
    people: Arc<RwLock<HashMap<Uuid, Person>>>,
}

impl Default for InMemoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryRepository {
    /// Creates a new empty in-memory repository.
    pub fn new() -> Self {
        Self {
            cities: Arc::new(RwLock::new(HashMap::new())),
            people: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

fn unknown_city(person: &Person) -> RepositoryError {
    RepositoryError::ConstraintViolation(format!(
        "FOREIGN KEY constraint failed: city {} does not exist",
        person.city_id
    ))
}

#[async_trait]
impl CityRepository for InMemoryRepository {
    async fn get_city(&self, id: Uuid) -> Result<Option<City>> {
        let cities = self.cities.read().await;
        Ok(cities.get(&id).cloned())
    }

    async fn list_cities(&self) -> Result<Vec<City>> {
        let cities = self.cities.read().await;
        let mut all: Vec<City> = cities.values().cloned().collect();
        sort_cities(&mut all);
        Ok(all)
    }

    async fn create_city(&self, city: &City) -> Result<()> {
        let mut cities = self.cities.write().await;
        if cities.contains_key(&city.id) {
            return Err(RepositoryError::AlreadyExists {
                entity_type: "City",
                id: city.id.to_string(),
            });
        }
        cities.insert(city.id, city.clone());
        Ok(())
    }

    async fn update_city(&self, city: &City) -> Result<()> {
        let mut cities = self.cities.write().await;
        if !cities.contains_key(&city.id) {
            return Err(RepositoryError::NotFound {
                entity_type: "City",
                id: city.id.to_string(),
            });
        }
        cities.insert(city.id, city.clone());
        Ok(())
    }

    async fn delete_city(&self, id: Uuid) -> Result<u64> {
        let mut cities = self.cities.write().await;
        if !cities.contains_key(&id) {
            return Ok(0);
        }

        let people = self.people.read().await;
        if people.values().any(|p| p.city_id == id) {
            return Err(RepositoryError::ConstraintViolation(format!(
                "FOREIGN KEY constraint failed: city {id} is still referenced"
            )));
        }

        cities.remove(&id);
        Ok(1)
    }
}

#[async_trait]
impl PersonRepository for InMemoryRepository {
    async fn get_person(&self, id: Uuid) -> Result<Option<Person>> {
        let people = self.people.read().await;
        Ok(people.get(&id).cloned())
    }

    async fn get_person_view(&self, id: Uuid) -> Result<Option<PersonView>> {
        let cities = self.cities.read().await;
        let people = self.people.read().await;

        let Some(person) = people.get(&id) else {
            return Ok(None);
        };
        let city = cities.get(&person.city_id).ok_or_else(|| {
            RepositoryError::InvalidData(format!(
                "Person {id} references missing city {}",
                person.city_id
            ))
        })?;

        Ok(Some(person_view(person, city)))
    }

    async fn list_person_views(&self) -> Result<Vec<PersonView>> {
        let cities = self.cities.read().await;
        let people = self.people.read().await;

        people
            .values()
            .map(|person| {
                cities
                    .get(&person.city_id)
                    .map(|city| person_view(person, city))
                    .ok_or_else(|| {
                        RepositoryError::InvalidData(format!(
                            "Person {} references missing city {}",
                            person.id, person.city_id
                        ))
                    })
            })
            .collect()
    }

    async fn list_person_ids_by_city(&self, city_id: Uuid) -> Result<Vec<Uuid>> {
        let people = self.people.read().await;
        Ok(people_in_city(people.values(), city_id))
    }

    async fn create_person(&self, person: &Person) -> Result<()> {
        let cities = self.cities.read().await;
        let mut people = self.people.write().await;

        if people.contains_key(&person.id) {
            return Err(RepositoryError::AlreadyExists {
                entity_type: "Person",
                id: person.id.to_string(),
            });
        }
        if !cities.contains_key(&person.city_id) {
            return Err(unknown_city(person));
        }

        people.insert(person.id, person.clone());
        Ok(())
    }

    async fn update_person(&self, person: &Person) -> Result<()> {
        let cities = self.cities.read().await;
        let mut people = self.people.write().await;

        if !people.contains_key(&person.id) {
            return Err(RepositoryError::NotFound {
                entity_type: "Person",
                id: person.id.to_string(),
            });
        }
        if !cities.contains_key(&person.city_id) {
            return Err(unknown_city(person));
        }

        people.insert(person.id, person.clone());
        Ok(())
    }

    async fn delete_person(&self, id: Uuid) -> Result<u64> {
        let mut people = self.people.write().await;
        Ok(u64::from(people.remove(&id).is_some()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn with_springfield() -> (InMemoryRepository, City) {
        let repo = InMemoryRepository::new();
        let city = City::new("Springfield");
        repo.create_city(&city).await.unwrap();
        (repo, city)
    }

    // ========================================================================
    // City tests
    // ========================================================================

    #[tokio::test]
    async fn test_city_create_and_get() {
        let (repo, city) = with_springfield().await;

        let fetched = repo.get_city(city.id).await.unwrap();
        assert_eq!(fetched, Some(city));
    }

    #[tokio::test]
    async fn test_city_create_duplicate() {
        let (repo, city) = with_springfield().await;

        let result = repo.create_city(&city).await;
        assert!(matches!(
            result,
            Err(RepositoryError::AlreadyExists { entity_type: "City", .. })
        ));
    }

    #[tokio::test]
    async fn test_list_cities_sorted_by_name() {
        let repo = InMemoryRepository::new();
        for name in ["Shelbyville", "Capital City", "Springfield"] {
            repo.create_city(&City::new(name)).await.unwrap();
        }

        let names: Vec<String> = repo
            .list_cities()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();

        assert_eq!(names, vec!["Capital City", "Shelbyville", "Springfield"]);
    }

    #[tokio::test]
    async fn test_city_update_nonexistent() {
        let repo = InMemoryRepository::new();

        let result = repo.update_city(&City::new("Ogdenville")).await;
        assert!(matches!(result, Err(RepositoryError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_city_delete_counts_rows() {
        let (repo, city) = with_springfield().await;

        assert_eq!(repo.delete_city(city.id).await.unwrap(), 1);
        assert_eq!(repo.delete_city(city.id).await.unwrap(), 0);
        assert!(repo.get_city(city.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_city_delete_rejected_while_referenced() {
        let (repo, city) = with_springfield().await;
        repo.create_person(&Person::new("Homer", city.id))
            .await
            .unwrap();

        let result = repo.delete_city(city.id).await;

        assert!(matches!(
            result,
            Err(RepositoryError::ConstraintViolation(_))
        ));
        assert!(repo.get_city(city.id).await.unwrap().is_some());
    }

    // ========================================================================
    // Person tests
    // ========================================================================

    #[tokio::test]
    async fn test_person_create_requires_existing_city() {
        let repo = InMemoryRepository::new();

        let result = repo.create_person(&Person::new("Homer", Uuid::new_v4())).await;

        assert!(matches!(
            result,
            Err(RepositoryError::ConstraintViolation(_))
        ));
    }

    #[tokio::test]
    async fn test_person_update_requires_existing_city() {
        let (repo, city) = with_springfield().await;
        let mut person = Person::new("Homer", city.id);
        repo.create_person(&person).await.unwrap();

        person.city_id = Uuid::new_v4();
        let result = repo.update_person(&person).await;

        assert!(matches!(
            result,
            Err(RepositoryError::ConstraintViolation(_))
        ));
    }

    #[tokio::test]
    async fn test_person_view_joins_city_name() {
        let (repo, city) = with_springfield().await;
        let person = Person::new("Homer", city.id).with_last_name("Simpson");
        repo.create_person(&person).await.unwrap();

        let view = repo.get_person_view(person.id).await.unwrap().unwrap();

        assert_eq!(view.id, person.id);
        assert_eq!(view.first_name, "Homer");
        assert_eq!(view.last_name.as_deref(), Some("Simpson"));
        assert_eq!(view.city_name, "Springfield");
    }

    #[tokio::test]
    async fn test_person_view_nonexistent() {
        let repo = InMemoryRepository::new();
        assert!(repo.get_person_view(Uuid::new_v4()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_person_views_reflects_city_rename() {
        let (repo, mut city) = with_springfield().await;
        repo.create_person(&Person::new("Homer", city.id))
            .await
            .unwrap();

        city.name = "Shelbyville".to_string();
        repo.update_city(&city).await.unwrap();

        let views = repo.list_person_views().await.unwrap();
        assert_eq!(views.len(), 1);
        assert_eq!(views[0].city_name, "Shelbyville");
    }

    #[tokio::test]
    async fn test_list_person_ids_by_city() {
        let (repo, springfield) = with_springfield().await;
        let shelbyville = City::new("Shelbyville");
        repo.create_city(&shelbyville).await.unwrap();

        let homer = Person::new("Homer", springfield.id);
        let marge = Person::new("Marge", springfield.id);
        let snake = Person::new("Snake", shelbyville.id);
        for person in [&homer, &marge, &snake] {
            repo.create_person(person).await.unwrap();
        }

        let mut ids = repo.list_person_ids_by_city(springfield.id).await.unwrap();
        ids.sort();
        let mut expected = vec![homer.id, marge.id];
        expected.sort();

        assert_eq!(ids, expected);
    }

    #[tokio::test]
    async fn test_person_delete_counts_rows() {
        let (repo, city) = with_springfield().await;
        let person = Person::new("Homer", city.id);
        repo.create_person(&person).await.unwrap();

        assert_eq!(repo.delete_person(person.id).await.unwrap(), 1);
        assert_eq!(repo.delete_person(person.id).await.unwrap(), 0);

        // The city is free to go once nobody lives there
        assert_eq!(repo.delete_city(city.id).await.unwrap(), 1);
    }
}
