use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A city record as held by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct City {
    pub id: Uuid,
    pub name: String,
}

impl City {
    /// Creates a new city with a fresh identifier.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
        }
    }

    /// Sets a specific ID for this city (useful for testing).
    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }
}

/// A person record as held by the store.
///
/// `city_id` must reference an existing [`City`]; the store enforces it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: Option<String>,
    pub city_id: Uuid,
}

impl Person {
    /// Creates a new person living in `city_id` with a fresh identifier.
    pub fn new(first_name: impl Into<String>, city_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            first_name: first_name.into(),
            last_name: None,
            city_id,
        }
    }

    /// Sets the last name.
    pub fn with_last_name(mut self, last_name: impl Into<String>) -> Self {
        self.last_name = Some(last_name.into());
        self
    }

    /// Sets a specific ID for this person (useful for testing).
    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }
}

/// Read-side projection of a city.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CityView {
    pub id: Uuid,
    pub name: String,
}

/// Read-side projection of a person.
///
/// `city_name` is a snapshot of the owning city's name taken when the
/// projection was built. Any cached copy goes stale when that city is
/// renamed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonView {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: Option<String>,
    pub city_name: String,
}

impl From<&City> for CityView {
    fn from(city: &City) -> Self {
        Self {
            id: city.id,
            name: city.name.clone(),
        }
    }
}
