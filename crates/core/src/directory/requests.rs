//! API request types for city and person writes.
//!
//! The same payload shape is used for create (POST) and full replace (PUT).

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::types::{City, Person};

/// Request payload for creating or updating a city.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveCityRequest {
    pub name: String,
}

impl SaveCityRequest {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Convert into a new City with a fresh identifier.
    pub fn into_city(self) -> City {
        City::new(self.name)
    }

    /// Apply the request to an existing city.
    pub fn apply_to(self, city: &mut City) {
        city.name = self.name;
    }
}

/// Request payload for creating or updating a person.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavePersonRequest {
    pub first_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    pub city_id: Uuid,
}

impl SavePersonRequest {
    pub fn new(first_name: impl Into<String>, city_id: Uuid) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: None,
            city_id,
        }
    }

    pub fn with_last_name(mut self, last_name: impl Into<String>) -> Self {
        self.last_name = Some(last_name.into());
        self
    }

    /// Convert into a new Person with a fresh identifier.
    ///
    /// A blank last name is stored as absent.
    pub fn into_person(self) -> Person {
        Person {
            id: Uuid::new_v4(),
            first_name: self.first_name,
            last_name: normalize_last_name(self.last_name),
            city_id: self.city_id,
        }
    }

    /// Apply the request to an existing person, replacing every field.
    pub fn apply_to(self, person: &mut Person) {
        person.first_name = self.first_name;
        person.last_name = normalize_last_name(self.last_name);
        person.city_id = self.city_id;
    }
}

fn normalize_last_name(last_name: Option<String>) -> Option<String> {
    last_name.filter(|name| !name.trim().is_empty())
}
