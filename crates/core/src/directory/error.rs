use thiserror::Error;

/// Maximum length of a city name.
pub const CITY_NAME_MAX_LEN: usize = 60;

/// Maximum length of a person's first or last name.
pub const PERSON_NAME_MAX_LEN: usize = 50;

/// Errors that can occur when validating a city.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CityError {
    #[error("City name cannot be empty")]
    EmptyName,
    #[error("City name too long (max 60 characters)")]
    NameTooLong,
}

/// Errors that can occur when validating a person.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PersonError {
    #[error("First name cannot be empty")]
    EmptyFirstName,
    #[error("First name too long (max 50 characters)")]
    FirstNameTooLong,
    #[error("Last name too long (max 50 characters)")]
    LastNameTooLong,
    #[error("City ID is required")]
    MissingCityId,
}
