use uuid::Uuid;

use super::error::{CityError, PersonError, CITY_NAME_MAX_LEN, PERSON_NAME_MAX_LEN};
use super::types::{City, Person, PersonView};

/// Validates a city before creation or update.
pub fn validate_city(city: &City) -> Result<(), CityError> {
    if city.name.trim().is_empty() {
        return Err(CityError::EmptyName);
    }
    if city.name.chars().count() > CITY_NAME_MAX_LEN {
        return Err(CityError::NameTooLong);
    }
    Ok(())
}

/// Validates a person before creation or update.
///
/// Only shape is checked here. Whether `city_id` references an existing city
/// is left to the store's foreign key.
pub fn validate_person(person: &Person) -> Result<(), PersonError> {
    if person.first_name.trim().is_empty() {
        return Err(PersonError::EmptyFirstName);
    }
    if person.first_name.chars().count() > PERSON_NAME_MAX_LEN {
        return Err(PersonError::FirstNameTooLong);
    }
    if person
        .last_name
        .as_ref()
        .is_some_and(|name| name.chars().count() > PERSON_NAME_MAX_LEN)
    {
        return Err(PersonError::LastNameTooLong);
    }
    if person.city_id.is_nil() {
        return Err(PersonError::MissingCityId);
    }
    Ok(())
}

/// Builds the read projection of a person, denormalizing the city name.
pub fn person_view(person: &Person, city: &City) -> PersonView {
    debug_assert_eq!(person.city_id, city.id);
    PersonView {
        id: person.id,
        first_name: person.first_name.clone(),
        last_name: person.last_name.clone(),
        city_name: city.name.clone(),
    }
}

/// Sorts person projections by first name, then last name.
///
/// A missing last name sorts before any present one.
pub fn sort_person_views(views: &mut [PersonView]) {
    views.sort_by(|a, b| {
        a.first_name
            .cmp(&b.first_name)
            .then_with(|| a.last_name.cmp(&b.last_name))
    });
}

/// Sorts cities by name.
pub fn sort_cities(cities: &mut [City]) {
    cities.sort_by(|a, b| a.name.cmp(&b.name));
}

/// Returns the ids of people whose `city_id` equals `city_id`.
pub fn people_in_city<'a>(
    people: impl IntoIterator<Item = &'a Person>,
    city_id: Uuid,
) -> Vec<Uuid> {
    people
        .into_iter()
        .filter(|person| person.city_id == city_id)
        .map(|person| person.id)
        .collect()
}
