//! SQLite row conversion functions.
//!
//! Pure functions for converting between SQLite rows and domain types.

use cachemgmt_core::directory::{City, Person, PersonView};
use rusqlite::Row;
use uuid::Uuid;

/// Convert a SQLite row to a City.
///
/// Expected columns: id, name
pub fn row_to_city(row: &Row) -> rusqlite::Result<City> {
    let id: String = row.get(0)?;
    let name: String = row.get(1)?;

    Ok(City {
        id: parse_uuid(&id)?,
        name,
    })
}

/// Convert a SQLite row to a Person.
///
/// Expected columns: id, first_name, last_name, city_id
pub fn row_to_person(row: &Row) -> rusqlite::Result<Person> {
    let id: String = row.get(0)?;
    let first_name: String = row.get(1)?;
    let last_name: Option<String> = row.get(2)?;
    let city_id: String = row.get(3)?;

    Ok(Person {
        id: parse_uuid(&id)?,
        first_name,
        last_name,
        city_id: parse_uuid(&city_id)?,
    })
}

/// Convert a joined people/cities row to a PersonView.
///
/// Expected columns: person id, first_name, last_name, city name
pub fn row_to_person_view(row: &Row) -> rusqlite::Result<PersonView> {
    let id: String = row.get(0)?;
    let first_name: String = row.get(1)?;
    let last_name: Option<String> = row.get(2)?;
    let city_name: String = row.get(3)?;

    Ok(PersonView {
        id: parse_uuid(&id)?,
        first_name,
        last_name,
        city_name,
    })
}

/// Convert a single-column row to a Uuid.
pub fn row_to_uuid(row: &Row) -> rusqlite::Result<Uuid> {
    let id: String = row.get(0)?;
    parse_uuid(&id)
}

fn parse_uuid(s: &str) -> rusqlite::Result<Uuid> {
    Uuid::parse_str(s).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
    })
}
