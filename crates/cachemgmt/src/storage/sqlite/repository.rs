//! SQLite repository implementation.
//!
//! Implements the repository traits from `cachemgmt_core::storage` using SQLite.

use async_trait::async_trait;
use tokio_rusqlite::Connection;
use uuid::Uuid;

use cachemgmt_core::directory::{City, Person, PersonView};
use cachemgmt_core::storage::{CityRepository, PersonRepository, RepositoryError, Result};

use super::conversions::{row_to_city, row_to_person, row_to_person_view, row_to_uuid};
use super::error::{map_tokio_rusqlite_error, map_tokio_rusqlite_error_with_id};
use super::schema;

/// Helper to wrap rusqlite errors for tokio_rusqlite closures.
fn wrap_err(e: rusqlite::Error) -> tokio_rusqlite::Error {
    tokio_rusqlite::Error::Rusqlite(e)
}

/// SQLite-based repository implementation.
///
/// Provides async access to SQLite storage for cities and people.
pub struct SqliteRepository {
    conn: Connection,
}

impl SqliteRepository {
    /// Creates a new repository with a file-based database.
    ///
    /// The database file will be created if it doesn't exist.
    /// Schema tables are created automatically.
    pub async fn new(path: &str) -> Result<Self> {
        let conn = Connection::open(path)
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Self::init_schema(&conn).await?;

        Ok(Self { conn })
    }

    /// Creates a new repository with an in-memory database.
    ///
    /// Useful for testing - data is lost when the connection is dropped.
    #[cfg_attr(not(test), allow(dead_code))]
    pub async fn new_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Self::init_schema(&conn).await?;

        Ok(Self { conn })
    }

    /// Initialize the database schema.
    async fn init_schema(conn: &Connection) -> Result<()> {
        conn.call(|conn| {
            conn.execute_batch(schema::PRAGMAS).map_err(wrap_err)?;
            conn.execute_batch(schema::CREATE_TABLES)
                .map_err(wrap_err)?;
            Ok(())
        })
        .await
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))
    }
}

// ============================================================================
// CityRepository implementation
// ============================================================================

#[async_trait]
impl CityRepository for SqliteRepository {
    async fn get_city(&self, id: Uuid) -> Result<Option<City>> {
        let id_str = id.to_string();

        self.conn
            .call(move |conn| {
                let mut stmt = conn.prepare(schema::SELECT_CITY_BY_ID).map_err(wrap_err)?;
                match stmt.query_row([&id_str], row_to_city) {
                    Ok(city) => Ok(Some(city)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(wrap_err(e)),
                }
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, "City", id.to_string()))
    }

    async fn list_cities(&self) -> Result<Vec<City>> {
        self.conn
            .call(|conn| {
                let mut stmt = conn.prepare(schema::SELECT_CITIES).map_err(wrap_err)?;
                let rows = stmt.query_map([], row_to_city).map_err(wrap_err)?;

                let mut cities = Vec::new();
                for row_result in rows {
                    cities.push(row_result.map_err(wrap_err)?);
                }
                Ok(cities)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "City"))
    }

    async fn create_city(&self, city: &City) -> Result<()> {
        let id = city.id.to_string();
        let name = city.name.clone();
        let city_id = city.id.to_string();

        self.conn
            .call(move |conn| {
                conn.execute(schema::INSERT_CITY, rusqlite::params![id, name])
                    .map_err(wrap_err)?;
                Ok(())
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, "City", city_id))
    }

    async fn update_city(&self, city: &City) -> Result<()> {
        let id = city.id.to_string();
        let name = city.name.clone();
        let city_id = city.id.to_string();

        self.conn
            .call(move |conn| {
                let rows = conn
                    .execute(schema::UPDATE_CITY, rusqlite::params![id, name])
                    .map_err(wrap_err)?;
                if rows == 0 {
                    Err(wrap_err(rusqlite::Error::QueryReturnedNoRows))
                } else {
                    Ok(())
                }
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, "City", city_id))
    }

    async fn delete_city(&self, id: Uuid) -> Result<u64> {
        let id_str = id.to_string();

        self.conn
            .call(move |conn| {
                let rows = conn
                    .execute(schema::DELETE_CITY, [&id_str])
                    .map_err(wrap_err)?;
                Ok(rows as u64)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, "City", id.to_string()))
    }
}

// ============================================================================
// PersonRepository implementation
// ============================================================================

#[async_trait]
impl PersonRepository for SqliteRepository {
    async fn get_person(&self, id: Uuid) -> Result<Option<Person>> {
        let id_str = id.to_string();

        self.conn
            .call(move |conn| {
                let mut stmt = conn
                    .prepare(schema::SELECT_PERSON_BY_ID)
                    .map_err(wrap_err)?;
                match stmt.query_row([&id_str], row_to_person) {
                    Ok(person) => Ok(Some(person)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(wrap_err(e)),
                }
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, "Person", id.to_string()))
    }

    async fn get_person_view(&self, id: Uuid) -> Result<Option<PersonView>> {
        let id_str = id.to_string();

        self.conn
            .call(move |conn| {
                let mut stmt = conn
                    .prepare(schema::SELECT_PERSON_VIEW_BY_ID)
                    .map_err(wrap_err)?;
                match stmt.query_row([&id_str], row_to_person_view) {
                    Ok(view) => Ok(Some(view)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(wrap_err(e)),
                }
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, "Person", id.to_string()))
    }

    async fn list_person_views(&self) -> Result<Vec<PersonView>> {
        self.conn
            .call(|conn| {
                let mut stmt = conn
                    .prepare(schema::SELECT_PERSON_VIEWS)
                    .map_err(wrap_err)?;
                let rows = stmt
                    .query_map([], row_to_person_view)
                    .map_err(wrap_err)?;

                let mut views = Vec::new();
                for row_result in rows {
                    views.push(row_result.map_err(wrap_err)?);
                }
                Ok(views)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Person"))
    }

    async fn list_person_ids_by_city(&self, city_id: Uuid) -> Result<Vec<Uuid>> {
        let city_id_str = city_id.to_string();

        self.conn
            .call(move |conn| {
                let mut stmt = conn
                    .prepare(schema::SELECT_PERSON_IDS_BY_CITY)
                    .map_err(wrap_err)?;
                let rows = stmt
                    .query_map([&city_id_str], row_to_uuid)
                    .map_err(wrap_err)?;

                let mut ids = Vec::new();
                for row_result in rows {
                    ids.push(row_result.map_err(wrap_err)?);
                }
                Ok(ids)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Person"))
    }

    async fn create_person(&self, person: &Person) -> Result<()> {
        let id = person.id.to_string();
        let first_name = person.first_name.clone();
        let last_name = person.last_name.clone();
        let city_id = person.city_id.to_string();
        let person_id = person.id.to_string();

        self.conn
            .call(move |conn| {
                conn.execute(
                    schema::INSERT_PERSON,
                    rusqlite::params![id, first_name, last_name, city_id],
                )
                .map_err(wrap_err)?;
                Ok(())
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, "Person", person_id))
    }

    async fn update_person(&self, person: &Person) -> Result<()> {
        let id = person.id.to_string();
        let first_name = person.first_name.clone();
        let last_name = person.last_name.clone();
        let city_id = person.city_id.to_string();
        let person_id = person.id.to_string();

        self.conn
            .call(move |conn| {
                let rows = conn
                    .execute(
                        schema::UPDATE_PERSON,
                        rusqlite::params![id, first_name, last_name, city_id],
                    )
                    .map_err(wrap_err)?;
                if rows == 0 {
                    Err(wrap_err(rusqlite::Error::QueryReturnedNoRows))
                } else {
                    Ok(())
                }
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, "Person", person_id))
    }

    async fn delete_person(&self, id: Uuid) -> Result<u64> {
        let id_str = id.to_string();

        self.conn
            .call(move |conn| {
                let rows = conn
                    .execute(schema::DELETE_PERSON, [&id_str])
                    .map_err(wrap_err)?;
                Ok(rows as u64)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, "Person", id.to_string()))
    }
}
