//! SQLite schema definitions and SQL query constants.
//!
//! This module contains all SQL statements used by the SQLite repository,
//! following the Functional Core pattern - pure data, no I/O.

/// Pragmas applied to every connection before the schema is created.
///
/// SQLite ships with foreign keys disabled; the person-to-city reference
/// relies on them.
pub const PRAGMAS: &str = "PRAGMA foreign_keys = ON;";

/// SQL statement to create all tables.
pub const CREATE_TABLES: &str = r#"
-- Cities table
CREATE TABLE IF NOT EXISTS cities (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL
);

-- People table. No ON DELETE action: deleting a referenced city fails.
CREATE TABLE IF NOT EXISTS people (
    id TEXT PRIMARY KEY,
    first_name TEXT NOT NULL,
    last_name TEXT,
    city_id TEXT NOT NULL,
    FOREIGN KEY (city_id) REFERENCES cities(id)
);

CREATE INDEX IF NOT EXISTS idx_people_city_id ON people(city_id);
"#;

// City queries
pub const INSERT_CITY: &str = r#"
INSERT INTO cities (id, name)
VALUES (?1, ?2)
"#;

pub const SELECT_CITY_BY_ID: &str = r#"
SELECT id, name
FROM cities
WHERE id = ?1
"#;

pub const SELECT_CITIES: &str = r#"
SELECT id, name
FROM cities
ORDER BY name
"#;

pub const UPDATE_CITY: &str = r#"
UPDATE cities
SET name = ?2
WHERE id = ?1
"#;

pub const DELETE_CITY: &str = r#"
DELETE FROM cities
WHERE id = ?1
"#;

// Person queries
pub const INSERT_PERSON: &str = r#"
INSERT INTO people (id, first_name, last_name, city_id)
VALUES (?1, ?2, ?3, ?4)
"#;

pub const SELECT_PERSON_BY_ID: &str = r#"
SELECT id, first_name, last_name, city_id
FROM people
WHERE id = ?1
"#;

pub const SELECT_PERSON_VIEW_BY_ID: &str = r#"
SELECT p.id, p.first_name, p.last_name, c.name
FROM people p
JOIN cities c ON c.id = p.city_id
WHERE p.id = ?1
"#;

pub const SELECT_PERSON_VIEWS: &str = r#"
SELECT p.id, p.first_name, p.last_name, c.name
FROM people p
JOIN cities c ON c.id = p.city_id
"#;

pub const SELECT_PERSON_IDS_BY_CITY: &str = r#"
SELECT id
FROM people
WHERE city_id = ?1
"#;

pub const UPDATE_PERSON: &str = r#"
UPDATE people
SET first_name = ?2, last_name = ?3, city_id = ?4
WHERE id = ?1
"#;

pub const DELETE_PERSON: &str = r#"
DELETE FROM people
WHERE id = ?1
"#;
