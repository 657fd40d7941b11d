//! Cache key naming.
//!
//! The key strings are part of the service's compatibility surface and must
//! not change shape.

use uuid::Uuid;

/// Prefix shared by every single-person key.
const PERSON_KEY_PREFIX: &str = "Person-";

/// Prefix shared by every single-city key.
const CITY_KEY_PREFIX: &str = "City-";

/// Pattern matching every single-person key.
pub const PERSON_KEY_PATTERN: &str = "Person-*";

/// Returns the cache key for the sorted list of all person projections.
pub fn people_key() -> &'static str {
    "People"
}

/// Returns the cache key for a single person projection.
///
/// # Examples
///
/// ```
/// use cachemgmt_core::cache::person_key;
/// use uuid::Uuid;
///
/// assert_eq!(
///     person_key(Uuid::nil()),
///     "Person-00000000-0000-0000-0000-000000000000"
/// );
/// ```
pub fn person_key(person_id: Uuid) -> String {
    format!("{PERSON_KEY_PREFIX}{person_id}")
}

/// Returns the cache key for the sorted list of all city projections.
///
/// No read path populates this key today; invalidation still removes it.
pub fn cities_key() -> &'static str {
    "Cities"
}

/// Returns the cache key for a single city projection.
///
/// No read path populates this key today; invalidation still removes it.
pub fn city_key(city_id: Uuid) -> String {
    format!("{CITY_KEY_PREFIX}{city_id}")
}
