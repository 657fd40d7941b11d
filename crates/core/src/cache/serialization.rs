//! Pure functions for serializing/deserializing projections to/from cache bytes.
//!
//! These functions use JSON serialization for cache storage, providing human-readable
//! cache values that are easy to debug and inspect.

use crate::directory::{CityView, PersonView};
use thiserror::Error;

/// Errors that can occur during cache serialization/deserialization.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SerializationError {
    /// Failed to serialize a value to bytes.
    #[error("Failed to serialize: {0}")]
    SerializeFailed(String),
    /// Failed to deserialize bytes to a value.
    #[error("Failed to deserialize: {0}")]
    DeserializeFailed(String),
}

/// Result type for serialization operations.
pub type Result<T> = std::result::Result<T, SerializationError>;

/// Serializes a person projection to JSON bytes.
pub fn serialize_person_view(view: &PersonView) -> Result<Vec<u8>> {
    serde_json::to_vec(view).map_err(|e| SerializationError::SerializeFailed(e.to_string()))
}

/// Deserializes JSON bytes to a person projection.
pub fn deserialize_person_view(bytes: &[u8]) -> Result<PersonView> {
    serde_json::from_slice(bytes).map_err(|e| SerializationError::DeserializeFailed(e.to_string()))
}

/// Serializes an ordered list of person projections to JSON bytes.
///
/// The order of `views` is preserved in the encoded array.
pub fn serialize_person_views(views: &[PersonView]) -> Result<Vec<u8>> {
    serde_json::to_vec(views).map_err(|e| SerializationError::SerializeFailed(e.to_string()))
}

/// Deserializes JSON bytes to an ordered list of person projections.
pub fn deserialize_person_views(bytes: &[u8]) -> Result<Vec<PersonView>> {
    serde_json::from_slice(bytes).map_err(|e| SerializationError::DeserializeFailed(e.to_string()))
}

/// Serializes a city projection to JSON bytes.
///
/// City reads are not cached yet; the city helpers below fix the cached
/// format so a city cache would share it with the person entries.
pub fn serialize_city_view(view: &CityView) -> Result<Vec<u8>> {
    serde_json::to_vec(view).map_err(|e| SerializationError::SerializeFailed(e.to_string()))
}

/// Deserializes JSON bytes to a city projection.
pub fn deserialize_city_view(bytes: &[u8]) -> Result<CityView> {
    serde_json::from_slice(bytes).map_err(|e| SerializationError::DeserializeFailed(e.to_string()))
}

/// Serializes an ordered list of city projections to JSON bytes.
pub fn serialize_city_views(views: &[CityView]) -> Result<Vec<u8>> {
    serde_json::to_vec(views).map_err(|e| SerializationError::SerializeFailed(e.to_string()))
}

/// Deserializes JSON bytes to an ordered list of city projections.
pub fn deserialize_city_views(bytes: &[u8]) -> Result<Vec<CityView>> {
    serde_json::from_slice(bytes).map_err(|e| SerializationError::DeserializeFailed(e.to_string()))
}
