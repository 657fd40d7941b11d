mod error;
mod invalidation;
mod keys;
mod patterns;
mod serialization;
mod traits;

pub use error::{CacheError, Result};
pub use invalidation::{invalidation_keys, requires_cascade};
pub use keys::{cities_key, city_key, people_key, person_key, PERSON_KEY_PATTERN};
pub use patterns::pattern_matches;
pub use serialization::{
    deserialize_city_view, deserialize_city_views, deserialize_person_view,
    deserialize_person_views, serialize_city_view, serialize_city_views, serialize_person_view,
    serialize_person_views, SerializationError,
};
pub use traits::Cache;
