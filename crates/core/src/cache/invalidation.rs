//! Pure invalidation planning.
//!
//! Maps a domain event to the exact set of cache keys that may hold data
//! derived from the changed record. This is the single place that reconciles
//! the denormalized city name embedded in person projections: a city update
//! also drops the cached projection of every person living there.

use uuid::Uuid;

use crate::events::DomainEvent;

use super::keys::{cities_key, city_key, people_key, person_key};

/// Returns true if invalidating `event` needs the IDs of the people that
/// reference the changed record, which only the store can provide.
pub fn requires_cascade(event: &DomainEvent) -> bool {
    matches!(event, DomainEvent::CityUpdated { .. })
}

/// Returns the cache keys to remove for `event`, in removal order.
///
/// `cascaded_people` holds the IDs of people referencing the changed city.
/// It is ignored unless [`requires_cascade`] is true for the event.
///
/// | Event           | Keys                                                    |
/// |-----------------|---------------------------------------------------------|
/// | PersonCreated   | `People`                                                |
/// | PersonUpdated   | `Person-{id}`, `People`                                 |
/// | PersonDeleted   | `Person-{id}`, `People`                                 |
/// | CityUpdated     | `City-{id}`, `Cities`, `Person-{pid}` for each, `People` |
/// | CityCreated     | (none)                                                  |
/// | CityDeleted     | (none)                                                  |
///
/// # Examples
///
/// ```
/// use cachemgmt_core::cache::invalidation_keys;
/// use cachemgmt_core::events::DomainEvent;
/// use uuid::Uuid;
///
/// let keys = invalidation_keys(&DomainEvent::PersonCreated { id: Uuid::nil() }, &[]);
/// assert_eq!(keys, vec!["People".to_string()]);
/// ```
pub fn invalidation_keys(event: &DomainEvent, cascaded_people: &[Uuid]) -> Vec<String> {
    match *event {
        DomainEvent::PersonCreated { .. } => vec![people_key().to_string()],
        DomainEvent::PersonUpdated { id } | DomainEvent::PersonDeleted { id } => {
            vec![person_key(id), people_key().to_string()]
        }
        DomainEvent::CityUpdated { id } => {
            let mut keys = Vec::with_capacity(cascaded_people.len() + 3);
            keys.push(city_key(id));
            keys.push(cities_key().to_string());
            keys.extend(cascaded_people.iter().copied().map(person_key));
            keys.push(people_key().to_string());
            keys
        }
        // Nothing cached can reference a new city, and a referenced city
        // cannot be deleted.
        DomainEvent::CityCreated { .. } | DomainEvent::CityDeleted { .. } => Vec::new(),
    }
}
