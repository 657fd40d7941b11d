use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A change notification published after a store write has committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum DomainEvent {
    PersonCreated { id: Uuid },
    PersonUpdated { id: Uuid },
    PersonDeleted { id: Uuid },
    CityCreated { id: Uuid },
    CityUpdated { id: Uuid },
    CityDeleted { id: Uuid },
}

/// Discriminant of a [`DomainEvent`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    PersonCreated,
    PersonUpdated,
    PersonDeleted,
    CityCreated,
    CityUpdated,
    CityDeleted,
}

impl DomainEvent {
    /// Returns the ID of the record that changed.
    pub fn id(&self) -> Uuid {
        match *self {
            DomainEvent::PersonCreated { id }
            | DomainEvent::PersonUpdated { id }
            | DomainEvent::PersonDeleted { id }
            | DomainEvent::CityCreated { id }
            | DomainEvent::CityUpdated { id }
            | DomainEvent::CityDeleted { id } => id,
        }
    }

    pub fn kind(&self) -> EventKind {
        match self {
            DomainEvent::PersonCreated { .. } => EventKind::PersonCreated,
            DomainEvent::PersonUpdated { .. } => EventKind::PersonUpdated,
            DomainEvent::PersonDeleted { .. } => EventKind::PersonDeleted,
            DomainEvent::CityCreated { .. } => EventKind::CityCreated,
            DomainEvent::CityUpdated { .. } => EventKind::CityUpdated,
            DomainEvent::CityDeleted { .. } => EventKind::CityDeleted,
        }
    }

    /// Returns true for events about a person record.
    pub fn is_person_event(&self) -> bool {
        matches!(
            self.kind(),
            EventKind::PersonCreated | EventKind::PersonUpdated | EventKind::PersonDeleted
        )
    }

    /// Returns true for events about a city record.
    pub fn is_city_event(&self) -> bool {
        !self.is_person_event()
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EventKind::PersonCreated => "PersonCreated",
            EventKind::PersonUpdated => "PersonUpdated",
            EventKind::PersonDeleted => "PersonDeleted",
            EventKind::CityCreated => "CityCreated",
            EventKind::CityUpdated => "CityUpdated",
            EventKind::CityDeleted => "CityDeleted",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_and_kind() {
        let id = Uuid::new_v4();
        let event = DomainEvent::CityUpdated { id };

        assert_eq!(event.id(), id);
        assert_eq!(event.kind(), EventKind::CityUpdated);
        assert!(event.is_city_event());
        assert!(!event.is_person_event());
    }

    #[test]
    fn test_person_events_are_classified() {
        let id = Uuid::new_v4();
        for event in [
            DomainEvent::PersonCreated { id },
            DomainEvent::PersonUpdated { id },
            DomainEvent::PersonDeleted { id },
        ] {
            assert!(event.is_person_event(), "{} should be a person event", event.kind());
        }
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(EventKind::PersonDeleted.to_string(), "PersonDeleted");
    }

    #[test]
    fn test_serialized_shape() {
        let event = DomainEvent::PersonCreated { id: Uuid::nil() };
        let json = serde_json::to_value(event).unwrap();

        assert_eq!(json["type"], "personCreated");
        assert_eq!(json["id"], "00000000-0000-0000-0000-000000000000");
    }
}
