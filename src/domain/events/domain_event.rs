//! Domain event envelope, payload variants, and pub/sub ports.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// An immutable fact that occurred in the domain.
///
/// The envelope fields are generated at construction; once published an
/// event is never retracted.
#[derive(Debug, Clone, Serialize)]
pub struct DomainEvent {
    /// Unique event identity
    pub event_id: Uuid,

    /// When the event was constructed
    pub occurred_at: DateTime<Utc>,

    /// The entity this event concerns (absent for events about
    /// not-yet-persisted aggregates)
    pub aggregate_id: Option<i64>,

    /// What happened
    #[serde(flatten)]
    pub payload: EventPayload,
}

impl DomainEvent {
    pub fn new(aggregate_id: Option<i64>, payload: EventPayload) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            aggregate_id,
            payload,
        }
    }

    pub fn kind(&self) -> EventKind {
        self.payload.kind()
    }
}

/// Concrete event variants.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventPayload {
    UserCreated {
        username: String,
        email: String,
    },
    UserUpdated {
        user_id: i64,
        /// Field names that changed, in call order
        updated_fields: Vec<String>,
    },
    UserActivated {
        user_id: i64,
    },
    UserDeactivated {
        user_id: i64,
    },
    PasswordChanged {
        user_id: i64,
    },
}

impl EventPayload {
    pub fn kind(&self) -> EventKind {
        match self {
            Self::UserCreated { .. } => EventKind::UserCreated,
            Self::UserUpdated { .. } => EventKind::UserUpdated,
            Self::UserActivated { .. } => EventKind::UserActivated,
            Self::UserDeactivated { .. } => EventKind::UserDeactivated,
            Self::PasswordChanged { .. } => EventKind::PasswordChanged,
        }
    }
}

/// Payload discriminant, used to key type-specific subscriptions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    UserCreated,
    UserUpdated,
    UserActivated,
    UserDeactivated,
    PasswordChanged,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UserCreated => "user_created",
            Self::UserUpdated => "user_updated",
            Self::UserActivated => "user_activated",
            Self::UserDeactivated => "user_deactivated",
            Self::PasswordChanged => "password_changed",
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Port for publishing domain events.
///
/// Publishing is best-effort and never fails: subscriber failures are
/// contained by the implementation and must not reach the publisher.
#[async_trait]
pub trait EventPublisher: Send + Sync {
    async fn publish(&self, event: DomainEvent);
}

/// A subscriber to domain events.
///
/// Handlers perform fire-and-forget side effects (notifications, audit).
/// A returned error is logged by the bus and never interrupts delivery to
/// later handlers.
#[async_trait]
pub trait EventHandler: Send + Sync {
    /// Handler name used in dispatch logging.
    fn name(&self) -> &'static str;

    async fn handle(&self, event: &DomainEvent) -> anyhow::Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_envelope_is_generated_at_construction() {
        let a = DomainEvent::new(Some(1), EventPayload::UserActivated { user_id: 1 });
        let b = DomainEvent::new(Some(1), EventPayload::UserActivated { user_id: 1 });

        assert_ne!(a.event_id, b.event_id);
        assert_eq!(a.aggregate_id, Some(1));
        assert!(a.occurred_at <= Utc::now());
    }

    #[test]
    fn test_payload_kind_matches_variant() {
        let payload = EventPayload::UserCreated {
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
        };
        assert_eq!(payload.kind(), EventKind::UserCreated);

        let payload = EventPayload::UserUpdated {
            user_id: 7,
            updated_fields: vec!["first_name".to_string()],
        };
        assert_eq!(payload.kind(), EventKind::UserUpdated);
    }

    #[test]
    fn test_event_serializes_with_tagged_payload() {
        let event = DomainEvent::new(Some(9), EventPayload::PasswordChanged { user_id: 9 });
        let json = serde_json::to_value(&event).unwrap();

        assert_eq!(json["type"], "password_changed");
        assert_eq!(json["user_id"], 9);
        assert_eq!(json["aggregate_id"], 9);
    }
}
