use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EventStoreError, TypeKey};

/// Globally unique identity of a domain event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(Uuid);

impl EventId {
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Random identifier.
    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }

    /// Time-ordered identifier, sorts by creation time.
    pub fn new_v7() -> Self {
        Self(Uuid::now_v7())
    }

    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl From<Uuid> for EventId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl From<EventId> for Uuid {
    fn from(id: EventId) -> Self {
        id.0
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for EventId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// Capability shared by every domain event: a stable, unique identity.
pub trait IdentifiedEvent: Send + Sync + 'static {
    /// Identifier fixed when the event was constructed.
    fn id(&self) -> EventId;

    /// Descriptor of the concrete type, also through `dyn IdentifiedEvent`.
    fn type_key(&self) -> TypeKey {
        TypeKey::of::<Self>()
    }
}

/// Base record embedded by concrete events.
///
/// The identifier is supplied by the caller and cannot change after
/// construction. The registry binds this type to the name `"Event"`, which
/// every descendant without a name of its own inherits.
///
/// ```ignore
/// struct AccountOpened {
///     event: Event,
///     owner: String,
/// }
///
/// impl IdentifiedEvent for AccountOpened {
///     fn id(&self) -> EventId {
///         self.event.id()
///     }
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Event {
    id: EventId,
}

impl Event {
    /// Name bound to the base event type.
    pub const NAME: &'static str = "Event";

    pub const fn new(id: EventId) -> Self {
        Self { id }
    }

    /// Like [`Event::new`], but refuses the nil UUID.
    pub fn try_new(id: EventId) -> Result<Self, EventStoreError> {
        if id.is_nil() {
            return Err(EventStoreError::NilEventId);
        }
        Ok(Self { id })
    }
}

impl IdentifiedEvent for Event {
    fn id(&self) -> EventId {
        self.id
    }
}

impl AsRef<Event> for Event {
    fn as_ref(&self) -> &Event {
        self
    }
}
