//! Identified domain events and the binding of external names to event types.
//!
//! Every event embeds an [`Event`] carrying its [`EventId`]. Names are bound
//! to types in a [`NameRegistry`] and inherited along explicitly declared
//! parent links, so collaborators such as stores and buses can refer to
//! events by a stable name instead of the Rust type name.

pub use error::EventStoreError;
pub use event::{Event, EventId, IdentifiedEvent};
pub use name::{EventName, NamedEvent, TypeKey};
pub use registry::{CatalogEntry, NameRegistry, NameRegistryBuilder, Resolution};

mod error;
mod event;
pub mod global;
mod name;
mod registry;
