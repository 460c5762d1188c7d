use std::collections::{BTreeSet, HashMap, HashSet};

use dashmap::DashMap;
use serde::Serialize;
use tracing::{debug, trace};

use crate::{Event, EventName, EventStoreError, IdentifiedEvent, NamedEvent, TypeKey};

/// Collects name declarations and parent links before freezing them into a
/// [`NameRegistry`].
///
/// A new builder already knows the base [`Event`] and its name `"Event"`.
///
/// ```ignore
/// let registry = NameRegistry::builder()
///     .named_event::<AccountOpened>()?
///     .event::<AuditEntry>()?
///     .build()?;
/// ```
#[derive(Debug, Clone)]
pub struct NameRegistryBuilder {
    names: HashMap<TypeKey, EventName>,
    parents: HashMap<TypeKey, TypeKey>,
    known: HashSet<TypeKey>,
}

impl Default for NameRegistryBuilder {
    fn default() -> Self {
        let base = TypeKey::of::<Event>();
        let mut names = HashMap::new();
        names.insert(base, EventName(Event::NAME.to_string()));
        Self {
            names,
            parents: HashMap::new(),
            known: HashSet::from([base]),
        }
    }
}

impl NameRegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `name` to `T`. Re-declaring the same name is a no-op.
    pub fn declare<T: ?Sized + 'static>(
        self,
        name: impl Into<String>,
    ) -> Result<Self, EventStoreError> {
        self.declare_key(TypeKey::of::<T>(), name)
    }

    pub fn declare_key(
        mut self,
        key: TypeKey,
        name: impl Into<String>,
    ) -> Result<Self, EventStoreError> {
        let name = EventName::new(name)?;
        if let Some(existing) = self.names.get(&key) {
            if *existing != name {
                return Err(EventStoreError::ConflictingName {
                    type_name: key.type_name(),
                    existing: existing.to_string(),
                    requested: name.to_string(),
                });
            }
            return Ok(self);
        }
        self.known.insert(key);
        self.names.insert(key, name);
        Ok(self)
    }

    /// Registers the name `T` declares through [`NamedEvent`].
    pub fn named<T: NamedEvent>(self) -> Result<Self, EventStoreError> {
        self.declare::<T>(T::NAME)
    }

    /// Records `Parent` as the single parent of `Child`.
    pub fn extends<Child, Parent>(self) -> Result<Self, EventStoreError>
    where
        Child: ?Sized + 'static,
        Parent: ?Sized + 'static,
    {
        self.extends_key(TypeKey::of::<Child>(), TypeKey::of::<Parent>())
    }

    pub fn extends_key(mut self, child: TypeKey, parent: TypeKey) -> Result<Self, EventStoreError> {
        if let Some(existing) = self.parents.get(&child) {
            if *existing != parent {
                return Err(EventStoreError::ConflictingParent {
                    type_name: child.type_name(),
                    existing: existing.type_name(),
                    requested: parent.type_name(),
                });
            }
            return Ok(self);
        }
        if child == parent {
            return Err(EventStoreError::CyclicHierarchy {
                type_name: child.type_name(),
            });
        }
        self.known.insert(child);
        self.known.insert(parent);
        self.parents.insert(child, parent);
        Ok(self)
    }

    /// Registers `T` as a direct descendant of the base [`Event`].
    pub fn event<T: IdentifiedEvent>(self) -> Result<Self, EventStoreError> {
        self.extends::<T, Event>()
    }

    /// Registers `T` as a descendant of [`Event`] carrying its own name.
    pub fn named_event<T: NamedEvent + IdentifiedEvent>(self) -> Result<Self, EventStoreError> {
        self.event::<T>()?.named::<T>()
    }

    /// Freezes the declarations.
    ///
    /// Fails if two types share a name or if parent links form a cycle.
    pub fn build(self) -> Result<NameRegistry, EventStoreError> {
        let declared: BTreeSet<TypeKey> = self.names.keys().copied().collect();
        let mut by_name: HashMap<EventName, TypeKey> = HashMap::with_capacity(self.names.len());
        for key in &declared {
            let name = &self.names[key];
            if let Some(first) = by_name.get(name) {
                return Err(EventStoreError::DuplicateName {
                    name: name.to_string(),
                    first: first.type_name(),
                    second: key.type_name(),
                });
            }
            by_name.insert(name.clone(), *key);
        }

        let linked: BTreeSet<TypeKey> = self.parents.keys().copied().collect();
        for start in &linked {
            let mut seen = HashSet::from([*start]);
            let mut cursor = self.parents.get(start);
            while let Some(parent) = cursor {
                if !seen.insert(*parent) {
                    return Err(EventStoreError::CyclicHierarchy {
                        type_name: start.type_name(),
                    });
                }
                cursor = self.parents.get(parent);
            }
        }

        debug!(
            types = self.known.len(),
            names = self.names.len(),
            links = self.parents.len(),
            "built event name registry"
        );

        Ok(NameRegistry {
            names: self.names,
            parents: self.parents,
            by_name,
            known: self.known,
            resolved: DashMap::new(),
        })
    }
}

/// Outcome of a successful name resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution<'a> {
    pub name: &'a EventName,
    /// Type carrying the declaration; differs from the requested type when the
    /// name was inherited.
    pub declared_by: TypeKey,
}

impl Resolution<'_> {
    pub fn is_inherited(&self, requested: TypeKey) -> bool {
        self.declared_by != requested
    }
}

/// One row of [`NameRegistry::catalog`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogEntry {
    pub type_name: &'static str,
    pub name: Option<EventName>,
    pub declared_by: Option<&'static str>,
    pub inherited: bool,
}

/// Read-only mapping from event types to their external names.
///
/// Lookups walk the parent chain from the requested type towards the root and
/// stop at the first type with a direct declaration. A type with no declaring
/// ancestor has no name.
#[derive(Debug)]
pub struct NameRegistry {
    names: HashMap<TypeKey, EventName>,
    parents: HashMap<TypeKey, TypeKey>,
    by_name: HashMap<EventName, TypeKey>,
    known: HashSet<TypeKey>,
    // requested type -> declaring type, None when nothing in the chain is named
    resolved: DashMap<TypeKey, Option<TypeKey>>,
}

impl NameRegistry {
    pub fn builder() -> NameRegistryBuilder {
        NameRegistryBuilder::default()
    }

    pub fn resolve<T: ?Sized + 'static>(&self) -> Option<&EventName> {
        self.resolve_key(TypeKey::of::<T>())
    }

    pub fn resolve_key(&self, key: TypeKey) -> Option<&EventName> {
        self.resolve_origin(key).map(|resolution| resolution.name)
    }

    /// Name of the concrete type of `event`, including events behind
    /// `dyn IdentifiedEvent`.
    pub fn resolve_event<E: IdentifiedEvent + ?Sized>(&self, event: &E) -> Option<&EventName> {
        self.resolve_key(event.type_key())
    }

    pub fn resolve_origin(&self, key: TypeKey) -> Option<Resolution<'_>> {
        let cached = self.resolved.get(&key).map(|hit| *hit);
        let declared_by = match cached {
            Some(found) => found,
            None => {
                let found = self.find_declaring(key);
                self.resolved.insert(key, found);
                found
            }
        };
        let declared_by = declared_by?;
        let name = self.names.get(&declared_by)?;
        trace!(requested = %key, declared_by = %declared_by, name = %name, "resolved event name");
        Some(Resolution { name, declared_by })
    }

    fn find_declaring(&self, key: TypeKey) -> Option<TypeKey> {
        std::iter::once(key)
            .chain(self.ancestors(key))
            .find(|candidate| self.names.contains_key(candidate))
    }

    /// Parent chain of `key`, nearest ancestor first. Excludes `key` itself.
    pub fn ancestors(&self, key: TypeKey) -> Vec<TypeKey> {
        let mut chain = Vec::new();
        let mut cursor = self.parents.get(&key);
        while let Some(parent) = cursor {
            chain.push(*parent);
            cursor = self.parents.get(parent);
        }
        chain
    }

    /// Type that directly declares `name`. Types inheriting it are not
    /// returned.
    pub fn type_for(&self, name: &str) -> Option<TypeKey> {
        self.by_name.get(name).copied()
    }

    pub fn contains<T: ?Sized + 'static>(&self) -> bool {
        self.known.contains(&TypeKey::of::<T>())
    }

    pub fn len(&self) -> usize {
        self.known.len()
    }

    pub fn is_empty(&self) -> bool {
        self.known.is_empty()
    }

    /// Every known type with its resolved name, ordered by type name.
    pub fn catalog(&self) -> Vec<CatalogEntry> {
        let ordered: BTreeSet<TypeKey> = self.known.iter().copied().collect();
        ordered
            .into_iter()
            .map(|key| match self.resolve_origin(key) {
                Some(resolution) => CatalogEntry {
                    type_name: key.type_name(),
                    name: Some(resolution.name.clone()),
                    declared_by: Some(resolution.declared_by.type_name()),
                    inherited: resolution.is_inherited(key),
                },
                None => CatalogEntry {
                    type_name: key.type_name(),
                    name: None,
                    declared_by: None,
                    inherited: false,
                },
            })
            .collect()
    }
}
