//! Process-wide registry, installed once at startup and read-only afterwards.

use once_cell::sync::OnceCell;
use tracing::{info, warn};

use crate::{EventName, EventStoreError, NameRegistry, TypeKey};

static REGISTRY: OnceCell<NameRegistry> = OnceCell::new();

pub fn install(registry: NameRegistry) -> Result<&'static NameRegistry, EventStoreError> {
    let types = registry.len();
    match REGISTRY.try_insert(registry) {
        Ok(installed) => {
            info!(types, "installed global event name registry");
            Ok(installed)
        }
        Err(_) => {
            warn!("global event name registry is already installed, ignoring new one");
            Err(EventStoreError::AlreadyInstalled)
        }
    }
}

pub fn registry() -> Option<&'static NameRegistry> {
    REGISTRY.get()
}

/// Resolves against the installed registry. `None` when nothing is installed.
pub fn resolve<T: ?Sized + 'static>() -> Option<&'static EventName> {
    resolve_key(TypeKey::of::<T>())
}

pub fn resolve_key(key: TypeKey) -> Option<&'static EventName> {
    registry()?.resolve_key(key)
}
