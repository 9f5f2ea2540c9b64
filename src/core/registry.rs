//! # Handler registry.
//!
//! Maps an [`EventName`] (or the wildcard) to the handlers registered for it.
//!
//! ## Rules
//! - Registration appends; insertion order is preserved per identity.
//! - No duplicate detection: a handler registered twice is dispatched twice.
//! - No removal: the registry only grows for the lifetime of the bus.
//! - Lookup returns identity-specific handlers first, then wildcard handlers.

use std::collections::HashMap;

use parking_lot::RwLock;

use crate::events::EventName;
use crate::handlers::HandlerRef;

/// Thread-safe registry of handlers by event identity.
#[derive(Default)]
pub struct Registry {
    handlers: RwLock<HashMap<EventName, Vec<HandlerRef>>>,
}

impl Registry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `handlers` to the sequence registered under `name`.
    pub fn register(&self, name: EventName, handlers: impl IntoIterator<Item = HandlerRef>) {
        self.handlers
            .write()
            .entry(name)
            .or_default()
            .extend(handlers);
    }

    /// Handlers for `name` followed by wildcard handlers.
    ///
    /// Looking up the wildcard itself returns the wildcard handlers once.
    pub fn lookup(&self, name: &EventName) -> Vec<HandlerRef> {
        let handlers = self.handlers.read();
        let wildcard = handlers.get(&EventName::WILDCARD);
        if name.is_wildcard() {
            return wildcard.cloned().unwrap_or_default();
        }

        handlers
            .get(name)
            .into_iter()
            .chain(wildcard)
            .flatten()
            .cloned()
            .collect()
    }

    /// Number of handlers registered directly under `name`.
    pub fn len(&self, name: &EventName) -> usize {
        self.handlers.read().get(name).map_or(0, Vec::len)
    }

    /// Returns sorted list of identities with at least one handler.
    pub fn identities(&self) -> Vec<EventName> {
        let handlers = self.handlers.read();
        let mut names: Vec<EventName> = handlers
            .iter()
            .filter(|(_, hs)| !hs.is_empty())
            .map(|(name, _)| name.clone())
            .collect();
        names.sort_unstable();
        names
    }
}
