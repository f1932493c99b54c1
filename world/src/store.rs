//! Identifier-addressed storage for streamed entities.

use std::collections::BTreeMap;

use omega_squirrel_core::{GrassId, RivalId};

/// Identifier types that the store can allocate.
pub(crate) trait EntityId: Copy + Ord {
    /// Wraps a freshly allocated raw identifier.
    fn from_raw(raw: u32) -> Self;
}

impl EntityId for RivalId {
    fn from_raw(raw: u32) -> Self {
        RivalId::new(raw)
    }
}

impl EntityId for GrassId {
    fn from_raw(raw: u32) -> Self {
        GrassId::new(raw)
    }
}

/// Registry that stores entities of one kind and manages identifier allocation.
///
/// Identifiers grow monotonically and are never reused within a session, so a
/// stale identifier simply resolves to nothing. Iteration follows spawn order.
#[derive(Debug)]
pub(crate) struct EntityStore<I, T> {
    entries: BTreeMap<I, T>,
    next_id: u32,
}

impl<I: EntityId, T> EntityStore<I, T> {
    /// Creates an empty store with a reset identifier counter.
    pub(crate) fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
            next_id: 0,
        }
    }

    /// Stores a new entity and returns the identifier allocated for it.
    pub(crate) fn insert(&mut self, value: T) -> I {
        let id = I::from_raw(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        let _ = self.entries.insert(id, value);
        id
    }

    /// Removes the entity, returning it if it was still alive.
    pub(crate) fn remove(&mut self, id: I) -> Option<T> {
        self.entries.remove(&id)
    }

    pub(crate) fn get(&self, id: I) -> Option<&T> {
        self.entries.get(&id)
    }

    pub(crate) fn get_mut(&mut self, id: I) -> Option<&mut T> {
        self.entries.get_mut(&id)
    }

    /// Iterates live entities in spawn order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = (I, &T)> {
        self.entries.iter().map(|(id, value)| (*id, value))
    }

    pub(crate) fn values_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.entries.values_mut()
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}
