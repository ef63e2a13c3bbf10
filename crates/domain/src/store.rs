//! Entity store
//!
//! Ordered, single-writer collections of one record kind. Every mutation
//! runs synchronously to completion, so a reader never observes a partial
//! update. Nothing is persisted: a process restart reseeds the collections.
//!
//! [`EntityStore`] is the seam where a real persistence layer can replace
//! [`InMemoryStore`] without touching the registries built on top of it.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A record with a stable identity and a partial-update shape.
pub trait Entity: Clone {
    /// Identity type
    type Id: PartialEq + Clone + fmt::Display;

    /// Partial field update merged by [`EntityStore::update`]
    type Patch;

    /// Human-readable kind used in logs and not-found errors
    const KIND: &'static str;

    /// Identity of this record
    fn id(&self) -> &Self::Id;

    /// Merge a partial update into this record
    fn apply_patch(&mut self, patch: Self::Patch);
}

/// Storage interface for one entity kind.
pub trait EntityStore<T: Entity> {
    /// All records in insertion order
    fn all(&self) -> &[T];

    /// Append a record
    fn add(&mut self, record: T);

    /// Merge `patch` into the matching record. Unknown ids are a no-op;
    /// the return value reports whether a record was touched.
    fn update(&mut self, id: &T::Id, patch: T::Patch) -> bool;

    /// Apply an arbitrary in-place mutation to the matching record
    fn modify<F: FnOnce(&mut T)>(&mut self, id: &T::Id, f: F) -> bool;

    /// Apply a mutation to every record in one pass
    fn modify_all<F: FnMut(&mut T)>(&mut self, f: F);

    /// Remove the matching record. Idempotent; returns whether a record was removed.
    fn remove(&mut self, id: &T::Id) -> bool;

    /// Look up a record; `None` is the not-found signal
    fn find(&self, id: &T::Id) -> Option<&T>;

    /// Number of records
    fn len(&self) -> usize {
        self.all().len()
    }

    /// True when the store holds no records
    fn is_empty(&self) -> bool {
        self.all().is_empty()
    }
}

/// Vec-backed store preserving insertion order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InMemoryStore<T> {
    records: Vec<T>,
}

impl<T> InMemoryStore<T> {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Create a store with constructor-provided initial state
    pub fn with_records(records: Vec<T>) -> Self {
        Self { records }
    }
}

impl<T> Default for InMemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Entity> EntityStore<T> for InMemoryStore<T> {
    fn all(&self) -> &[T] {
        &self.records
    }

    fn add(&mut self, record: T) {
        tracing::debug!(kind = T::KIND, id = %record.id(), "record added");
        self.records.push(record);
    }

    fn update(&mut self, id: &T::Id, patch: T::Patch) -> bool {
        self.modify(id, |record| record.apply_patch(patch))
    }

    fn modify<F: FnOnce(&mut T)>(&mut self, id: &T::Id, f: F) -> bool {
        match self.records.iter_mut().find(|record| record.id() == id) {
            Some(record) => {
                f(record);
                tracing::debug!(kind = T::KIND, id = %id, "record updated");
                true
            }
            None => {
                tracing::debug!(kind = T::KIND, id = %id, "update ignored, no such record");
                false
            }
        }
    }

    fn modify_all<F: FnMut(&mut T)>(&mut self, f: F) {
        self.records.iter_mut().for_each(f);
    }

    fn remove(&mut self, id: &T::Id) -> bool {
        let before = self.records.len();
        self.records.retain(|record| record.id() != id);
        let removed = self.records.len() != before;
        if removed {
            tracing::debug!(kind = T::KIND, id = %id, "record removed");
        }
        removed
    }

    fn find(&self, id: &T::Id) -> Option<&T> {
        self.records.iter().find(|record| record.id() == id)
    }
}
