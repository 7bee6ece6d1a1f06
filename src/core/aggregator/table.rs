//! The shared duplicate-set table.

use super::DuplicateSet;
use crate::core::hasher::DuplicateRelationship;
use crate::error::AggregateError;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

/// What [`DuplicateTable::insert`] did with a relationship
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Insertion {
    /// First relationship for this canonical path; the caller owns rendering
    Created,
    /// Appended to an existing set
    Appended,
}

/// Duplicate-sets keyed by canonical path, behind one coarse lock
#[derive(Debug, Default)]
pub struct DuplicateTable {
    sets: Mutex<HashMap<PathBuf, DuplicateSet>>,
}

impl DuplicateTable {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<PathBuf, DuplicateSet>>, AggregateError> {
        self.sets.lock().map_err(|_| AggregateError::Poisoned)
    }

    /// Insert-if-absent in a single critical section.
    ///
    /// Exactly one caller per canonical path gets [`Insertion::Created`].
    pub fn insert(&self, relationship: &DuplicateRelationship) -> Result<Insertion, AggregateError> {
        let mut sets = self.lock()?;

        match sets.entry(relationship.canonical.clone()) {
            Entry::Vacant(slot) => {
                let mut set = DuplicateSet::new(relationship.canonical.clone());
                set.push(relationship.duplicate.clone());
                slot.insert(set);
                Ok(Insertion::Created)
            }
            Entry::Occupied(mut slot) => {
                slot.get_mut().push(relationship.duplicate.clone());
                Ok(Insertion::Appended)
            }
        }
    }

    /// Attach a rendered preview to the set for `canonical`
    pub fn store_thumbnail(&self, canonical: &Path, bytes: Vec<u8>) -> Result<(), AggregateError> {
        if let Some(set) = self.lock()?.get_mut(canonical) {
            set.set_thumbnail(bytes);
        }
        Ok(())
    }

    pub fn len(&self) -> Result<usize, AggregateError> {
        Ok(self.lock()?.len())
    }

    pub fn is_empty(&self) -> Result<bool, AggregateError> {
        Ok(self.lock()?.is_empty())
    }

    /// Consume the table, returning sets ordered by canonical path
    pub fn into_sets(self) -> Result<Vec<DuplicateSet>, AggregateError> {
        let sets = self.sets.into_inner().map_err(|_| AggregateError::Poisoned)?;
        let mut sets: Vec<DuplicateSet> = sets.into_values().collect();
        sets.sort_by(|a, b| a.canonical().cmp(b.canonical()));
        Ok(sets)
    }
}
