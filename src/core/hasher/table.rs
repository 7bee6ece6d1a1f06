//! The hasher's first-seen table.

use super::checksum::files_identical;
use crate::error::HashError;
use serde::{Deserialize, Serialize};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// How a checksum collision is turned into a duplicate verdict
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChecksumMode {
    /// Equal checksums mean equal contents
    #[default]
    ChecksumOnly,
    /// Equal checksums are confirmed with a byte-for-byte comparison
    ByteCompare,
}

/// Maps a checksum to the canonical path(s) first seen with it.
///
/// Append-only: the first path recorded under a key stays first for the
/// whole run. Under [`ChecksumMode::ByteCompare`] a file that collides
/// without matching any recorded canonical becomes an additional canonical
/// under the same key.
#[derive(Debug, Default)]
pub struct ChecksumTable {
    mode: ChecksumMode,
    entries: HashMap<u32, Vec<PathBuf>>,
}

impl ChecksumTable {
    pub fn new(mode: ChecksumMode) -> Self {
        Self {
            mode,
            entries: HashMap::new(),
        }
    }

    /// Record `path` under `checksum`.
    ///
    /// Returns the canonical path it duplicates, or `None` when `path` is
    /// the first of its kind.
    pub fn record(&mut self, checksum: u32, path: &Path) -> Result<Option<PathBuf>, HashError> {
        let canonicals = match self.entries.entry(checksum) {
            Entry::Vacant(slot) => {
                slot.insert(vec![path.to_path_buf()]);
                return Ok(None);
            }
            Entry::Occupied(slot) => slot.into_mut(),
        };

        match self.mode {
            ChecksumMode::ChecksumOnly => Ok(Some(canonicals[0].clone())),
            ChecksumMode::ByteCompare => {
                for canonical in canonicals.iter() {
                    if files_identical(path, canonical)? {
                        return Ok(Some(canonical.clone()));
                    }
                }
                canonicals.push(path.to_path_buf());
                Ok(None)
            }
        }
    }

    /// The first path recorded under `checksum`
    pub fn canonical(&self, checksum: u32) -> Option<&Path> {
        self.entries
            .get(&checksum)
            .and_then(|paths| paths.first())
            .map(PathBuf::as_path)
    }

    /// Number of distinct checksums recorded
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
