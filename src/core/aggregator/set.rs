//! Duplicate-set type shared by the aggregator and the review screen.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// A canonical file and every file found to duplicate it.
///
/// `paths[0]` is always the canonical path; the rest follow in the order
/// the aggregator received them. The member list only grows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicateSet {
    paths: Vec<PathBuf>,
    #[serde(skip)]
    thumbnail: Option<Vec<u8>>,
    #[serde(skip)]
    cursor: usize,
}

impl DuplicateSet {
    /// Start a set whose only member is the canonical path
    pub fn new(canonical: PathBuf) -> Self {
        Self {
            paths: vec![canonical],
            thumbnail: None,
            cursor: 0,
        }
    }

    /// Build a set from an ordered member list; `None` when empty
    pub fn from_paths(paths: Vec<PathBuf>) -> Option<Self> {
        let mut members = paths.into_iter();
        let mut set = Self::new(members.next()?);
        members.for_each(|path| set.push(path));
        Some(set)
    }

    pub(crate) fn push(&mut self, duplicate: PathBuf) {
        self.paths.push(duplicate);
    }

    pub(crate) fn set_thumbnail(&mut self, bytes: Vec<u8>) {
        self.thumbnail = Some(bytes);
    }

    pub fn canonical(&self) -> &Path {
        &self.paths[0]
    }

    /// Members other than the canonical path
    pub fn duplicates(&self) -> &[PathBuf] {
        &self.paths[1..]
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Always false; a set holds at least its canonical path
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Rendered preview, once a worker has stored it
    pub fn thumbnail(&self) -> Option<&[u8]> {
        self.thumbnail.as_deref()
    }

    /// Index of the member highlighted in the review screen
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn selected(&self) -> &Path {
        &self.paths[self.cursor]
    }

    /// Move the highlight down, wrapping to the top
    pub fn select_next(&mut self) {
        self.cursor = (self.cursor + 1) % self.paths.len();
    }

    /// Move the highlight up, wrapping to the bottom
    pub fn select_previous(&mut self) {
        self.cursor = self
            .cursor
            .checked_sub(1)
            .unwrap_or(self.paths.len() - 1);
    }
}
