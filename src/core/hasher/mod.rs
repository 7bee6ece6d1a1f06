//! # Hasher Module
//!
//! Detects byte-identical images by content checksum.
//!
//! ## How It Works
//! 1. Stream each candidate's full contents through xxHash32
//! 2. Look the checksum up in the first-seen [`ChecksumTable`]
//! 3. On a repeat, emit a [`DuplicateRelationship`] pointing at the
//!    first-seen (canonical) path
//!
//! Hashing runs on one thread that owns the table, so lookups and
//! first-seen writes are totally ordered without a lock.
//!
//! ## Example
//! ```rust,ignore
//! use image_dedup::core::hasher::{ChecksumMode, Hasher};
//!
//! let hasher = Hasher::new(ChecksumMode::ChecksumOnly);
//! let summary = hasher.run(&candidates_rx, &relationships_tx, &events)?;
//! ```

mod checksum;
mod table;

pub use checksum::{checksum_bytes, checksum_file, files_identical};
pub use table::{ChecksumMode, ChecksumTable};

use crate::error::HashError;
use crate::events::{EventSender, ProgressEvent};
use crossbeam_channel::{Receiver, Sender};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

/// A file found to duplicate an earlier one
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicateRelationship {
    /// The later arrival
    pub duplicate: PathBuf,
    /// The first path recorded with the same contents
    pub canonical: PathBuf,
}

/// Totals gathered by one hashing pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HashSummary {
    pub hashed: usize,
    pub duplicates: usize,
    pub distinct: usize,
}

/// Hasher stage: consumes candidate paths one at a time
pub struct Hasher {
    mode: ChecksumMode,
}

impl Hasher {
    pub fn new(mode: ChecksumMode) -> Self {
        Self { mode }
    }

    /// Hash every candidate until the scanner closes the channel.
    ///
    /// Unreadable files abort the pass. If the aggregator has stopped
    /// listening the pass ends early without error.
    pub fn run(
        &self,
        candidates: &Receiver<PathBuf>,
        relationships: &Sender<DuplicateRelationship>,
        events: &EventSender,
    ) -> Result<HashSummary, HashError> {
        let mut table = ChecksumTable::new(self.mode);
        let mut summary = HashSummary::default();

        for path in candidates.iter() {
            let checksum = checksum_file(&path)?;
            summary.hashed += 1;
            events.send(ProgressEvent::FileHashed);

            let Some(canonical) = table.record(checksum, &path)? else {
                continue;
            };

            debug!(
                duplicate = %path.display(),
                canonical = %canonical.display(),
                "duplicate found"
            );

            let relationship = DuplicateRelationship {
                duplicate: path,
                canonical,
            };
            if relationships.send(relationship).is_err() {
                debug!("aggregator stopped listening, ending hashing early");
                break;
            }

            summary.duplicates += 1;
            events.send(ProgressEvent::DuplicateFound);
        }

        summary.distinct = table.len();
        debug!(
            hashed = summary.hashed,
            duplicates = summary.duplicates,
            "hashing finished"
        );

        Ok(summary)
    }
}

impl Default for Hasher {
    fn default() -> Self {
        Self::new(ChecksumMode::default())
    }
}
