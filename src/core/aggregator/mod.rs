//! # Aggregator Module
//!
//! Merges duplicate relationships into duplicate-sets with a fixed pool
//! of worker threads.
//!
//! ## Rendering
//! The worker that creates a set renders its canonical preview, outside
//! the table lock so other workers keep appending meanwhile. Creation is
//! an insert-if-absent under the lock, so each set is rendered exactly
//! once however many duplicates it collects.

mod set;
mod table;

pub use set::DuplicateSet;
pub use table::{DuplicateTable, Insertion};

use crate::core::hasher::DuplicateRelationship;
use crate::core::thumbnail::Thumbnailer;
use crate::error::DedupError;
use crate::events::{EventSender, ProgressEvent};
use crossbeam_channel::Receiver;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use tracing::{debug, warn};

/// Threads left for the scanner, hasher and display
const RESERVED_THREADS: usize = 3;

/// Pool size derived from host parallelism, never below one
pub fn default_worker_count() -> usize {
    thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
        .saturating_sub(RESERVED_THREADS)
        .max(1)
}

/// Aggregator stage: the worker pool and its shared table
pub struct Aggregator {
    workers: usize,
    thumbnailer: Arc<dyn Thumbnailer>,
}

impl Aggregator {
    pub fn new(workers: usize, thumbnailer: Arc<dyn Thumbnailer>) -> Self {
        Self {
            workers: workers.max(1),
            thumbnailer,
        }
    }

    /// Drain `relationships` with the pool and return the finished sets.
    ///
    /// The first worker error stops the pool and is returned instead of the
    /// sets. The receiver is dropped either way so upstream stages unblock.
    /// Announcing [`ProgressEvent::Done`] is left to the caller, which knows
    /// whether the upstream stages succeeded.
    pub fn run(
        &self,
        relationships: Receiver<DuplicateRelationship>,
        events: &EventSender,
    ) -> Result<Vec<DuplicateSet>, DedupError> {
        let table = DuplicateTable::new();
        let abort = AtomicBool::new(false);

        let results: Vec<Result<usize, DedupError>> = thread::scope(|scope| {
            let handles: Vec<_> = (0..self.workers)
                .map(|_| {
                    let relationships = relationships.clone();
                    let events = events.clone();
                    let table = &table;
                    let abort = &abort;
                    scope.spawn(move || {
                        let result = self.work(&relationships, table, &events, abort);
                        if result.is_err() {
                            abort.store(true, Ordering::SeqCst);
                        }
                        result
                    })
                })
                .collect();

            handles
                .into_iter()
                .map(|handle| {
                    handle.join().unwrap_or(Err(DedupError::StagePanicked {
                        stage: "aggregator",
                    }))
                })
                .collect()
        });
        drop(relationships);

        let mut rendered = 0;
        for result in results {
            match result {
                Ok(count) => rendered += count,
                Err(e) => {
                    warn!(error = %e, "aggregator worker failed");
                    return Err(e);
                }
            }
        }

        let sets = table.into_sets()?;
        debug!(sets = sets.len(), rendered, "aggregation finished");

        Ok(sets)
    }

    fn work(
        &self,
        relationships: &Receiver<DuplicateRelationship>,
        table: &DuplicateTable,
        events: &EventSender,
        abort: &AtomicBool,
    ) -> Result<usize, DedupError> {
        let mut rendered = 0;

        for relationship in relationships.iter() {
            if abort.load(Ordering::SeqCst) {
                break;
            }

            if table.insert(&relationship)? == Insertion::Created {
                let thumbnail = self.thumbnailer.render(&relationship.canonical)?;
                events.send(ProgressEvent::ImageConverted);
                table.store_thumbnail(&relationship.canonical, thumbnail)?;
                rendered += 1;
            }
        }

        Ok(rendered)
    }
}
