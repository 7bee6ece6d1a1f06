//! # Cleanup Module
//!
//! Deletes the files marked during review. A failed removal is reported
//! and skipped; the rest of the list is still processed.

use serde::Serialize;
use std::fs;
use std::path::PathBuf;
use tracing::{info, warn};

/// Result of removing one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeletionOutcome {
    Deleted(PathBuf),
    Failed { path: PathBuf, error: String },
}

/// Totals for a deletion pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CleanupReport {
    pub deleted: usize,
    pub failed: usize,
}

impl CleanupReport {
    fn record(&mut self, outcome: &DeletionOutcome) {
        match outcome {
            DeletionOutcome::Deleted(_) => self.deleted += 1,
            DeletionOutcome::Failed { .. } => self.failed += 1,
        }
    }
}

/// Remove every path in order, reporting each outcome through `on_outcome`
pub fn delete_marked<I, F>(paths: I, mut on_outcome: F) -> CleanupReport
where
    I: IntoIterator<Item = PathBuf>,
    F: FnMut(&DeletionOutcome),
{
    let mut report = CleanupReport::default();

    for path in paths {
        let outcome = match fs::remove_file(&path) {
            Ok(()) => DeletionOutcome::Deleted(path),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "could not delete");
                DeletionOutcome::Failed {
                    path,
                    error: e.to_string(),
                }
            }
        };

        report.record(&outcome);
        on_outcome(&outcome);
    }

    info!(deleted = report.deleted, failed = report.failed, "cleanup finished");
    report
}
