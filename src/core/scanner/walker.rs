//! Breadth-first directory traversal.

use super::filter::ImageFilter;
use crate::error::ScanError;
use crate::events::{EventSender, ProgressEvent};
use crossbeam_channel::Sender;
use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Configuration for the directory scanner
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Whether to descend into subdirectories
    pub recursive: bool,
    /// Custom extensions to include (None = use defaults)
    pub extensions: Option<Vec<String>>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            recursive: true,
            extensions: None,
        }
    }
}

/// Totals gathered by one traversal
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanSummary {
    /// Directory entries visited (files and folders)
    pub entries: usize,
    /// Subdirectories queued for traversal
    pub folders: usize,
    /// Entries forwarded to the hasher
    pub images: usize,
}

/// Scanner stage: walks a tree with an explicit pending-directory queue
pub struct BreadthFirstScanner {
    config: ScanConfig,
    filter: ImageFilter,
}

impl BreadthFirstScanner {
    /// Create a new scanner with the given configuration
    pub fn new(config: ScanConfig) -> Self {
        let mut filter = ImageFilter::new();

        if let Some(ref extensions) = config.extensions {
            filter = filter.with_extensions(extensions.clone());
        }

        Self { config, filter }
    }

    /// Walk `root`, forwarding candidate images into `candidates`.
    ///
    /// Any directory that cannot be read aborts the walk. If the receiving
    /// side of `candidates` is gone the walk ends early without error.
    /// The caller closes the hasher's input by dropping its sender.
    pub fn run(
        &self,
        root: &Path,
        candidates: &Sender<PathBuf>,
        events: &EventSender,
    ) -> Result<ScanSummary, ScanError> {
        if !root.is_dir() {
            return Err(ScanError::DirectoryNotFound {
                path: root.to_path_buf(),
            });
        }

        let mut pending = VecDeque::from([root.to_path_buf()]);
        let mut summary = ScanSummary::default();

        while let Some(dir) = pending.pop_front() {
            for entry in read_sorted(&dir)? {
                let path = entry.path();
                let file_type = entry.file_type().map_err(|source| ScanError::ReadDirectory {
                    path: path.clone(),
                    source,
                })?;

                summary.entries += 1;
                events.send(ProgressEvent::FileFound);

                if file_type.is_dir() {
                    if self.config.recursive {
                        summary.folders += 1;
                        events.send(ProgressEvent::FolderScanned);
                        pending.push_back(path);
                    }
                    continue;
                }

                if !self.filter.should_include(&path) {
                    continue;
                }

                summary.images += 1;
                events.send(ProgressEvent::ImageFound);

                if candidates.send(path).is_err() {
                    debug!("hasher stopped listening, ending scan early");
                    return Ok(summary);
                }
            }
        }

        debug!(
            entries = summary.entries,
            folders = summary.folders,
            images = summary.images,
            "scan finished"
        );

        Ok(summary)
    }
}

/// List a directory's entries in file-name order
fn read_sorted(dir: &Path) -> Result<Vec<fs::DirEntry>, ScanError> {
    let read_error = |source| ScanError::ReadDirectory {
        path: dir.to_path_buf(),
        source,
    };

    let mut entries = fs::read_dir(dir)
        .map_err(read_error)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(read_error)?;

    entries.sort_by_key(|entry| entry.file_name());
    Ok(entries)
}
