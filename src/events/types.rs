//! Progress event definitions.

use serde::{Deserialize, Serialize};

/// One unit of pipeline telemetry.
///
/// Every stage reports into the same stream; the display folds the events
/// into [`ProgressCounters`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProgressEvent {
    /// The scanner visited a directory entry
    FileFound,
    /// The scanner queued a subdirectory for traversal
    FolderScanned,
    /// The scanner recognized an entry as a supported image
    ImageFound,
    /// The hasher finished checksumming a file
    FileHashed,
    /// The hasher found a file whose checksum was already recorded
    DuplicateFound,
    /// An aggregator worker rendered a preview thumbnail
    ImageConverted,
    /// All stages finished; always the last event of a successful scan
    Done,
}

/// Running totals folded from the progress stream
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressCounters {
    pub files_found: usize,
    pub folders_scanned: usize,
    pub images_found: usize,
    pub files_hashed: usize,
    pub duplicates_found: usize,
    pub images_converted: usize,
    pub done: bool,
}

impl ProgressCounters {
    /// Fold a single event into the totals
    pub fn apply(&mut self, event: ProgressEvent) {
        match event {
            ProgressEvent::FileFound => self.files_found += 1,
            ProgressEvent::FolderScanned => self.folders_scanned += 1,
            ProgressEvent::ImageFound => self.images_found += 1,
            ProgressEvent::FileHashed => self.files_hashed += 1,
            ProgressEvent::DuplicateFound => self.duplicates_found += 1,
            ProgressEvent::ImageConverted => self.images_converted += 1,
            ProgressEvent::Done => self.done = true,
        }
    }

    /// True when no counter in `self` is behind `earlier`
    pub fn dominates(&self, earlier: &ProgressCounters) -> bool {
        self.files_found >= earlier.files_found
            && self.folders_scanned >= earlier.folders_scanned
            && self.images_found >= earlier.images_found
            && self.files_hashed >= earlier.files_hashed
            && self.duplicates_found >= earlier.duplicates_found
            && self.images_converted >= earlier.images_converted
            && (self.done || !earlier.done)
    }
}

impl std::fmt::Display for ProgressCounters {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} folders scanned, {} files found, {} images found, {} images hashed, {} duplicates found, {} images converted",
            self.folders_scanned,
            self.files_found,
            self.images_found,
            self.files_hashed,
            self.duplicates_found,
            self.images_converted
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_fold_each_event_kind() {
        let mut counters = ProgressCounters::default();
        for event in [
            ProgressEvent::FileFound,
            ProgressEvent::FileFound,
            ProgressEvent::FolderScanned,
            ProgressEvent::ImageFound,
            ProgressEvent::FileHashed,
            ProgressEvent::DuplicateFound,
            ProgressEvent::ImageConverted,
        ] {
            counters.apply(event);
        }

        assert_eq!(counters.files_found, 2);
        assert_eq!(counters.folders_scanned, 1);
        assert_eq!(counters.images_found, 1);
        assert_eq!(counters.files_hashed, 1);
        assert_eq!(counters.duplicates_found, 1);
        assert_eq!(counters.images_converted, 1);
        assert!(!counters.done);

        counters.apply(ProgressEvent::Done);
        assert!(counters.done);
    }

    #[test]
    fn later_counters_dominate_earlier_ones() {
        let earlier = ProgressCounters::default();
        let mut later = earlier;
        later.apply(ProgressEvent::FileFound);

        assert!(later.dominates(&earlier));
        assert!(!earlier.dominates(&later));
    }

    #[test]
    fn events_are_serializable() {
        let json = serde_json::to_string(&ProgressEvent::DuplicateFound).unwrap();
        let back: ProgressEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ProgressEvent::DuplicateFound);
    }
}
