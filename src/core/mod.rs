//! # Core Module
//!
//! The terminal-agnostic duplicate detection engine.
//!
//! ## Modules
//! - `scanner` - Breadth-first discovery of candidate images
//! - `hasher` - Content checksums and first-seen duplicate detection
//! - `aggregator` - Worker pool merging relationships into duplicate-sets
//! - `thumbnail` - Sixel previews of canonical images
//! - `pipeline` - Runs the stages concurrently and reports progress
//! - `review` - Marking state for the review screen
//! - `cleanup` - Deletes marked files

pub mod aggregator;
pub mod cleanup;
pub mod hasher;
pub mod pipeline;
pub mod review;
pub mod scanner;
pub mod thumbnail;

// Re-export commonly used types
pub use aggregator::DuplicateSet;
pub use cleanup::{delete_marked, CleanupReport, DeletionOutcome};
pub use hasher::{ChecksumMode, DuplicateRelationship};
pub use pipeline::{Pipeline, PipelineBuilder, ScanOutcome};
pub use review::{ReviewCommand, ReviewSession, ReviewStatus};
pub use thumbnail::{SixelThumbnailer, SkipThumbnails, Thumbnailer};
