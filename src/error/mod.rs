//! # Error Module
//!
//! Error types for the duplicate image finder.
//!
//! ## Design Principles
//! - **Fail fast** - any I/O or decode failure during a scan aborts the run
//! - **Include context** - paths, file names, what went wrong
//! - **Deletion errors are not fatal** - they are reported per file instead

use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error
#[derive(Error, Debug)]
pub enum DedupError {
    #[error("Scanning error: {0}")]
    Scan(#[from] ScanError),

    #[error("Hashing error: {0}")]
    Hash(#[from] HashError),

    #[error("Thumbnail error: {0}")]
    Render(#[from] RenderError),

    #[error("Aggregation error: {0}")]
    Aggregate(#[from] AggregateError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to start the {stage} stage: {source}")]
    Spawn {
        stage: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("The {stage} stage panicked")]
    StagePanicked { stage: &'static str },

    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}

/// Errors that occur while walking the directory tree
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    #[error("Failed to read directory {path}: {source}")]
    ReadDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors that occur while checksumming candidate images
#[derive(Error, Debug)]
pub enum HashError {
    #[error("Failed to read image file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to compare {path} with {other}: {source}")]
    Compare {
        path: PathBuf,
        other: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors that occur while rendering a preview thumbnail
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Failed to open image file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to decode image {path}: {reason}")]
    Decode { path: PathBuf, reason: String },

    #[error("Image is empty or corrupted: {path}")]
    EmptyImage { path: PathBuf },

    #[error("Failed to resize image {path}: {reason}")]
    Resize { path: PathBuf, reason: String },
}

/// Errors raised by the aggregator worker pool
#[derive(Error, Debug)]
pub enum AggregateError {
    #[error("Duplicate table lock was poisoned by a failed worker")]
    Poisoned,
}

/// Convenience Result type alias
pub type Result<T> = std::result::Result<T, DedupError>;
