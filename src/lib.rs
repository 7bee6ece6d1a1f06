//! # Image Dedup
//!
//! Finds byte-identical images under a directory tree, previews each
//! duplicate-set in the terminal and deletes the copies the user marks.
//!
//! ## Architecture
//! The library holds the engine; the `imgdedup` binary adds the terminal UI:
//! - `core` - Scanner, hasher, aggregator, previews, review state, cleanup
//! - `events` - Progress events shared by every stage
//! - `error` - Error types carrying the offending path

pub mod core;
pub mod error;
pub mod events;

// Re-export commonly used types at the crate root
pub use error::{DedupError, Result};

/// Install the tracing subscriber, filtered by `RUST_LOG`.
///
/// Logs go to stderr so they stay out of piped JSON and minimal output.
/// A second call is a no-op.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();
}
