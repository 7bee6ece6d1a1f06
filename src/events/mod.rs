//! # Events Module
//!
//! Progress reporting for the discovery phase.
//!
//! ## Design
//! Every stage sends a tagged [`ProgressEvent`] into one bounded channel;
//! a single reader folds them into [`ProgressCounters`]. There are no
//! shared mutable counters.
//!
//! ## Example
//! ```rust,ignore
//! let mut handle = pipeline.start()?;
//! let mut counters = ProgressCounters::default();
//! while let Some(event) = handle.recv_event() {
//!     counters.apply(event);
//!     println!("{counters}");
//! }
//! let sets = handle.finish()?;
//! ```

mod channel;
mod types;

pub use channel::{null_sender, EventChannel, EventReceiver, EventSender};
pub use types::*;
