//! # Pipeline Module
//!
//! Wires the stages together and runs them concurrently.
//!
//! ## Pipeline Stages
//! 1. **Scan** - Breadth-first walk, forwarding candidate images
//! 2. **Hash** - Content checksums and first-seen collision detection
//! 3. **Aggregate** - Worker pool building duplicate-sets and previews
//!
//! ## Backpressure
//! Stages talk over bounded crossbeam channels: a slow aggregator throttles
//! the hasher, which throttles the scanner. All stages also feed one
//! bounded progress stream read by the display.

mod executor;

pub use executor::{Pipeline, PipelineBuilder, PipelineConfig, ScanHandle, ScanOutcome};
