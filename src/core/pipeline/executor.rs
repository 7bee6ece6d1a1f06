//! Pipeline execution implementation.

use crate::core::aggregator::{default_worker_count, Aggregator, DuplicateSet};
use crate::core::hasher::{ChecksumMode, DuplicateRelationship, Hasher, HashSummary};
use crate::core::scanner::{BreadthFirstScanner, ScanConfig, ScanSummary};
use crate::core::thumbnail::{SixelThumbnailer, Thumbnailer};
use crate::error::DedupError;
use crate::events::{EventChannel, EventReceiver, ProgressCounters, ProgressEvent};
use crossbeam_channel::bounded;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Instant;
use tracing::{debug, info};

/// Result of a completed scan
#[derive(Debug)]
pub struct ScanOutcome {
    /// Duplicate-sets ordered by canonical path
    pub sets: Vec<DuplicateSet>,
    /// Final progress totals
    pub counters: ProgressCounters,
}

/// Configuration for the pipeline
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Directory to scan
    pub root: PathBuf,
    /// Descend into subdirectories
    pub recursive: bool,
    /// Aggregator pool size
    pub workers: usize,
    /// Scanner → hasher queue capacity
    pub candidate_capacity: usize,
    /// Hasher → aggregator queue capacity
    pub relationship_capacity: usize,
    /// Progress stream capacity
    pub event_capacity: usize,
    /// How checksum collisions are confirmed
    pub checksum_mode: ChecksumMode,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            recursive: true,
            workers: default_worker_count(),
            candidate_capacity: 1000,
            relationship_capacity: 100,
            event_capacity: 1000,
            checksum_mode: ChecksumMode::default(),
        }
    }
}

/// Builder for pipeline configuration
pub struct PipelineBuilder {
    config: PipelineConfig,
    thumbnailer: Option<Arc<dyn Thumbnailer>>,
}

impl PipelineBuilder {
    /// Create a new pipeline builder
    pub fn new() -> Self {
        Self {
            config: PipelineConfig::default(),
            thumbnailer: None,
        }
    }

    /// Set the directory to scan
    pub fn root(mut self, root: impl Into<PathBuf>) -> Self {
        self.config.root = root.into();
        self
    }

    /// Enable or disable descent into subdirectories
    pub fn recursive(mut self, recursive: bool) -> Self {
        self.config.recursive = recursive;
        self
    }

    /// Set the aggregator pool size
    pub fn workers(mut self, workers: usize) -> Self {
        self.config.workers = workers;
        self
    }

    /// Set how checksum collisions are confirmed
    pub fn checksum_mode(mut self, mode: ChecksumMode) -> Self {
        self.config.checksum_mode = mode;
        self
    }

    /// Set every queue capacity at once
    pub fn queue_capacity(mut self, capacity: usize) -> Self {
        self.config.candidate_capacity = capacity;
        self.config.relationship_capacity = capacity;
        self.config.event_capacity = capacity;
        self
    }

    /// Set the preview renderer
    pub fn thumbnailer(mut self, thumbnailer: Arc<dyn Thumbnailer>) -> Self {
        self.thumbnailer = Some(thumbnailer);
        self
    }

    /// Replace the whole configuration
    pub fn config(mut self, config: PipelineConfig) -> Self {
        self.config = config;
        self
    }

    /// Validate and build the pipeline
    pub fn build(self) -> Result<Pipeline, DedupError> {
        let config = self.config;

        if config.workers == 0 {
            return Err(DedupError::Config(
                "worker count must be at least 1".to_string(),
            ));
        }
        if config.candidate_capacity == 0
            || config.relationship_capacity == 0
            || config.event_capacity == 0
        {
            return Err(DedupError::Config(
                "queue capacities must be at least 1".to_string(),
            ));
        }

        Ok(Pipeline {
            config,
            thumbnailer: self
                .thumbnailer
                .unwrap_or_else(|| Arc::new(SixelThumbnailer::default())),
        })
    }
}

impl Default for PipelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// The discovery-and-dedup pipeline
pub struct Pipeline {
    config: PipelineConfig,
    thumbnailer: Arc<dyn Thumbnailer>,
}

impl Pipeline {
    /// Create a new pipeline builder
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::new()
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Spawn every stage and return a handle to the running scan.
    pub fn start(self) -> Result<ScanHandle, DedupError> {
        let Pipeline {
            config,
            thumbnailer,
        } = self;

        info!(
            root = %config.root.display(),
            recursive = config.recursive,
            workers = config.workers,
            "starting scan"
        );

        let (events, receiver) = EventChannel::bounded(config.event_capacity);
        let (candidates_tx, candidates_rx) = bounded::<PathBuf>(config.candidate_capacity);
        let (relations_tx, relations_rx) =
            bounded::<DuplicateRelationship>(config.relationship_capacity);

        // Raised by an upstream stage before it closes its output, so the
        // aggregator never announces Done for a scan that failed
        let upstream_failed = Arc::new(AtomicBool::new(false));

        let scanner = BreadthFirstScanner::new(ScanConfig {
            recursive: config.recursive,
            extensions: None,
        });
        let root = config.root.clone();
        let scanner_events = events.clone();
        let scanner_failed = Arc::clone(&upstream_failed);
        let scanner = spawn_stage("scanner", move || {
            let result = scanner.run(&root, &candidates_tx, &scanner_events);
            if result.is_err() {
                scanner_failed.store(true, Ordering::SeqCst);
            }
            drop(candidates_tx);
            result.map_err(DedupError::from)
        })?;

        let hasher = Hasher::new(config.checksum_mode);
        let hasher_events = events.clone();
        let hasher_failed = Arc::clone(&upstream_failed);
        let hasher = spawn_stage("hasher", move || {
            let result = hasher.run(&candidates_rx, &relations_tx, &hasher_events);
            if result.is_err() {
                hasher_failed.store(true, Ordering::SeqCst);
            }
            drop(relations_tx);
            result.map_err(DedupError::from)
        })?;

        let aggregator = Aggregator::new(config.workers, thumbnailer);
        let aggregator = spawn_stage("aggregator", move || {
            let sets = aggregator.run(relations_rx, &events)?;
            if !upstream_failed.load(Ordering::SeqCst) {
                events.send(ProgressEvent::Done);
            }
            Ok(sets)
        })?;

        Ok(ScanHandle {
            events: Some(receiver),
            scanner,
            hasher,
            aggregator,
            started: Instant::now(),
        })
    }

    /// Run a whole scan on the calling thread, handing each event to
    /// `observer` as it arrives.
    pub fn run_with(
        self,
        mut observer: impl FnMut(ProgressEvent),
    ) -> Result<ScanOutcome, DedupError> {
        let handle = self.start()?;
        let mut counters = ProgressCounters::default();

        while let Some(event) = handle.recv_event() {
            counters.apply(event);
            observer(event);
        }

        let sets = handle.finish()?;
        Ok(ScanOutcome { sets, counters })
    }

    /// Run a whole scan, discarding individual events
    pub fn run(self) -> Result<ScanOutcome, DedupError> {
        self.run_with(|_| {})
    }
}

/// A scan in progress.
///
/// Progress is read with [`ScanHandle::recv_event`]; the duplicate-sets
/// are collected exactly once with [`ScanHandle::finish`].
pub struct ScanHandle {
    events: Option<EventReceiver>,
    scanner: JoinHandle<Result<ScanSummary, DedupError>>,
    hasher: JoinHandle<Result<HashSummary, DedupError>>,
    aggregator: JoinHandle<Result<Vec<DuplicateSet>, DedupError>>,
    started: Instant,
}

impl ScanHandle {
    /// Block until the next progress event.
    ///
    /// Returns `None` once every stage has stopped; after a successful scan
    /// the last event returned is [`ProgressEvent::Done`].
    pub fn recv_event(&self) -> Option<ProgressEvent> {
        self.events.as_ref().and_then(EventReceiver::recv)
    }

    /// Stop listening to progress, wait for every stage, and return the
    /// duplicate-sets.
    ///
    /// When several stages fail the most upstream error wins, since
    /// downstream failures are usually its consequence.
    pub fn finish(mut self) -> Result<Vec<DuplicateSet>, DedupError> {
        // Stages blocked on a full progress stream resume once it has no reader
        self.events.take();

        let aggregated = join_stage("aggregator", self.aggregator);
        let hashed = join_stage("hasher", self.hasher);
        let scanned = join_stage("scanner", self.scanner);

        let scan_summary = scanned?;
        let hash_summary = hashed?;
        let sets = aggregated?;

        debug!(
            entries = scan_summary.entries,
            images = scan_summary.images,
            hashed = hash_summary.hashed,
            duplicates = hash_summary.duplicates,
            "all stages joined"
        );
        info!(
            sets = sets.len(),
            elapsed_ms = self.started.elapsed().as_millis() as u64,
            "scan complete"
        );

        Ok(sets)
    }
}

fn spawn_stage<T, F>(stage: &'static str, body: F) -> Result<JoinHandle<Result<T, DedupError>>, DedupError>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, DedupError> + Send + 'static,
{
    thread::Builder::new()
        .name(stage.to_string())
        .spawn(body)
        .map_err(|source| DedupError::Spawn { stage, source })
}

fn join_stage<T>(
    stage: &'static str,
    handle: JoinHandle<Result<T, DedupError>>,
) -> Result<T, DedupError> {
    handle
        .join()
        .unwrap_or(Err(DedupError::StagePanicked { stage }))
}
