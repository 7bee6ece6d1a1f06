//! Integration tests for the pipeline module.
//!
//! These tests run whole scans over real directory trees and check:
//! - Which files end up in duplicate-sets
//! - Recursion control
//! - Progress stream ordering and totals
//! - Preview rendering through the real sixel renderer

use assert_fs::prelude::*;
use image::{Rgb, RgbImage};
use image_dedup::core::hasher::ChecksumMode;
use image_dedup::core::pipeline::{Pipeline, PipelineBuilder};
use image_dedup::core::thumbnail::{SixelThumbnailer, Thumbnailer};
use image_dedup::error::RenderError;
use image_dedup::events::{ProgressCounters, ProgressEvent};
use predicates::prelude::*;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Records how many previews were requested
#[derive(Default)]
struct CountingThumbnailer {
    renders: AtomicUsize,
}

impl Thumbnailer for CountingThumbnailer {
    fn render(&self, _path: &Path) -> Result<Vec<u8>, RenderError> {
        self.renders.fetch_add(1, Ordering::SeqCst);
        Ok(b"preview".to_vec())
    }
}

fn builder(root: &Path, thumbnailer: Arc<dyn Thumbnailer>) -> PipelineBuilder {
    Pipeline::builder()
        .root(root)
        .workers(3)
        .thumbnailer(thumbnailer)
}

fn member_names(sets: &[image_dedup::core::DuplicateSet]) -> Vec<Vec<String>> {
    sets.iter()
        .map(|set| {
            set.paths()
                .iter()
                .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
                .collect()
        })
        .collect()
}

#[test]
fn copy_of_an_image_forms_one_set() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("a.png").write_binary(b"pixels").unwrap();
    temp.child("b.png").write_binary(b"pixels").unwrap();
    temp.child("c.txt").write_binary(b"pixels").unwrap();

    let thumbnailer = Arc::new(CountingThumbnailer::default());
    let outcome = builder(temp.path(), thumbnailer.clone())
        .build()
        .unwrap()
        .run()
        .unwrap();

    assert_eq!(member_names(&outcome.sets), vec![vec!["a.png", "b.png"]]);
    assert_eq!(outcome.sets[0].canonical(), temp.child("a.png").path());
    assert_eq!(outcome.sets[0].thumbnail(), Some(&b"preview"[..]));

    let counters = outcome.counters;
    assert_eq!(counters.files_found, 3);
    assert_eq!(counters.images_found, 2);
    assert_eq!(counters.files_hashed, 2);
    assert_eq!(counters.duplicates_found, 1);
    assert_eq!(counters.images_converted, 1);
    assert!(counters.done);
    assert_eq!(thumbnailer.renders.load(Ordering::SeqCst), 1);

    // Scanning never modifies the tree
    temp.child("c.txt").assert(predicate::path::exists());
}

#[test]
fn nested_duplicate_needs_recursion() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("a.png").write_binary(b"same").unwrap();
    temp.child("sub/b.png").write_binary(b"same").unwrap();

    let flat = builder(temp.path(), Arc::new(CountingThumbnailer::default()))
        .recursive(false)
        .build()
        .unwrap()
        .run()
        .unwrap();

    assert!(flat.sets.is_empty());
    assert_eq!(flat.counters.folders_scanned, 0);
    assert_eq!(flat.counters.images_found, 1);

    let deep = builder(temp.path(), Arc::new(CountingThumbnailer::default()))
        .build()
        .unwrap()
        .run()
        .unwrap();

    assert_eq!(deep.sets.len(), 1);
    assert_eq!(deep.counters.folders_scanned, 1);
    assert_eq!(deep.sets[0].duplicates(), &[temp.child("sub/b.png").path().to_path_buf()]);
}

#[test]
fn reruns_give_the_same_sets() {
    let temp = assert_fs::TempDir::new().unwrap();
    for (name, content) in [
        ("x/1.jpg", "one"),
        ("x/2.jpg", "two"),
        ("y/1.jpg", "one"),
        ("y/2.webp", "two"),
        ("z.gif", "one"),
        ("lonely.png", "three"),
    ] {
        temp.child(name).write_str(content).unwrap();
    }

    let scan = || {
        builder(temp.path(), Arc::new(CountingThumbnailer::default()))
            .build()
            .unwrap()
            .run()
            .unwrap()
    };

    let first = scan();
    let second = scan();

    assert_eq!(member_names(&first.sets), member_names(&second.sets));
    assert_eq!(first.counters, second.counters);
    // Breadth-first: the top-level gif is seen before anything nested
    assert_eq!(first.sets[0].canonical(), temp.child("x/2.jpg").path());
    assert_eq!(first.sets[1].canonical(), temp.child("z.gif").path());
}

#[test]
fn sets_cover_exactly_the_colliding_files() {
    let temp = assert_fs::TempDir::new().unwrap();
    let mut expected = BTreeSet::new();
    for i in 0..12 {
        let name = format!("dir{}/img{:02}.png", i % 3, i);
        let content = format!("group{}", i % 4);
        temp.child(&name).write_str(&content).unwrap();
        expected.insert(temp.child(&name).path().to_path_buf());
    }
    temp.child("unique.png").write_str("unique").unwrap();

    let thumbnailer = Arc::new(CountingThumbnailer::default());
    let outcome = builder(temp.path(), thumbnailer.clone())
        .queue_capacity(2)
        .build()
        .unwrap()
        .run()
        .unwrap();

    let members: BTreeSet<PathBuf> = outcome
        .sets
        .iter()
        .flat_map(|set| set.paths().iter().cloned())
        .collect();

    assert_eq!(outcome.sets.len(), 4);
    assert_eq!(members, expected);
    assert_eq!(outcome.counters.images_converted, outcome.sets.len());
    assert_eq!(outcome.counters.duplicates_found, 8);
    assert_eq!(thumbnailer.renders.load(Ordering::SeqCst), 4);
}

#[test]
fn done_is_last_and_counters_only_grow() {
    let temp = assert_fs::TempDir::new().unwrap();
    for i in 0..30 {
        temp.child(format!("d{}/f{:02}.jpg", i % 5, i))
            .write_binary(&[(i % 7) as u8])
            .unwrap();
    }

    let mut events = Vec::new();
    let outcome = builder(temp.path(), Arc::new(CountingThumbnailer::default()))
        .build()
        .unwrap()
        .run_with(|event| events.push(event))
        .unwrap();

    assert_eq!(events.last(), Some(&ProgressEvent::Done));
    assert_eq!(
        events.iter().filter(|e| **e == ProgressEvent::Done).count(),
        1
    );

    let mut previous = ProgressCounters::default();
    let mut current = ProgressCounters::default();
    for event in &events {
        current.apply(*event);
        assert!(current.dominates(&previous));
        previous = current;
    }
    assert_eq!(current, outcome.counters);
}

#[test]
fn byte_compare_mode_finds_the_same_copies() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("a.png").write_binary(&[1, 2, 3, 4]).unwrap();
    temp.child("b.png").write_binary(&[1, 2, 3, 4]).unwrap();
    temp.child("c.png").write_binary(&[4, 3, 2, 1]).unwrap();

    let outcome = builder(temp.path(), Arc::new(CountingThumbnailer::default()))
        .checksum_mode(ChecksumMode::ByteCompare)
        .build()
        .unwrap()
        .run()
        .unwrap();

    assert_eq!(member_names(&outcome.sets), vec![vec!["a.png", "b.png"]]);
}

#[test]
fn real_previews_are_sixel() {
    let temp = assert_fs::TempDir::new().unwrap();
    let original = temp.child("photo.png");
    RgbImage::from_pixel(64, 32, Rgb([20, 200, 40]))
        .save(original.path())
        .unwrap();
    std::fs::copy(original.path(), temp.child("photo copy.png").path()).unwrap();

    let outcome = builder(temp.path(), Arc::new(SixelThumbnailer::new(32, 32)))
        .build()
        .unwrap()
        .run()
        .unwrap();

    assert_eq!(outcome.sets.len(), 1);
    let preview = String::from_utf8(outcome.sets[0].thumbnail().unwrap().to_vec()).unwrap();
    assert!(preview.starts_with("\x1bP"));
    assert!(preview.contains("\"1;1;32;16"));
    assert!(preview.ends_with("\x1b\\"));
}

#[test]
fn undecodable_canonical_fails_the_scan() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("a.png").write_binary(b"not really a png").unwrap();
    temp.child("b.png").write_binary(b"not really a png").unwrap();

    let mut events = Vec::new();
    let result = builder(temp.path(), Arc::new(SixelThumbnailer::new(32, 32)))
        .build()
        .unwrap()
        .run_with(|event| events.push(event));

    assert!(matches!(result, Err(image_dedup::DedupError::Render(_))));
    assert!(!events.contains(&ProgressEvent::Done));
}
