//! # CLI Module
//!
//! Command-line interface for the duplicate image cleaner.
//!
//! ## Usage
//! ```bash
//! # Scan the current directory and review interactively
//! imgdedup
//!
//! # Top-level files only
//! imgdedup ~/Pictures --no-recurse
//!
//! # Byte-compare checksum collisions before trusting them
//! imgdedup ~/Pictures --verify
//!
//! # JSON listing for scripting
//! imgdedup ~/Pictures --output json
//! ```

mod discover;
mod review;

use clap::{Parser, ValueEnum};
use console::{style, Term};
use image_dedup::core::cleanup::{delete_marked, DeletionOutcome};
use image_dedup::core::hasher::ChecksumMode;
use image_dedup::core::pipeline::{Pipeline, PipelineBuilder};
use image_dedup::core::review::ReviewSession;
use image_dedup::core::thumbnail::{SixelThumbnailer, SkipThumbnails, TerminalGeometry};
use image_dedup::core::DuplicateSet;
use image_dedup::error::Result;
use serde::Serialize;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// Image Dedup - find identical images and delete the copies you pick
#[derive(Parser, Debug)]
#[command(name = "imgdedup")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory to scan (defaults to the current directory)
    dir: Option<PathBuf>,

    /// Do not enter subdirectories
    #[arg(long)]
    no_recurse: bool,

    /// Aggregator worker threads (defaults to available cores minus three)
    #[arg(short, long)]
    workers: Option<usize>,

    /// Byte-compare files whose checksums collide
    #[arg(long)]
    verify: bool,

    /// Output format
    #[arg(short, long, default_value = "interactive")]
    output: OutputFormat,

    /// Pixel width of one terminal cell
    #[arg(long, default_value = "8")]
    cell_width: u32,

    /// Pixel height of one terminal cell
    #[arg(long, default_value = "16")]
    cell_height: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Live progress, sixel previews and interactive deletion
    Interactive,
    /// JSON listing of duplicate-sets
    Json,
    /// Minimal output (duplicate paths only)
    Minimal,
}

/// Run the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let root = match &cli.dir {
        Some(dir) => dir.clone(),
        None => std::env::current_dir()?,
    };
    debug!(?cli, root = %root.display(), "parsed arguments");

    let builder = pipeline_builder(&cli, &root);

    match cli.output {
        OutputFormat::Interactive => {
            let geometry = TerminalGeometry::detect(cli.cell_width, cli.cell_height);
            let pipeline = builder
                .thumbnailer(Arc::new(SixelThumbnailer::for_terminal(&geometry)))
                .build()?;
            run_interactive(pipeline, &root)
        }
        OutputFormat::Json | OutputFormat::Minimal => {
            let outcome = builder.thumbnailer(Arc::new(SkipThumbnails)).build()?.run()?;
            if outcome.sets.is_empty() {
                Term::stderr().write_line("No duplicates found!")?;
            }
            match cli.output {
                OutputFormat::Json => print_json_results(&outcome.sets),
                _ => print_minimal_results(&outcome.sets),
            }
        }
    }
}

fn pipeline_builder(cli: &Cli, root: &Path) -> PipelineBuilder {
    let mode = if cli.verify {
        ChecksumMode::ByteCompare
    } else {
        ChecksumMode::ChecksumOnly
    };

    let builder = Pipeline::builder()
        .root(root)
        .recursive(!cli.no_recurse)
        .checksum_mode(mode);

    match cli.workers {
        Some(workers) => builder.workers(workers),
        None => builder,
    }
}

fn run_interactive(pipeline: Pipeline, root: &Path) -> Result<()> {
    let term = Term::stdout();

    let sets = discover::run(pipeline, root)?;

    let Some(session) = ReviewSession::new(sets) else {
        term.write_line("No duplicates found!")?;
        return Ok(());
    };

    if !discover::wait_for_enter(&term)? {
        return Ok(());
    }

    let Some(deletions) = review::run(&term, session)? else {
        term.write_line("Nothing deleted.")?;
        return Ok(());
    };

    let report = delete_marked(deletions, |outcome| match outcome {
        DeletionOutcome::Deleted(path) => {
            term.write_line(&format!(
                "{} deleted {}",
                style("✓").green(),
                review::display_path(path)
            ))
            .ok();
        }
        DeletionOutcome::Failed { path, error } => {
            term.write_line(&format!(
                "{} could not delete {}: {}",
                style("✗").red(),
                review::display_path(path),
                error
            ))
            .ok();
        }
    });

    term.write_line(&format!(
        "All done! Deleted {} files",
        style(report.deleted).cyan()
    ))?;

    Ok(())
}

#[derive(Serialize)]
struct SetListing<'a> {
    canonical: &'a Path,
    duplicates: &'a [PathBuf],
}

fn print_json_results(sets: &[DuplicateSet]) -> Result<()> {
    let listing: Vec<SetListing> = sets
        .iter()
        .map(|set| SetListing {
            canonical: set.canonical(),
            duplicates: set.duplicates(),
        })
        .collect();

    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, &listing).map_err(io::Error::from)?;
    io::Write::write_all(&mut stdout, b"\n")?;
    Ok(())
}

fn print_minimal_results(sets: &[DuplicateSet]) -> Result<()> {
    let term = Term::stdout();
    for set in sets {
        for path in set.duplicates() {
            term.write_line(&path.display().to_string())?;
        }
    }
    Ok(())
}
