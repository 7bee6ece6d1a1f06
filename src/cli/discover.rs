//! Live discovery display.

use console::{Key, Term};
use image_dedup::core::pipeline::Pipeline;
use image_dedup::core::DuplicateSet;
use image_dedup::error::Result;
use image_dedup::events::ProgressCounters;
use indicatif::{ProgressBar, ProgressStyle};
use std::io;
use std::path::Path;
use std::time::Duration;

/// Run the scan behind a spinner showing every counter
pub fn run(pipeline: Pipeline, root: &Path) -> Result<Vec<DuplicateSet>> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner:.green} {prefix:.bold}\n{msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_prefix(format!("scanning {}", root.display()));
    spinner.set_message(counter_lines(&ProgressCounters::default()));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let mut counters = ProgressCounters::default();
    let result = pipeline.run_with(|event| {
        counters.apply(event);
        spinner.set_message(counter_lines(&counters));
    });

    match result {
        Ok(outcome) => {
            spinner.finish_with_message(counter_lines(&outcome.counters));
            Ok(outcome.sets)
        }
        Err(e) => {
            spinner.abandon_with_message(counter_lines(&counters));
            Err(e)
        }
    }
}

/// Block until ENTER; `false` when the user interrupts instead.
///
/// Returns straight away when stdout is not a terminal.
pub fn wait_for_enter(term: &Term) -> Result<bool> {
    if !term.is_term() {
        return Ok(true);
    }

    term.write_line("All done! Press ENTER to continue.")?;
    loop {
        match term.read_key() {
            Ok(Key::Enter) => return Ok(true),
            Ok(Key::CtrlC) | Ok(Key::Char('\u{4}')) => return Ok(false),
            Ok(_) => {}
            Err(e) if e.kind() == io::ErrorKind::Interrupted => return Ok(false),
            Err(e) => return Err(e.into()),
        }
    }
}

fn counter_lines(counters: &ProgressCounters) -> String {
    format!(
        "{} folders scanned\n{} files found\n{} images found\n{} images hashed\n{} duplicates found\n{} images converted",
        counters.folders_scanned,
        counters.files_found,
        counters.images_found,
        counters.files_hashed,
        counters.duplicates_found,
        counters.images_converted
    )
}
