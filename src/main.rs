//! # imgdedup CLI
//!
//! Interactive duplicate image cleaner for sixel-capable terminals.
//!
//! ## Usage
//! ```bash
//! imgdedup ~/Pictures
//! imgdedup ~/Pictures --no-recurse --output json
//! ```

mod cli;

use image_dedup::Result;

fn main() -> Result<()> {
    image_dedup::init_tracing();
    cli::run()
}
