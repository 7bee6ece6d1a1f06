//! # Thumbnail Module
//!
//! Renders terminal previews of canonical images.
//!
//! ## How It Works
//! 1. Decode the file (zune-jpeg fast path for JPEG, image crate otherwise)
//! 2. Shrink it with nearest-neighbour sampling to fit the terminal
//! 3. Encode it as a sixel escape sequence
//!
//! The pipeline only sees the [`Thumbnailer`] trait, so tests and the
//! non-interactive outputs can swap in something cheaper.

pub mod decode;
mod geometry;
pub mod resize;
pub mod sixel;

pub use geometry::TerminalGeometry;

use crate::error::RenderError;
use std::path::Path;

/// Produces the preview bytes for one image
pub trait Thumbnailer: Send + Sync {
    fn render(&self, path: &Path) -> Result<Vec<u8>, RenderError>;
}

/// Sixel previews bounded by a pixel box
#[derive(Debug, Clone, Copy)]
pub struct SixelThumbnailer {
    max_width: u32,
    max_height: u32,
}

impl SixelThumbnailer {
    pub fn new(max_width: u32, max_height: u32) -> Self {
        Self {
            max_width: max_width.max(1),
            max_height: max_height.max(1),
        }
    }

    /// Size previews to the given terminal
    pub fn for_terminal(geometry: &TerminalGeometry) -> Self {
        let (width, height) = geometry.pixel_bounds();
        Self::new(width, height)
    }
}

impl Default for SixelThumbnailer {
    fn default() -> Self {
        Self::for_terminal(&TerminalGeometry::default())
    }
}

impl Thumbnailer for SixelThumbnailer {
    fn render(&self, path: &Path) -> Result<Vec<u8>, RenderError> {
        let image = decode::decode(path)?;
        let fitted = resize::resize_nearest(&image, self.max_width, self.max_height, path)?;
        Ok(sixel::encode(&fitted))
    }
}

/// Renders nothing; used when previews will never be shown
#[derive(Debug, Clone, Copy, Default)]
pub struct SkipThumbnails;

impl Thumbnailer for SkipThumbnails {
    fn render(&self, _path: &Path) -> Result<Vec<u8>, RenderError> {
        Ok(Vec::new())
    }
}
