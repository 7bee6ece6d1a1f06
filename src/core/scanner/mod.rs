//! # Scanner Module
//!
//! Discovers candidate image files beneath a root directory.
//!
//! ## Supported Formats
//! - JPEG (.jpg, .jpeg)
//! - PNG (.png)
//! - WebP (.webp)
//! - GIF (.gif) - first frame only when previewed
//!
//! ## Example
//! ```rust,ignore
//! use image_dedup::core::scanner::{BreadthFirstScanner, ScanConfig};
//!
//! let scanner = BreadthFirstScanner::new(ScanConfig::default());
//! let summary = scanner.run(&root, &candidates_tx, &events)?;
//! ```

mod filter;
mod walker;

pub use filter::ImageFilter;
pub use walker::{BreadthFirstScanner, ScanConfig, ScanSummary};

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Image formats recognized by extension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageFormat {
    Jpeg,
    Png,
    WebP,
    Gif,
    Unknown,
}

impl ImageFormat {
    /// Detect format from file extension
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "jpg" | "jpeg" => ImageFormat::Jpeg,
            "png" => ImageFormat::Png,
            "webp" => ImageFormat::WebP,
            "gif" => ImageFormat::Gif,
            _ => ImageFormat::Unknown,
        }
    }

    /// Detect format from a path's extension
    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|e| e.to_str())
            .map(ImageFormat::from_extension)
            .unwrap_or(ImageFormat::Unknown)
    }

    /// Check if this format is supported
    pub fn is_supported(&self) -> bool {
        !matches!(self, ImageFormat::Unknown)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_format_from_extension_lowercase() {
        assert_eq!(ImageFormat::from_extension("jpg"), ImageFormat::Jpeg);
        assert_eq!(ImageFormat::from_extension("jpeg"), ImageFormat::Jpeg);
        assert_eq!(ImageFormat::from_extension("png"), ImageFormat::Png);
        assert_eq!(ImageFormat::from_extension("gif"), ImageFormat::Gif);
    }

    #[test]
    fn image_format_from_extension_uppercase() {
        assert_eq!(ImageFormat::from_extension("JPG"), ImageFormat::Jpeg);
        assert_eq!(ImageFormat::from_extension("WEBP"), ImageFormat::WebP);
    }

    #[test]
    fn unsupported_extensions_are_unknown() {
        assert_eq!(ImageFormat::from_extension("txt"), ImageFormat::Unknown);
        assert_eq!(ImageFormat::from_extension("heic"), ImageFormat::Unknown);
        assert!(!ImageFormat::Unknown.is_supported());
        assert!(ImageFormat::Png.is_supported());
    }

    #[test]
    fn format_from_path_without_extension() {
        assert_eq!(
            ImageFormat::from_path(Path::new("/photos/README")),
            ImageFormat::Unknown
        );
    }
}
