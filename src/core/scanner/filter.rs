//! Extension filtering for the scanner.

use super::ImageFormat;
use std::collections::HashSet;
use std::path::Path;

/// Decides whether a directory entry is a candidate image
pub struct ImageFilter {
    /// Lower-case file extensions to accept
    extensions: HashSet<String>,
}

impl ImageFilter {
    /// Create a filter accepting the default raster formats
    pub fn new() -> Self {
        Self {
            extensions: ["jpg", "jpeg", "png", "webp", "gif"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }

    /// Override the list of extensions to accept
    pub fn with_extensions(mut self, extensions: Vec<String>) -> Self {
        self.extensions = extensions
            .into_iter()
            .map(|ext| ext.trim_start_matches('.').to_lowercase())
            .collect();
        self
    }

    /// Check if a file name carries an accepted extension
    pub fn should_include(&self, path: &Path) -> bool {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) => self.extensions.contains(&ext.to_lowercase()),
            None => false,
        }
    }

    /// Get the image format for a path
    pub fn get_format(&self, path: &Path) -> ImageFormat {
        ImageFormat::from_path(path)
    }
}

impl Default for ImageFilter {
    fn default() -> Self {
        Self::new()
    }
}
