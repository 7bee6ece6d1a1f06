//! Nearest-neighbour downscaling to fit the terminal.
//!
//! Uses fast_image_resize; nearest sampling keeps previews crisp and
//! is the cheapest algorithm it offers.

use crate::error::RenderError;
use fast_image_resize::{images::Image, PixelType, ResizeAlg, ResizeOptions, Resizer};
use image::{DynamicImage, ImageBuffer, RgbaImage};
use std::path::Path;

/// Target size for an image fitted inside `max_width` x `max_height`.
///
/// Returns `None` when the image already fits. The aspect ratio is kept
/// and neither side drops below one pixel.
pub fn fit_within(width: u32, height: u32, max_width: u32, max_height: u32) -> Option<(u32, u32)> {
    if width <= max_width && height <= max_height {
        return None;
    }

    let scale_x = f64::from(max_width) / f64::from(width);
    let scale_y = f64::from(max_height) / f64::from(height);
    let scale = scale_x.min(scale_y);

    let new_width = ((f64::from(width) * scale) as u32).max(1);
    let new_height = ((f64::from(height) * scale) as u32).max(1);
    Some((new_width, new_height))
}

/// Shrink `image` into the given bounds, returning RGBA pixels.
pub fn resize_nearest(
    image: &DynamicImage,
    max_width: u32,
    max_height: u32,
    path: &Path,
) -> Result<RgbaImage, RenderError> {
    let rgba = image.to_rgba8();
    let (width, height) = rgba.dimensions();

    let Some((new_width, new_height)) = fit_within(width, height, max_width, max_height) else {
        return Ok(rgba);
    };

    let resize_error = |reason: String| RenderError::Resize {
        path: path.to_path_buf(),
        reason,
    };

    let src_image = Image::from_vec_u8(width, height, rgba.into_raw(), PixelType::U8x4)
        .map_err(|e| resize_error(format!("Failed to create source image: {}", e)))?;
    let mut dst_image = Image::new(new_width, new_height, PixelType::U8x4);

    let options = ResizeOptions::new().resize_alg(ResizeAlg::Nearest);
    Resizer::new()
        .resize(&src_image, &mut dst_image, &options)
        .map_err(|e| resize_error(format!("Resize failed: {}", e)))?;

    ImageBuffer::from_raw(new_width, new_height, dst_image.into_vec())
        .ok_or_else(|| resize_error("Failed to create result buffer".to_string()))
}
