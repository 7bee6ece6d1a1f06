//! Image decoding with a JPEG fast path.
//!
//! Uses zune-jpeg for JPEG files (1.5-2x faster than image crate),
//! falls back to image crate for other formats and for JPEGs zune rejects.

use crate::core::scanner::ImageFormat;
use crate::error::RenderError;
use image::{DynamicImage, ImageBuffer, ImageError, ImageReader, Luma, Rgb, Rgba};
use std::fs;
use std::path::Path;
use zune_core::colorspace::ColorSpace;
use zune_core::options::DecoderOptions;
use zune_jpeg::JpegDecoder;

/// Decode an image, using the fastest decoder available for its format.
///
/// Animated GIFs decode to their first frame.
pub fn decode(path: &Path) -> Result<DynamicImage, RenderError> {
    let image = match ImageFormat::from_path(path) {
        ImageFormat::Jpeg => decode_jpeg(path).or_else(|_| decode_fallback(path))?,
        _ => decode_fallback(path)?,
    };

    if image.width() == 0 || image.height() == 0 {
        return Err(RenderError::EmptyImage {
            path: path.to_path_buf(),
        });
    }

    Ok(image)
}

fn decode_jpeg(path: &Path) -> Result<DynamicImage, RenderError> {
    let file_bytes = fs::read(path).map_err(|source| RenderError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let options = DecoderOptions::new_fast().jpeg_set_out_colorspace(ColorSpace::RGB);
    let mut decoder = JpegDecoder::new_with_options(&file_bytes, options);

    let pixels = decoder.decode().map_err(|e| RenderError::Decode {
        path: path.to_path_buf(),
        reason: format!("zune-jpeg decode failed: {:?}", e),
    })?;

    let info = decoder.info().ok_or_else(|| RenderError::Decode {
        path: path.to_path_buf(),
        reason: "Failed to get image info".to_string(),
    })?;

    let width = u32::from(info.width);
    let height = u32::from(info.height);
    let buffer_error = || RenderError::Decode {
        path: path.to_path_buf(),
        reason: "Decoded pixel buffer does not match image size".to_string(),
    };

    match decoder.get_output_colorspace().unwrap_or(ColorSpace::RGB) {
        ColorSpace::RGB => {
            let buffer: ImageBuffer<Rgb<u8>, Vec<u8>> =
                ImageBuffer::from_raw(width, height, pixels).ok_or_else(buffer_error)?;
            Ok(DynamicImage::ImageRgb8(buffer))
        }
        ColorSpace::RGBA => {
            let buffer: ImageBuffer<Rgba<u8>, Vec<u8>> =
                ImageBuffer::from_raw(width, height, pixels).ok_or_else(buffer_error)?;
            Ok(DynamicImage::ImageRgba8(buffer))
        }
        ColorSpace::Luma => {
            let buffer: ImageBuffer<Luma<u8>, Vec<u8>> =
                ImageBuffer::from_raw(width, height, pixels).ok_or_else(buffer_error)?;
            Ok(DynamicImage::ImageLuma8(buffer))
        }
        other => Err(RenderError::Decode {
            path: path.to_path_buf(),
            reason: format!("unsupported JPEG colorspace {:?}", other),
        }),
    }
}

/// Decode through the image crate, sniffing the real format from content
fn decode_fallback(path: &Path) -> Result<DynamicImage, RenderError> {
    let reader = ImageReader::open(path)
        .map_err(|source| RenderError::Io {
            path: path.to_path_buf(),
            source,
        })?
        .with_guessed_format()
        .map_err(|source| RenderError::Io {
            path: path.to_path_buf(),
            source,
        })?;

    reader.decode().map_err(|e| match e {
        ImageError::IoError(source) => RenderError::Io {
            path: path.to_path_buf(),
            source,
        },
        other => RenderError::Decode {
            path: path.to_path_buf(),
            reason: other.to_string(),
        },
    })
}
