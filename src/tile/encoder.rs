//! PNG encoder for tile transport.
//!
//! Tiles and tilesets are sent to the browser as embedded image payloads:
//! PNG bytes, base64-encoded, wrapped in a `data:` URL so the client can use
//! them directly as a texture source.
//!
//! # Design Decisions
//!
//! - **Lossless**: PNG keeps the alpha channel and exact sprite pixels.
//!
//! - **Size cap**: images whose longest side exceeds the configured maximum
//!   texture size are scaled down with Lanczos3, preserving aspect ratio.
//!   Smaller images are never upscaled.

use std::io::Cursor;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use image::imageops::{self, FilterType};
use image::{ImageFormat, RgbaImage};

use crate::error::TilesetError;

/// Default maximum texture size in pixels (longest side).
pub const DEFAULT_MAX_TEXTURE_SIZE: u32 = 512;

/// Prefix of every embedded PNG payload.
pub const PNG_DATA_URL_PREFIX: &str = "data:image/png;base64,";

// =============================================================================
// PNG Encoder
// =============================================================================

/// An image ready to be embedded in a JSON response.
#[derive(Debug, Clone)]
pub struct EncodedImage {
    /// `data:image/png;base64,...` payload
    pub data_url: String,

    /// Width of the encoded image in pixels
    pub width: u32,

    /// Height of the encoded image in pixels
    pub height: u32,
}

/// Encoder turning RGBA images into embedded PNG payloads.
#[derive(Debug, Clone)]
pub struct PngTileEncoder {
    max_texture_size: u32,
}

impl Default for PngTileEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl PngTileEncoder {
    /// Create an encoder with the default maximum texture size (512 px).
    pub fn new() -> Self {
        Self::with_max_texture_size(DEFAULT_MAX_TEXTURE_SIZE)
    }

    /// Create an encoder with a custom maximum texture size.
    ///
    /// A value of 0 is treated as 1.
    pub fn with_max_texture_size(max_texture_size: u32) -> Self {
        Self {
            max_texture_size: max_texture_size.max(1),
        }
    }

    pub fn max_texture_size(&self) -> u32 {
        self.max_texture_size
    }

    /// Cap the image to the maximum texture size and encode it.
    pub fn encode(&self, image: &RgbaImage) -> Result<EncodedImage, TilesetError> {
        let capped;
        let image = match thumbnail(image, self.max_texture_size) {
            Some(resized) => {
                capped = resized;
                &capped
            }
            None => image,
        };

        let png = encode_png(image)?;

        Ok(EncodedImage {
            data_url: to_data_url(&png),
            width: image.width(),
            height: image.height(),
        })
    }
}

// =============================================================================
// Utility Functions
// =============================================================================

/// Encode an RGBA image as PNG bytes.
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, TilesetError> {
    let mut buffer = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)
        .map_err(|e| TilesetError::EncodeFailure {
            message: e.to_string(),
        })?;
    Ok(buffer)
}

/// Wrap PNG bytes in a base64 `data:` URL.
pub fn to_data_url(png: &[u8]) -> String {
    format!("{}{}", PNG_DATA_URL_PREFIX, STANDARD.encode(png))
}

/// Dimensions after bounding the longest side by `max_size`.
///
/// Returns the input dimensions unchanged when they already fit. Neither
/// side is allowed to drop below one pixel.
pub fn bounded_dimensions(width: u32, height: u32, max_size: u32) -> (u32, u32) {
    if width <= max_size && height <= max_size {
        return (width, height);
    }

    let scale = max_size as f64 / width.max(height) as f64;
    let scaled = |value: u32| ((value as f64 * scale).round() as u32).clamp(1, max_size);

    (scaled(width), scaled(height))
}

/// Downscale `image` so that its longest side is at most `max_size`.
///
/// Returns `None` when the image already fits.
pub fn thumbnail(image: &RgbaImage, max_size: u32) -> Option<RgbaImage> {
    let (width, height) = bounded_dimensions(image.width(), image.height(), max_size);
    if (width, height) == image.dimensions() {
        return None;
    }

    Some(imageops::resize(image, width, height, FilterType::Lanczos3))
}

// =============================================================================
// Tests
// =============================================================================
