//! Decoded tileset images.

use std::io::Cursor;

use image::{DynamicImage, ImageReader, RgbaImage};

use crate::error::TilesetError;

/// A decoded tileset image, always stored as 8-bit RGBA.
#[derive(Debug, Clone, PartialEq)]
pub struct Tileset {
    image: RgbaImage,
}

impl Tileset {
    /// Wrap an already decoded image.
    pub fn from_image(image: DynamicImage) -> Self {
        let image = match image {
            DynamicImage::ImageRgba8(rgba) => rgba,
            other => other.to_rgba8(),
        };
        Self { image }
    }

    /// Decode a tileset from encoded image bytes.
    ///
    /// The format is guessed from the content. Non-RGBA images are converted
    /// to RGBA.
    pub fn decode(data: &[u8]) -> Result<Self, TilesetError> {
        let reader = ImageReader::new(Cursor::new(data))
            .with_guessed_format()
            .map_err(|e| TilesetError::DecodeFailure {
                message: e.to_string(),
            })?;

        if reader.format().is_none() {
            return Err(TilesetError::DecodeFailure {
                message: "unrecognized image format".to_string(),
            });
        }

        let image = reader.decode().map_err(|e| TilesetError::DecodeFailure {
            message: e.to_string(),
        })?;

        Ok(Self::from_image(image))
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }
}
