//! Placeholder tileset generation.
//!
//! When no real tileset is available the server can write a stand-in image:
//! every grid cell holds a simple "boulder" made of two concentric filled
//! ellipses on a transparent background.

use std::path::Path;

use image::{ImageError, ImageFormat, Rgba, RgbaImage};
use tracing::info;

use crate::error::{ConfigError, PlaceholderError};
use crate::tileset::TileGrid;

/// Default edge length of a placeholder cell in pixels.
pub const DEFAULT_PLACEHOLDER_TILE_SIZE: u32 = 64;

const OUTER_COLOR: Rgba<u8> = Rgba([120, 100, 80, 255]);
const INNER_COLOR: Rgba<u8> = Rgba([140, 120, 100, 255]);

/// Insets as a fraction of the cell size (50/256 and 60/256 of a 256 px cell).
const OUTER_INSET: f64 = 50.0 / 256.0;
const INNER_INSET: f64 = 60.0 / 256.0;

/// Pixel dimensions of a placeholder for `grid` with `tile_size` cells.
///
/// A `tile_size` of 0 is treated as 1.
pub fn placeholder_dimensions(
    grid: &TileGrid,
    tile_size: u32,
) -> Result<(u32, u32), ConfigError> {
    let tile_size = tile_size.max(1);
    match (
        grid.cols().checked_mul(tile_size),
        grid.rows().checked_mul(tile_size),
    ) {
        (Some(width), Some(height)) => Ok((width, height)),
        _ => Err(ConfigError::Invalid(format!(
            "placeholder of {}x{} cells at {} px does not fit in u32 pixels",
            grid.rows(),
            grid.cols(),
            tile_size
        ))),
    }
}

/// Generate a placeholder tileset for `grid` with square cells of `tile_size` pixels.
pub fn generate_placeholder(grid: &TileGrid, tile_size: u32) -> Result<RgbaImage, ConfigError> {
    let (width, height) = placeholder_dimensions(grid, tile_size)?;
    let tile_size = tile_size.max(1);

    Ok(RgbaImage::from_fn(width, height, |x, y| {
        // Sample at pixel centers, relative to the cell
        let cx = (x % tile_size) as f64 + 0.5;
        let cy = (y % tile_size) as f64 + 0.5;
        let size = tile_size as f64;

        if in_inset_ellipse(cx, cy, size, INNER_INSET) {
            INNER_COLOR
        } else if in_inset_ellipse(cx, cy, size, OUTER_INSET) {
            OUTER_COLOR
        } else {
            Rgba([0, 0, 0, 0])
        }
    }))
}

/// Whether `(x, y)` lies inside the ellipse inscribed in the cell shrunk by `inset` on each side.
fn in_inset_ellipse(x: f64, y: f64, size: f64, inset: f64) -> bool {
    let margin = size * inset;
    let radius = (size - 2.0 * margin) / 2.0;
    if radius <= 0.0 {
        return false;
    }

    let center = size / 2.0;
    let dx = (x - center) / radius;
    let dy = (y - center) / radius;
    dx * dx + dy * dy <= 1.0
}

/// Generate a placeholder and save it as PNG, creating parent directories.
pub fn write_placeholder(
    path: &Path,
    grid: &TileGrid,
    tile_size: u32,
) -> Result<RgbaImage, PlaceholderError> {
    let image = generate_placeholder(grid, tile_size)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|source| PlaceholderError::Io {
            path: parent.display().to_string(),
            source,
        })?;
    }

    image
        .save_with_format(path, ImageFormat::Png)
        .map_err(|e| match e {
            ImageError::IoError(source) => PlaceholderError::Io {
                path: path.display().to_string(),
                source,
            },
            other => PlaceholderError::Encode {
                message: other.to_string(),
            },
        })?;

    info!(
        path = %path.display(),
        width = image.width(),
        height = image.height(),
        "Placeholder tileset written"
    );

    Ok(image)
}
