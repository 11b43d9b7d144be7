//! Tile extraction.
//!
//! The slicer only rejects rectangles that fall outside the image. Callers
//! validate coordinates against the grid first (see [`TileGrid::validate`]).

use image::{imageops, RgbaImage};

use crate::error::TilesetError;

use super::decode::Tileset;
use super::grid::{TileCoord, TileGrid, TileRect};

/// A single tile cut out of a tileset.
#[derive(Debug, Clone)]
pub struct Tile {
    /// Grid coordinate the tile was cut from
    pub coord: TileCoord,

    /// Pixel rectangle in the source tileset
    pub rect: TileRect,

    /// Tile pixels
    pub image: RgbaImage,
}

impl Tile {
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }
}

/// Cut the tile at `coord` out of `tileset`.
///
/// Fails with [`TilesetError::ExtractionFailure`] when the tileset is too
/// small to hold even a single pixel per tile, or when the computed
/// rectangle falls outside the image.
pub fn slice(tileset: &Tileset, grid: &TileGrid, coord: TileCoord) -> Result<Tile, TilesetError> {
    let rect = grid
        .rect_for(coord, tileset.width(), tileset.height())
        .ok_or_else(|| TilesetError::ExtractionFailure {
            message: format!(
                "tile ({}, {}) has no rectangle in a {}x{} grid",
                coord.row,
                coord.col,
                grid.rows(),
                grid.cols()
            ),
        })?;

    if rect.is_empty() {
        return Err(TilesetError::ExtractionFailure {
            message: format!(
                "tileset of {}x{} pixels is too small for a {}x{} grid",
                tileset.width(),
                tileset.height(),
                grid.rows(),
                grid.cols()
            ),
        });
    }

    if rect.right > tileset.width() || rect.bottom > tileset.height() {
        return Err(TilesetError::ExtractionFailure {
            message: format!(
                "rectangle [{}, {})x[{}, {}) lies outside the {}x{} tileset",
                rect.left,
                rect.right,
                rect.top,
                rect.bottom,
                tileset.width(),
                tileset.height()
            ),
        });
    }

    let image = imageops::crop_imm(
        tileset.image(),
        rect.left,
        rect.top,
        rect.width(),
        rect.height(),
    )
    .to_image();

    Ok(Tile { coord, rect, image })
}
