//! Grid arithmetic for tilesets.
//!
//! A tileset is an image split into `rows × cols` equally sized cells. Cells
//! are addressed by 1-based `(row, col)` coordinates with a top-left origin.
//!
//! Tile dimensions use floor division, so when the image size is not a
//! multiple of the grid the trailing pixels on the right and bottom edges
//! belong to no tile.

use crate::error::{ConfigError, TilesetError};

/// Default number of rows in the tileset grid.
pub const DEFAULT_GRID_ROWS: u32 = 4;

/// Default number of columns in the tileset grid.
pub const DEFAULT_GRID_COLS: u32 = 4;

// =============================================================================
// Coordinates and Rectangles
// =============================================================================

/// A 1-based tile coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileCoord {
    /// Row index, 1 = top
    pub row: u32,

    /// Column index, 1 = left
    pub col: u32,
}

impl TileCoord {
    pub fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }
}

/// A half-open pixel rectangle `[left, right) × [top, bottom)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileRect {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl TileRect {
    pub fn width(&self) -> u32 {
        self.right - self.left
    }

    pub fn height(&self) -> u32 {
        self.bottom - self.top
    }

    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// Whether two rectangles share at least one pixel.
    pub fn overlaps(&self, other: &TileRect) -> bool {
        self.left < other.right
            && other.left < self.right
            && self.top < other.bottom
            && other.top < self.bottom
    }

    /// Whether the pixel `(x, y)` lies inside this rectangle.
    pub fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.left && x < self.right && y >= self.top && y < self.bottom
    }
}

// =============================================================================
// Tile Grid
// =============================================================================

/// Dimensions of the tile grid laid over a tileset image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileGrid {
    rows: u32,
    cols: u32,
}

impl Default for TileGrid {
    fn default() -> Self {
        Self {
            rows: DEFAULT_GRID_ROWS,
            cols: DEFAULT_GRID_COLS,
        }
    }
}

impl TileGrid {
    /// Create a grid with the given number of rows and columns.
    ///
    /// Both must be at least 1, and the tile count must fit in a `u32`.
    pub fn new(rows: u32, cols: u32) -> Result<Self, ConfigError> {
        if rows == 0 || cols == 0 {
            return Err(ConfigError::EmptyGrid { rows, cols });
        }
        if rows.checked_mul(cols).is_none() {
            return Err(ConfigError::Invalid(format!(
                "grid of {}x{} has too many tiles",
                rows, cols
            )));
        }
        Ok(Self { rows, cols })
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn cols(&self) -> u32 {
        self.cols
    }

    pub fn total_tiles(&self) -> u32 {
        self.rows * self.cols
    }

    /// Check that a coordinate lies inside the grid.
    ///
    /// Accepts signed values so that callers can pass raw request input
    /// (including zero and negatives) and get a uniform rejection.
    pub fn validate(&self, row: i64, col: i64) -> Result<TileCoord, TilesetError> {
        let in_range = |value: i64, max: u32| value >= 1 && value <= i64::from(max);

        if !in_range(row, self.rows) || !in_range(col, self.cols) {
            return Err(TilesetError::InvalidCoordinate {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            });
        }

        Ok(TileCoord::new(row as u32, col as u32))
    }

    /// Size of a single tile for an image of the given dimensions.
    pub fn tile_size(&self, width: u32, height: u32) -> (u32, u32) {
        (width / self.cols, height / self.rows)
    }

    /// Whether the image dimensions split into whole tiles.
    pub fn divides(&self, width: u32, height: u32) -> bool {
        width % self.cols == 0 && height % self.rows == 0
    }

    /// Pixel rectangle covered by `coord` in an image of the given dimensions.
    ///
    /// Returns `None` for a zero coordinate or when the rectangle would not
    /// fit in `u32` pixel space. Coordinates past the grid still yield a
    /// rectangle; callers bound-check it against the image.
    pub fn rect_for(&self, coord: TileCoord, width: u32, height: u32) -> Option<TileRect> {
        let (tile_width, tile_height) = self.tile_size(width, height);
        let left = coord.col.checked_sub(1)?.checked_mul(tile_width)?;
        let top = coord.row.checked_sub(1)?.checked_mul(tile_height)?;

        Some(TileRect {
            left,
            top,
            right: left.checked_add(tile_width)?,
            bottom: top.checked_add(tile_height)?,
        })
    }

    /// All coordinates in row-major order.
    pub fn coords(&self) -> impl Iterator<Item = TileCoord> {
        let cols = self.cols;
        (1..=self.rows).flat_map(move |row| (1..=cols).map(move |col| TileCoord::new(row, col)))
    }
}

// =============================================================================
// Tests
// =============================================================================
