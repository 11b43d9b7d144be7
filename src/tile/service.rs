//! Tile Service for orchestrating tile generation.
//!
//! The TileService is the main entry point for requests coming from the HTTP
//! layer. It orchestrates:
//! - Coordinate validation against the grid
//! - Tileset access via the cache
//! - Tile extraction
//! - PNG encoding into an embedded payload
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                         TileService                              │
//! │  ┌─────────────────────────────────────────────────────────┐    │
//! │  │                    get_tile()                           │    │
//! │  │  1. Validate coord    3. Slice tile                     │    │
//! │  │  2. Get tileset       4. Encode PNG payload             │    │
//! │  └─────────────────────────────────────────────────────────┘    │
//! │           │                    │                    │            │
//! │           ▼                    ▼                    ▼            │
//! │    ┌──────────────┐     ┌───────────┐     ┌──────────────────┐  │
//! │    │ TilesetCache │     │  slice()  │     │  PngTileEncoder  │  │
//! │    └──────────────┘     └───────────┘     └──────────────────┘  │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use tracing::debug;

use crate::error::TilesetError;
use crate::tileset::{slice, TileGrid, TilesetCache, TilesetSource};

use super::encoder::{EncodedImage, PngTileEncoder};

// =============================================================================
// Responses
// =============================================================================

/// An encoded tile.
#[derive(Debug, Clone)]
pub struct TileResponse {
    /// `data:image/png;base64,...` payload
    pub data_url: String,

    /// Width of the encoded tile in pixels
    pub width: u32,

    /// Height of the encoded tile in pixels
    pub height: u32,

    /// 1-based row the tile was cut from
    pub row: u32,

    /// 1-based column the tile was cut from
    pub col: u32,
}

/// The whole tileset, encoded for transport.
#[derive(Debug, Clone)]
pub struct TilesetImageResponse {
    /// `data:image/png;base64,...` payload
    pub data_url: String,

    /// Width of the encoded (possibly downscaled) image
    pub width: u32,

    /// Height of the encoded (possibly downscaled) image
    pub height: u32,

    pub rows: u32,
    pub cols: u32,
    pub total_tiles: u32,
}

/// Grid and pixel geometry of the loaded tileset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TilesetInfo {
    pub rows: u32,
    pub cols: u32,
    pub total_tiles: u32,
    pub full_width: u32,
    pub full_height: u32,
    pub tile_width: u32,
    pub tile_height: u32,
}

// =============================================================================
// Tile Service
// =============================================================================

/// Service for slicing and encoding tiles.
///
/// # Type Parameters
///
/// * `S` - The tileset source type (e.g., filesystem-backed source)
///
/// # Example
///
/// ```ignore
/// use tileset_streamer::tile::TileService;
/// use tileset_streamer::tileset::{FsTilesetSource, TileGrid, TilesetCache};
///
/// let cache = TilesetCache::new(FsTilesetSource::new("tileset.png"), TileGrid::default());
/// let service = TileService::new(cache);
///
/// let tile = service.get_tile(2, 3).await?;
/// println!("{}x{} tile at ({}, {})", tile.width, tile.height, tile.row, tile.col);
/// ```
pub struct TileService<S: TilesetSource> {
    /// The tileset cache
    cache: Arc<TilesetCache<S>>,

    /// PNG encoder
    encoder: PngTileEncoder,
}

impl<S: TilesetSource + 'static> TileService<S> {
    /// Create a new tile service with the default encoder.
    pub fn new(cache: TilesetCache<S>) -> Self {
        Self::with_encoder(cache, PngTileEncoder::new())
    }

    /// Create a new tile service with a custom encoder.
    pub fn with_encoder(cache: TilesetCache<S>, encoder: PngTileEncoder) -> Self {
        Self {
            cache: Arc::new(cache),
            encoder,
        }
    }

    /// Get a tile by its 1-based grid coordinate.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The coordinate is outside the grid
    /// - The tileset cannot be read or decoded
    /// - The tile cannot be extracted or encoded
    pub async fn get_tile(&self, row: i64, col: i64) -> Result<TileResponse, TilesetError> {
        let grid = self.grid();
        let coord = grid.validate(row, col)?;

        let tileset = self.cache.get_tileset().await?;
        let encoder = self.encoder.clone();

        let (tile, encoded) = run_blocking(move || {
            let tile = slice(&tileset, &grid, coord)?;
            let encoded = encoder.encode(&tile.image)?;
            Ok((tile, encoded))
        })
        .await?;

        debug!(
            row = coord.row,
            col = coord.col,
            left = tile.rect.left,
            top = tile.rect.top,
            width = encoded.width,
            height = encoded.height,
            "Tile served"
        );

        Ok(TileResponse {
            data_url: encoded.data_url,
            width: encoded.width,
            height: encoded.height,
            row: coord.row,
            col: coord.col,
        })
    }

    /// Get the whole tileset, capped to the maximum texture size.
    pub async fn get_full_tileset(&self) -> Result<TilesetImageResponse, TilesetError> {
        let grid = self.grid();
        let tileset = self.cache.get_tileset().await?;
        let encoder = self.encoder.clone();

        let encoded: EncodedImage = run_blocking(move || encoder.encode(tileset.image())).await?;

        Ok(TilesetImageResponse {
            data_url: encoded.data_url,
            width: encoded.width,
            height: encoded.height,
            rows: grid.rows(),
            cols: grid.cols(),
            total_tiles: grid.total_tiles(),
        })
    }

    /// Describe the grid and pixel geometry of the tileset.
    pub async fn tileset_info(&self) -> Result<TilesetInfo, TilesetError> {
        let grid = self.grid();
        let tileset = self.cache.get_tileset().await?;
        let (tile_width, tile_height) = grid.tile_size(tileset.width(), tileset.height());

        Ok(TilesetInfo {
            rows: grid.rows(),
            cols: grid.cols(),
            total_tiles: grid.total_tiles(),
            full_width: tileset.width(),
            full_height: tileset.height(),
            tile_width,
            tile_height,
        })
    }

    pub fn grid(&self) -> TileGrid {
        self.cache.grid()
    }

    /// Get a reference to the underlying tileset cache.
    pub fn cache(&self) -> &Arc<TilesetCache<S>> {
        &self.cache
    }
}

/// Run CPU-bound image work on the blocking thread pool.
async fn run_blocking<T, F>(f: F) -> Result<T, TilesetError>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, TilesetError> + Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| TilesetError::ExtractionFailure {
            message: e.to_string(),
        })?
}

// =============================================================================
// Tests
// =============================================================================
