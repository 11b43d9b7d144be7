//! Single-slot cache for the decoded tileset.
//!
//! The tileset is loaded lazily on first access and kept for the life of the
//! process. The slot is write-once: concurrent first callers wait on a single
//! load, and once populated the value is shared read-only without locking.
//!
//! Failed loads are not remembered. A missing or corrupt file produces an
//! error for that call, and the next call tries again.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

use crate::error::TilesetError;

use super::decode::Tileset;
use super::grid::TileGrid;
use super::source::TilesetSource;

/// Lazily loaded, write-once tileset cache.
///
/// # Example
///
/// ```ignore
/// use tileset_streamer::tileset::{FsTilesetSource, TileGrid, TilesetCache};
///
/// let cache = TilesetCache::new(FsTilesetSource::new("data/TileSets/tileset.png"), TileGrid::default());
///
/// // First call reads and decodes, later calls are served from memory
/// let tileset = cache.get_tileset().await?;
/// println!("{}x{}", tileset.width(), tileset.height());
/// ```
pub struct TilesetCache<S: TilesetSource> {
    source: S,
    grid: TileGrid,
    strict_grid: bool,
    slot: OnceCell<Arc<Tileset>>,
    load_count: AtomicUsize,
}

impl<S: TilesetSource> TilesetCache<S> {
    /// Create an empty cache for the given source and grid.
    pub fn new(source: S, grid: TileGrid) -> Self {
        Self {
            source,
            grid,
            strict_grid: false,
            slot: OnceCell::new(),
            load_count: AtomicUsize::new(0),
        }
    }

    /// Reject tilesets whose dimensions are not a multiple of the grid.
    ///
    /// By default such tilesets are accepted and the trailing pixels are
    /// simply never part of any tile.
    pub fn with_strict_grid(mut self, strict: bool) -> Self {
        self.strict_grid = strict;
        self
    }

    /// Get the decoded tileset, loading it on first access.
    pub async fn get_tileset(&self) -> Result<Arc<Tileset>, TilesetError> {
        let tileset = self.slot.get_or_try_init(|| self.load()).await?;
        Ok(Arc::clone(tileset))
    }

    /// Whether a tileset has been successfully loaded.
    pub fn is_loaded(&self) -> bool {
        self.slot.initialized()
    }

    /// Number of load attempts made so far, successful or not.
    pub fn load_count(&self) -> usize {
        self.load_count.load(Ordering::SeqCst)
    }

    pub fn grid(&self) -> TileGrid {
        self.grid
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    async fn load(&self) -> Result<Arc<Tileset>, TilesetError> {
        let attempt = self.load_count.fetch_add(1, Ordering::SeqCst) + 1;
        let location = self.source.location();
        debug!(location = %location, attempt, "Loading tileset");

        let data = self.source.read().await.map_err(|e| {
            warn!(location = %location, attempt, "Tileset unavailable: {}", e);
            e
        })?;

        let tileset = tokio::task::spawn_blocking(move || Tileset::decode(&data))
            .await
            .map_err(|e| TilesetError::DecodeFailure {
                message: e.to_string(),
            })??;

        if self.strict_grid && !self.grid.divides(tileset.width(), tileset.height()) {
            return Err(TilesetError::UnevenGrid {
                width: tileset.width(),
                height: tileset.height(),
                rows: self.grid.rows(),
                cols: self.grid.cols(),
            });
        }

        if !self.grid.divides(tileset.width(), tileset.height()) {
            warn!(
                width = tileset.width(),
                height = tileset.height(),
                rows = self.grid.rows(),
                cols = self.grid.cols(),
                "Tileset dimensions are not a multiple of the grid; edge pixels will be dropped"
            );
        }

        info!(
            location = %location,
            width = tileset.width(),
            height = tileset.height(),
            "Tileset loaded"
        );

        Ok(Arc::new(tileset))
    }
}
