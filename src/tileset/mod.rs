//! Tileset loading, caching and slicing.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │              TilesetCache               │
//! │   (write-once slot, loads on demand)    │
//! └──────────┬───────────────────┬──────────┘
//!            │                   │
//!            ▼                   ▼
//! ┌──────────────────┐  ┌──────────────────┐
//! │  TilesetSource   │  │  Tileset::decode │
//! │  (raw bytes)     │  │  (→ RGBA8)       │
//! └──────────────────┘  └──────────────────┘
//!
//!   TileGrid + TileCoord ──► slice() ──► Tile
//! ```
//!
//! # Components
//!
//! - [`TilesetCache`]: holds the decoded tileset once it has been loaded
//! - [`TilesetSource`]: async trait for reading the encoded image
//! - [`FsTilesetSource`]: filesystem implementation of [`TilesetSource`]
//! - [`Tileset`]: decoded RGBA image
//! - [`TileGrid`], [`TileCoord`], [`TileRect`]: grid arithmetic
//! - [`slice`]: cuts a [`Tile`] out of a [`Tileset`]

mod cache;
mod decode;
mod grid;
mod slicer;
mod source;

pub use cache::TilesetCache;
pub use decode::Tileset;
pub use grid::{TileCoord, TileGrid, TileRect, DEFAULT_GRID_COLS, DEFAULT_GRID_ROWS};
pub use slicer::{slice, Tile};
pub use source::{FsTilesetSource, TilesetSource};
