//! Tile service layer.
//!
//! This module turns tileset tiles into transport-ready payloads for the
//! HTTP layer.
//!
//! # Architecture
//!
//! The tile service sits between the HTTP layer and the tileset cache:
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │              HTTP Handlers              │
//! └────────────────────┬────────────────────┘
//!                      │
//!                      ▼
//! ┌─────────────────────────────────────────┐
//! │              Tile Service               │
//! │  ┌──────────────┐  ┌─────────────────┐  │
//! │  │   slice()    │  │  PNG Encoder    │  │
//! │  │  (crop by    │  │  (cap → PNG →   │  │
//! │  │   coord)     │  │   data URL)     │  │
//! │  └──────────────┘  └─────────────────┘  │
//! └────────────────────┬────────────────────┘
//!                      │
//!                      ▼
//! ┌─────────────────────────────────────────┐
//! │             TilesetCache                │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Components
//!
//! - [`TileService`]: Main entry point for tile requests, orchestrates the full pipeline
//! - [`PngTileEncoder`]: Caps image size and produces `data:image/png;base64,...` payloads
//! - [`TileResponse`], [`TilesetImageResponse`], [`TilesetInfo`]: Service results

mod encoder;
mod service;

pub use encoder::{
    bounded_dimensions, encode_png, thumbnail, to_data_url, EncodedImage, PngTileEncoder,
    DEFAULT_MAX_TEXTURE_SIZE, PNG_DATA_URL_PREFIX,
};
pub use service::{TileResponse, TileService, TilesetImageResponse, TilesetInfo};
