//! # Tileset Streamer
//!
//! A small tile server for browser-based (WebGL) renderers.
//!
//! The server loads a single tileset image (a regular grid of equally sized
//! sprites), cuts out individual tiles by 1-based `(row, col)` coordinate and
//! returns them as embedded PNG payloads (`data:image/png;base64,...`) inside
//! JSON responses, so clients can request textures lazily.
//!
//! ## Features
//!
//! - **Lazy, write-once caching**: The tileset is decoded on first use and shared afterwards
//! - **Grid slicing**: Disjoint tile rectangles computed from the tileset dimensions
//! - **Texture capping**: Oversized images are downscaled, preserving aspect ratio
//! - **Static passthrough**: Raw tileset files served under `/tilesets`
//! - **Placeholders**: Generates a stand-in tileset when none is available
//!
//! ## Architecture
//!
//! - [`tileset`] - Tileset source, decoding, cache, grid arithmetic and slicing
//! - [`tile`] - Tile service and PNG transport encoding
//! - [`server`] - Axum-based HTTP server and routes
//! - [`placeholder`] - Placeholder tileset generation
//! - [`config`] - CLI and configuration types
//!
//! ## Example
//!
//! ```rust,no_run
//! use tileset_streamer::{create_router, FsTilesetSource, RouterConfig, TileGrid, TileService, TilesetCache};
//!
//! #[tokio::main]
//! async fn main() {
//!     let source = FsTilesetSource::new("data/TileSets/tileset.png");
//!     let cache = TilesetCache::new(source, TileGrid::default());
//!     let router = create_router(TileService::new(cache), RouterConfig::default());
//!
//!     let listener = tokio::net::TcpListener::bind("0.0.0.0:5000").await.unwrap();
//!     axum::serve(listener, router).await.unwrap();
//! }
//! ```

pub mod config;
pub mod error;
pub mod placeholder;
pub mod server;
pub mod tile;
pub mod tileset;

// Re-export commonly used types
pub use config::{CheckConfig, Cli, Command, GridArgs, PlaceholderConfig, ServeConfig};
pub use error::{ConfigError, PlaceholderError, TilesetError};
pub use placeholder::{
    generate_placeholder, placeholder_dimensions, write_placeholder, DEFAULT_PLACEHOLDER_TILE_SIZE,
};
pub use server::{
    create_router, health_handler, tile_handler, tileset_image_handler, tileset_info_handler,
    AppState, ErrorResponse, HealthResponse, RouterConfig,
};
pub use tile::{
    EncodedImage, PngTileEncoder, TileResponse, TileService, TilesetImageResponse, TilesetInfo,
    DEFAULT_MAX_TEXTURE_SIZE,
};
pub use tileset::{
    slice, FsTilesetSource, Tile, TileCoord, TileGrid, TileRect, Tileset, TilesetCache,
    TilesetSource,
};
