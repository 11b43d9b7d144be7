//! HTTP server layer for the tileset streamer.
//!
//! This module provides the HTTP API consumed by the browser renderer.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                         HTTP Layer                              │
//! │              GET /api/tile/{row}/{col}                          │
//! │                                                                 │
//! │  ┌──────────────────────────┐  ┌─────────────────────────────┐  │
//! │  │        handlers          │  │           routes            │  │
//! │  │ (requests, JSON envelope)│  │ (router, CORS, static dir)  │  │
//! │  └──────────────────────────┘  └─────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

pub mod handlers;
pub mod routes;

pub use handlers::{
    health_handler, tile_handler, tileset_image_handler, tileset_info_handler, AppState,
    ErrorResponse, HealthResponse, TileBody, TilePathParams, TilesetGridSummary, TilesetImageBody,
    TilesetInfoBody, TilesetInfoResponse,
};
pub use routes::{create_router, RouterConfig, DEFAULT_CACHE_MAX_AGE, DEFAULT_STATIC_DIR};
