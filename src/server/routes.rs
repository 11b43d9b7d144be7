//! Router configuration for the tileset server.
//!
//! This module defines the HTTP routes and applies middleware for CORS,
//! tracing and static file serving.
//!
//! # Route Structure
//!
//! ```text
//! /health                        - Health check
//! /api/tile/{row}/{col}          - One tile as an embedded PNG
//! /api/tileset-image             - Whole tileset (legacy, alias /api/boulder-image)
//! /api/tileset-info              - Grid and pixel geometry
//! /tilesets/{filename}           - Raw files from the static directory
//! ```
//!
//! # Example
//!
//! ```ignore
//! use tileset_streamer::server::routes::{create_router, RouterConfig};
//! use tileset_streamer::tile::TileService;
//! use tileset_streamer::tileset::{FsTilesetSource, TileGrid, TilesetCache};
//!
//! let cache = TilesetCache::new(FsTilesetSource::new("data/TileSets/tileset.png"), TileGrid::default());
//! let tile_service = TileService::new(cache);
//!
//! let config = RouterConfig::new("data/TileSets")
//!     .with_cors_origins(vec!["https://example.com".to_string()]);
//!
//! let router = create_router(tile_service, config);
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:5000").await?;
//! axum::serve(listener, router).await?;
//! ```

use std::path::PathBuf;
use std::time::Duration;

use axum::{routing::get, Router};
use http::header::CONTENT_TYPE;
use http::Method;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use super::handlers::{
    health_handler, tile_handler, tileset_image_handler, tileset_info_handler, AppState,
};
use crate::tile::TileService;
use crate::tileset::TilesetSource;

/// Default directory served under `/tilesets`.
pub const DEFAULT_STATIC_DIR: &str = "data/TileSets";

/// Default Cache-Control max-age in seconds (1 hour).
pub const DEFAULT_CACHE_MAX_AGE: u32 = 3600;

// =============================================================================
// Router Configuration
// =============================================================================

/// Configuration for the HTTP router.
#[derive(Debug, Clone)]
pub struct RouterConfig {
    /// Directory whose files are served under `/tilesets`
    pub static_dir: PathBuf,

    /// Allowed CORS origins (None = allow any origin)
    pub cors_origins: Option<Vec<String>>,

    /// Cache-Control max-age in seconds
    pub cache_max_age: u32,

    /// Whether to enable request tracing
    pub enable_tracing: bool,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self::new(DEFAULT_STATIC_DIR)
    }
}

impl RouterConfig {
    /// Create a new router configuration serving static files from `static_dir`.
    ///
    /// By default:
    /// - CORS allows any origin
    /// - Cache max-age is 1 hour (3600 seconds)
    /// - Tracing is enabled
    pub fn new(static_dir: impl Into<PathBuf>) -> Self {
        Self {
            static_dir: static_dir.into(),
            cors_origins: None,
            cache_max_age: DEFAULT_CACHE_MAX_AGE,
            enable_tracing: true,
        }
    }

    /// Set specific allowed CORS origins.
    ///
    /// Pass an empty vec to disallow all cross-origin requests.
    /// Pass None (or don't call this method) to allow any origin.
    pub fn with_cors_origins(mut self, origins: Vec<String>) -> Self {
        self.cors_origins = Some(origins);
        self
    }

    /// Allow any CORS origin.
    pub fn with_cors_any_origin(mut self) -> Self {
        self.cors_origins = None;
        self
    }

    /// Set the Cache-Control max-age in seconds.
    pub fn with_cache_max_age(mut self, seconds: u32) -> Self {
        self.cache_max_age = seconds;
        self
    }

    /// Enable or disable request tracing.
    pub fn with_tracing(mut self, enabled: bool) -> Self {
        self.enable_tracing = enabled;
        self
    }
}

// =============================================================================
// Router Builder
// =============================================================================

/// Create the main application router.
///
/// # Arguments
///
/// * `tile_service` - The tile service for handling tile requests
/// * `config` - Router configuration
pub fn create_router<S>(tile_service: TileService<S>, config: RouterConfig) -> Router
where
    S: TilesetSource + 'static,
{
    let app_state = AppState::with_cache_max_age(tile_service, config.cache_max_age);
    let cors = build_cors_layer(&config);

    let api_routes = Router::new()
        .route("/tile/{row}/{col}", get(tile_handler::<S>))
        .route("/tileset-image", get(tileset_image_handler::<S>))
        .route("/boulder-image", get(tileset_image_handler::<S>))
        .route("/tileset-info", get(tileset_info_handler::<S>))
        .with_state(app_state);

    let router = Router::new()
        .route("/health", get(health_handler))
        .nest("/api", api_routes)
        .nest_service("/tilesets", ServeDir::new(&config.static_dir))
        .layer(cors);

    if config.enable_tracing {
        router.layer(TraceLayer::new_for_http())
    } else {
        router
    }
}

/// Build the CORS layer based on configuration.
fn build_cors_layer(config: &RouterConfig) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::HEAD, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(86400)); // 24 hours

    match &config.cors_origins {
        None => cors.allow_origin(Any),
        Some(origins) if origins.is_empty() => cors,
        Some(origins) => {
            let parsed_origins: Vec<_> = origins.iter().filter_map(|o| o.parse().ok()).collect();
            cors.allow_origin(parsed_origins)
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
