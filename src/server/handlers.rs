//! HTTP request handlers for the tileset API.
//!
//! Every JSON endpoint answers with an envelope carrying a `success` flag.
//! Failures look like `{"success": false, "error": "<message>"}`.
//!
//! # Endpoints
//!
//! - `GET /api/tile/{row}/{col}` - Serve one tile
//! - `GET /api/tileset-image` - Serve the whole tileset (legacy)
//! - `GET /api/tileset-info` - Grid and pixel geometry
//! - `GET /health` - Health check endpoint

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use crate::error::TilesetError;
use crate::tile::{TileService, TilesetInfo};
use crate::tileset::TilesetSource;

// =============================================================================
// Application State
// =============================================================================

/// Shared application state containing the tile service.
///
/// This is passed to all handlers via Axum's State extractor.
pub struct AppState<S: TilesetSource> {
    /// The tile service for processing tile requests
    pub tile_service: Arc<TileService<S>>,

    /// Cache-Control max-age in seconds for image responses
    pub cache_max_age: u32,
}

impl<S: TilesetSource + 'static> AppState<S> {
    /// Create a new application state with custom cache max-age.
    pub fn with_cache_max_age(tile_service: TileService<S>, cache_max_age: u32) -> Self {
        Self {
            tile_service: Arc::new(tile_service),
            cache_max_age,
        }
    }

    fn cache_control(&self) -> HeaderValue {
        HeaderValue::from_str(&format!("public, max-age={}", self.cache_max_age))
            .unwrap_or_else(|_| HeaderValue::from_static("no-cache"))
    }
}

impl<S: TilesetSource> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            tile_service: Arc::clone(&self.tile_service),
            cache_max_age: self.cache_max_age,
        }
    }
}

// =============================================================================
// Request Parameters
// =============================================================================

/// Path parameters for tile requests.
///
/// Extracted from: `/api/tile/{row}/{col}`. Kept as strings so that
/// non-numeric input is answered with the JSON error envelope rather than
/// a plain-text extractor rejection.
#[derive(Debug, Deserialize)]
pub struct TilePathParams {
    pub row: String,
    pub col: String,
}

impl TilePathParams {
    /// Parse both segments as signed integers.
    pub fn parse(&self) -> Result<(i64, i64), TilesetError> {
        Ok((parse_coordinate(&self.row)?, parse_coordinate(&self.col)?))
    }
}

fn parse_coordinate(value: &str) -> Result<i64, TilesetError> {
    value
        .trim()
        .parse()
        .map_err(|_| TilesetError::MalformedCoordinate {
            value: value.to_string(),
        })
}

// =============================================================================
// Response Types
// =============================================================================

/// JSON error envelope returned for all error conditions.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Always `false`
    pub success: bool,

    /// Human-readable error message
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: message.into(),
        }
    }
}

/// Response body for a single tile.
#[derive(Debug, Serialize)]
pub struct TileBody {
    pub success: bool,
    pub image_data: String,
    pub width: u32,
    pub height: u32,
    pub row: u32,
    pub col: u32,
}

/// Grid summary embedded in the full tileset response.
#[derive(Debug, Serialize)]
pub struct TilesetGridSummary {
    pub rows: u32,
    pub cols: u32,
    pub total_tiles: u32,
}

/// Response body for the whole tileset.
#[derive(Debug, Serialize)]
pub struct TilesetImageBody {
    pub success: bool,
    pub image_data: String,
    pub width: u32,
    pub height: u32,
    pub tileset_info: TilesetGridSummary,
}

/// Tileset geometry as reported by the info endpoint.
#[derive(Debug, Serialize)]
pub struct TilesetInfoResponse {
    pub rows: u32,
    pub cols: u32,
    pub total_tiles: u32,
    pub full_width: u32,
    pub full_height: u32,
    pub tile_width: u32,
    pub tile_height: u32,
}

impl From<TilesetInfo> for TilesetInfoResponse {
    fn from(info: TilesetInfo) -> Self {
        Self {
            rows: info.rows,
            cols: info.cols,
            total_tiles: info.total_tiles,
            full_width: info.full_width,
            full_height: info.full_height,
            tile_width: info.tile_width,
            tile_height: info.tile_height,
        }
    }
}

/// Response body for the info endpoint.
#[derive(Debug, Serialize)]
pub struct TilesetInfoBody {
    pub success: bool,
    pub tileset: TilesetInfoResponse,
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,

    /// Service version
    pub version: String,
}

// =============================================================================
// Error Mapping
// =============================================================================

/// Convert TilesetError to HTTP response.
///
/// Caller mistakes map to 400 and are logged at WARN; everything else is a
/// server-side failure, mapped to 500 and logged at ERROR.
impl IntoResponse for TilesetError {
    fn into_response(self) -> Response {
        let status = if self.is_client_error() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };
        let message = self.to_string();

        if status.is_server_error() {
            error!(status = status.as_u16(), "Server error: {}", message);
        } else {
            warn!(status = status.as_u16(), "Client error: {}", message);
        }

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Handle tile requests.
///
/// # Endpoint
///
/// `GET /api/tile/{row}/{col}`
///
/// # Response
///
/// - `200 OK`: `{success, image_data, width, height, row, col}`
/// - `400 Bad Request`: Non-integer or out-of-range coordinate
/// - `500 Internal Server Error`: Tileset missing, corrupt, or not sliceable
pub async fn tile_handler<S: TilesetSource + 'static>(
    State(state): State<AppState<S>>,
    Path(params): Path<TilePathParams>,
) -> Result<Response, TilesetError> {
    let (row, col) = params.parse()?;
    let tile = state.tile_service.get_tile(row, col).await?;

    let body = TileBody {
        success: true,
        image_data: tile.data_url,
        width: tile.width,
        height: tile.height,
        row: tile.row,
        col: tile.col,
    };

    Ok((
        [(header::CACHE_CONTROL, state.cache_control())],
        Json(body),
    )
        .into_response())
}

/// Handle requests for the whole tileset image.
///
/// # Endpoint
///
/// `GET /api/tileset-image` (also `/api/boulder-image`)
///
/// The image is downscaled when its longest side exceeds the maximum
/// texture size.
pub async fn tileset_image_handler<S: TilesetSource + 'static>(
    State(state): State<AppState<S>>,
) -> Result<Response, TilesetError> {
    let full = state.tile_service.get_full_tileset().await?;

    let body = TilesetImageBody {
        success: true,
        image_data: full.data_url,
        width: full.width,
        height: full.height,
        tileset_info: TilesetGridSummary {
            rows: full.rows,
            cols: full.cols,
            total_tiles: full.total_tiles,
        },
    };

    Ok((
        [(header::CACHE_CONTROL, state.cache_control())],
        Json(body),
    )
        .into_response())
}

/// Handle tileset info requests.
///
/// # Endpoint
///
/// `GET /api/tileset-info`
///
/// # Response
///
/// `200 OK` with JSON body:
/// ```json
/// {
///   "success": true,
///   "tileset": {
///     "rows": 4, "cols": 4, "total_tiles": 16,
///     "full_width": 256, "full_height": 256,
///     "tile_width": 64, "tile_height": 64
///   }
/// }
/// ```
pub async fn tileset_info_handler<S: TilesetSource + 'static>(
    State(state): State<AppState<S>>,
) -> Result<Json<TilesetInfoBody>, TilesetError> {
    let info = state.tile_service.tileset_info().await?;

    Ok(Json(TilesetInfoBody {
        success: true,
        tileset: info.into(),
    }))
}

/// Handle health check requests.
///
/// # Endpoint
///
/// `GET /health`
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// =============================================================================
// Tests
// =============================================================================
