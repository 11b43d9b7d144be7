//! Test utilities for integration tests.
//!
//! This module provides mock tileset sources and helpers for building test
//! images and routers.

use std::io::Cursor;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use bytes::Bytes;
use http_body_util::BodyExt;
use image::{DynamicImage, ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};
use tokio::sync::RwLock;
use tower::ServiceExt;

use tileset_streamer::error::TilesetError;
use tileset_streamer::tile::{PngTileEncoder, TileService, PNG_DATA_URL_PREFIX};
use tileset_streamer::tileset::{TileGrid, TilesetCache, TilesetSource};
use tileset_streamer::{create_router, RouterConfig};

// =============================================================================
// Mock Tileset Source with Read Tracking
// =============================================================================

/// An in-memory tileset source that counts reads.
///
/// The content can be swapped at runtime to simulate a file appearing or
/// disappearing. Clones share state.
#[derive(Clone, Default)]
pub struct MockTilesetSource {
    data: Arc<RwLock<Option<Bytes>>>,
    read_count: Arc<AtomicUsize>,
    delay: Option<Duration>,
}

impl MockTilesetSource {
    /// A source with no data: every read fails with `SourceNotFound`.
    pub fn missing() -> Self {
        Self::default()
    }

    pub fn with_data(data: impl Into<Bytes>) -> Self {
        Self {
            data: Arc::new(RwLock::new(Some(data.into()))),
            ..Self::default()
        }
    }

    /// Delay every read, widening the window for concurrent first access.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub async fn set_data(&self, data: impl Into<Bytes>) {
        *self.data.write().await = Some(data.into());
    }

    pub async fn clear(&self) {
        *self.data.write().await = None;
    }

    pub fn read_count(&self) -> usize {
        self.read_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TilesetSource for MockTilesetSource {
    async fn read(&self) -> Result<Bytes, TilesetError> {
        self.read_count.fetch_add(1, Ordering::SeqCst);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        self.data
            .read()
            .await
            .clone()
            .ok_or_else(|| TilesetError::SourceNotFound {
                path: self.location(),
                message: "file does not exist".to_string(),
            })
    }

    fn location(&self) -> String {
        "mock://tileset.png".to_string()
    }
}

// =============================================================================
// Image Helpers
// =============================================================================

/// Build an RGBA image where each pixel encodes its own coordinates.
///
/// Red/green hold the low byte of x/y, blue/alpha the high byte (alpha is
/// offset so it is never fully transparent).
pub fn positional_image(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| {
        Rgba([
            (x & 0xFF) as u8,
            (y & 0xFF) as u8,
            (x >> 8) as u8,
            255 - (y >> 8) as u8,
        ])
    })
}

/// Recover the source coordinates encoded by [`positional_image`].
pub fn decode_position(pixel: &Rgba<u8>) -> (u32, u32) {
    let [r, g, b, a] = pixel.0;
    let x = (u32::from(b) << 8) | u32::from(r);
    let y = ((255 - u32::from(a)) << 8) | u32::from(g);
    (x, y)
}

pub fn encode_png(image: DynamicImage) -> Vec<u8> {
    let mut buf = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
        .unwrap();
    buf
}

/// PNG bytes of a positional RGBA tileset.
pub fn create_tileset_png(width: u32, height: u32) -> Vec<u8> {
    encode_png(DynamicImage::ImageRgba8(positional_image(width, height)))
}

/// PNG bytes of a solid RGB (no alpha) tileset.
pub fn create_rgb_tileset_png(width: u32, height: u32) -> Vec<u8> {
    encode_png(DynamicImage::ImageRgb8(RgbImage::from_pixel(
        width,
        height,
        Rgb([40, 80, 120]),
    )))
}

/// Decode a `data:image/png;base64,...` payload.
pub fn decode_data_url(data_url: &str) -> RgbaImage {
    let encoded = data_url
        .strip_prefix(PNG_DATA_URL_PREFIX)
        .expect("payload should be a PNG data URL");
    let png = STANDARD.decode(encoded).expect("payload should be base64");
    image::load_from_memory_with_format(&png, ImageFormat::Png)
        .expect("payload should be a PNG")
        .to_rgba8()
}

// =============================================================================
// Router Helpers
// =============================================================================

pub fn create_service(source: MockTilesetSource) -> TileService<MockTilesetSource> {
    TileService::new(TilesetCache::new(source, TileGrid::default()))
}

pub fn create_test_router(source: MockTilesetSource) -> Router {
    create_router(
        create_service(source),
        RouterConfig::default().with_tracing(false),
    )
}

/// Router whose encoder caps images at `max_texture_size` pixels.
pub fn create_capped_router(source: MockTilesetSource, max_texture_size: u32) -> Router {
    let cache = TilesetCache::new(source, TileGrid::default());
    let service =
        TileService::with_encoder(cache, PngTileEncoder::with_max_texture_size(max_texture_size));
    create_router(service, RouterConfig::default().with_tracing(false))
}

pub async fn get(router: &Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    router.clone().oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).expect("body should be JSON")
}
