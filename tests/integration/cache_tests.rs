//! Tileset cache integration tests.
//!
//! Tests verify:
//! - The tileset is read once and reused across requests
//! - Failed loads are retried on the next request
//! - Concurrent first access triggers a single load
//! - Non-RGBA sources are normalized

use std::sync::Arc;
use std::time::Duration;

use axum::http::StatusCode;
use image::Rgba;

use tileset_streamer::error::TilesetError;
use tileset_streamer::tileset::{TileGrid, TilesetCache};

use super::test_utils::{
    body_json, create_rgb_tileset_png, create_test_router, create_tileset_png, get,
    MockTilesetSource,
};

// =============================================================================
// Single Load
// =============================================================================

#[tokio::test]
async fn test_repeated_calls_return_identical_data() {
    let source = MockTilesetSource::with_data(create_tileset_png(64, 64));
    let cache = TilesetCache::new(source.clone(), TileGrid::default());

    let first = cache.get_tileset().await.unwrap();
    for _ in 0..5 {
        let again = cache.get_tileset().await.unwrap();
        assert!(Arc::ptr_eq(&first, &again));
        assert_eq!(again.image().as_raw(), first.image().as_raw());
    }

    assert_eq!(source.read_count(), 1);
    assert_eq!(cache.load_count(), 1);
}

#[tokio::test]
async fn test_cached_value_survives_source_removal() {
    let source = MockTilesetSource::with_data(create_tileset_png(64, 64));
    let cache = TilesetCache::new(source.clone(), TileGrid::default());

    cache.get_tileset().await.unwrap();
    source.clear().await;

    assert!(cache.get_tileset().await.is_ok());
    assert_eq!(source.read_count(), 1);
}

#[tokio::test]
async fn test_many_requests_one_read() {
    let source = MockTilesetSource::with_data(create_tileset_png(128, 128));
    let router = create_test_router(source.clone());

    for row in 1..=4 {
        for col in 1..=4 {
            let response = get(&router, &format!("/api/tile/{}/{}", row, col)).await;
            assert_eq!(response.status(), StatusCode::OK);
        }
    }
    assert_eq!(get(&router, "/api/tileset-info").await.status(), StatusCode::OK);

    assert_eq!(source.read_count(), 1);
}

// =============================================================================
// Failure Handling
// =============================================================================

#[tokio::test]
async fn test_missing_then_available() {
    let source = MockTilesetSource::missing();
    let cache = TilesetCache::new(source.clone(), TileGrid::default());

    for _ in 0..3 {
        let err = cache.get_tileset().await.unwrap_err();
        assert!(matches!(err, TilesetError::SourceNotFound { .. }));
    }
    assert_eq!(source.read_count(), 3);
    assert!(!cache.is_loaded());

    source.set_data(create_tileset_png(64, 64)).await;

    let tileset = cache.get_tileset().await.unwrap();
    assert_eq!(tileset.width(), 64);
    assert_eq!(source.read_count(), 4);

    // Served from cache from now on
    cache.get_tileset().await.unwrap();
    cache.get_tileset().await.unwrap();
    assert_eq!(source.read_count(), 4);
}

#[tokio::test]
async fn test_missing_then_available_over_http() {
    let source = MockTilesetSource::missing();
    let router = create_test_router(source.clone());

    let response = get(&router, "/api/tile/1/1").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    source.set_data(create_tileset_png(256, 256)).await;

    let response = get(&router, "/api/tile/1/1").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["success"], true);
}

#[tokio::test]
async fn test_corrupt_data_not_cached() {
    let source = MockTilesetSource::with_data(&b"corrupt"[..]);
    let cache = TilesetCache::new(source.clone(), TileGrid::default());

    let err = cache.get_tileset().await.unwrap_err();
    assert!(matches!(err, TilesetError::DecodeFailure { .. }));

    source.set_data(create_tileset_png(32, 32)).await;
    assert!(cache.get_tileset().await.is_ok());
    assert_eq!(source.read_count(), 2);
}

// =============================================================================
// Concurrency
// =============================================================================

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_first_access_loads_once() {
    let source = MockTilesetSource::with_data(create_tileset_png(64, 64))
        .with_delay(Duration::from_millis(50));
    let cache = Arc::new(TilesetCache::new(source.clone(), TileGrid::default()));

    let handles: Vec<_> = (0..16)
        .map(|_| {
            let cache = Arc::clone(&cache);
            tokio::spawn(async move { cache.get_tileset().await })
        })
        .collect();

    let mut results = Vec::new();
    for handle in handles {
        results.push(handle.await.unwrap().unwrap());
    }

    assert_eq!(source.read_count(), 1);
    assert!(results.iter().all(|t| Arc::ptr_eq(t, &results[0])));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_http_requests_load_once() {
    let source = MockTilesetSource::with_data(create_tileset_png(256, 256))
        .with_delay(Duration::from_millis(50));
    let router = create_test_router(source.clone());

    let handles: Vec<_> = (1..=4)
        .map(|row| {
            let router = router.clone();
            tokio::spawn(async move { get(&router, &format!("/api/tile/{}/1", row)).await })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.await.unwrap().status(), StatusCode::OK);
    }

    assert_eq!(source.read_count(), 1);
}

// =============================================================================
// Normalization
// =============================================================================

#[tokio::test]
async fn test_rgb_source_normalized_to_rgba() {
    let source = MockTilesetSource::with_data(create_rgb_tileset_png(16, 16));
    let cache = TilesetCache::new(source, TileGrid::default());

    let tileset = cache.get_tileset().await.unwrap();
    assert_eq!(tileset.image().get_pixel(5, 5), &Rgba([40, 80, 120, 255]));
}
