//! Filesystem integration tests.
//!
//! Tests verify:
//! - A tileset file appearing after startup is picked up on the next request
//! - Static files are passed through under /tilesets
//! - Placeholder tilesets can be written and served

use axum::http::StatusCode;
use http_body_util::BodyExt;

use tileset_streamer::placeholder::write_placeholder;
use tileset_streamer::tile::TileService;
use tileset_streamer::tileset::{FsTilesetSource, TileGrid, TilesetCache};
use tileset_streamer::{create_router, RouterConfig};

use super::test_utils::{body_json, create_tileset_png, get};

fn fs_router(dir: &std::path::Path, file: &str) -> axum::Router {
    let source = FsTilesetSource::new(dir.join(file));
    let cache = TilesetCache::new(source, TileGrid::default());
    create_router(
        TileService::new(cache),
        RouterConfig::new(dir).with_tracing(false),
    )
}

#[tokio::test]
async fn test_file_appears_later() {
    let dir = tempfile::tempdir().unwrap();
    let router = fs_router(dir.path(), "tileset.png");

    let response = get(&router, "/api/tileset-info").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("tileset.png"));

    std::fs::write(dir.path().join("tileset.png"), create_tileset_png(128, 64)).unwrap();

    let response = get(&router, "/api/tileset-info").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["tileset"]["tile_width"], 32);
    assert_eq!(json["tileset"]["tile_height"], 16);
}

#[tokio::test]
async fn test_static_passthrough() {
    let dir = tempfile::tempdir().unwrap();
    let png = create_tileset_png(16, 16);
    std::fs::write(dir.path().join("sprites.png"), &png).unwrap();

    let router = fs_router(dir.path(), "sprites.png");

    let response = get(&router, "/tilesets/sprites.png").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers().get("content-type").unwrap(), "image/png");

    let body = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&body[..], &png[..]);
}

#[tokio::test]
async fn test_static_missing_file_is_404() {
    let dir = tempfile::tempdir().unwrap();
    let router = fs_router(dir.path(), "tileset.png");

    let response = get(&router, "/tilesets/nope.png").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_placeholder_is_servable() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tileset.png");
    write_placeholder(&path, &TileGrid::default(), 32).unwrap();

    let router = fs_router(dir.path(), "tileset.png");

    let json = body_json(get(&router, "/api/tile/3/2").await).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["width"], 32);
    assert_eq!(json["height"], 32);
}
