//! Tileset Streamer - serves tiles of a tileset image to WebGL clients.
//!
//! This binary starts the HTTP server and configures all components.

use clap::Parser;
use std::io::Write;
use std::process::ExitCode;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tileset_streamer::{
    config::{CheckConfig, Cli, Command, PlaceholderConfig, ServeConfig},
    placeholder::write_placeholder,
    server::{create_router, RouterConfig},
    tile::{PngTileEncoder, TileService},
    tileset::{FsTilesetSource, TilesetCache},
    DEFAULT_PLACEHOLDER_TILE_SIZE,
};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.into_command() {
        Command::Serve(config) => run_serve(config).await,
        Command::Check(config) => run_check(config).await,
        Command::Placeholder(config) => run_placeholder(config),
    }
}

// =============================================================================
// Serve Command
// =============================================================================

async fn run_serve(config: ServeConfig) -> ExitCode {
    init_logging(config.verbose);

    if let Err(e) = config.validate() {
        error!("Configuration error: {}", e);
        return ExitCode::FAILURE;
    }

    let grid = match config.grid() {
        Ok(grid) => grid,
        Err(e) => {
            error!("Configuration error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    info!("Tileset Streamer v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration:");
    info!("  Tileset: {}", config.tileset.display());
    info!("  Grid: {} rows x {} cols", grid.rows(), grid.cols());
    info!("  Static dir: {}", config.static_dir.display());
    info!("  Max texture size: {}px", config.max_texture_size);
    if config.strict_grid {
        info!("  Strict grid: enabled");
    }

    if !config.tileset.exists() {
        if config.create_placeholder {
            info!("Tileset missing, writing placeholder");
            if let Err(e) = write_placeholder(&config.tileset, &grid, DEFAULT_PLACEHOLDER_TILE_SIZE)
            {
                error!("Failed to write placeholder: {}", e);
                return ExitCode::FAILURE;
            }
        } else {
            warn!(
                "  Tileset file not found; requests will fail until it exists \
                 (use --create-placeholder to generate one)"
            );
        }
    }

    let cache = TilesetCache::new(FsTilesetSource::new(&config.tileset), grid)
        .with_strict_grid(config.strict_grid);
    let encoder = PngTileEncoder::with_max_texture_size(config.max_texture_size);
    let tile_service = TileService::with_encoder(cache, encoder);

    let router = create_router(tile_service, build_router_config(&config));

    let addr = config.bind_address();

    info!("");
    info!("────────────────────────────────────────────────────────────────");
    info!("  Server listening on: http://{}", addr);
    info!("");
    info!("  Try these endpoints:");
    info!("    curl http://{}/health", addr);
    info!("    curl http://{}/api/tileset-info", addr);
    info!("    curl http://{}/api/tile/1/1", addr);
    info!("────────────────────────────────────────────────────────────────");
    info!("");

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind to {}: {}", addr, e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = axum::serve(listener, router).await {
        error!("Server error: {}", e);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

/// Initialize the tracing/logging subsystem.
fn init_logging(verbose: bool) {
    let env_filter = if verbose {
        "tileset_streamer=debug,tower_http=debug"
    } else {
        "tileset_streamer=info,tower_http=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| env_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Build RouterConfig from the application ServeConfig.
fn build_router_config(config: &ServeConfig) -> RouterConfig {
    let mut router_config = RouterConfig::new(&config.static_dir)
        .with_cache_max_age(config.cache_max_age)
        .with_tracing(!config.no_tracing);

    if let Some(ref origins) = config.cors_origins {
        router_config = router_config.with_cors_origins(origins.clone());
    }

    router_config
}

// =============================================================================
// Check Command
// =============================================================================

async fn run_check(config: CheckConfig) -> ExitCode {
    if config.verbose {
        init_logging(true);
    }

    println!("Tileset Check");
    println!("═════════════");
    println!();

    let grid = match config.grid.grid() {
        Ok(grid) => grid,
        Err(e) => {
            println!("✗ Grid: {}", e);
            return ExitCode::FAILURE;
        }
    };
    println!("✓ Grid: {} rows x {} cols", grid.rows(), grid.cols());

    print!("Loading {}... ", config.tileset.display());
    let _ = std::io::stdout().flush();

    let cache = TilesetCache::new(FsTilesetSource::new(&config.tileset), grid)
        .with_strict_grid(config.strict_grid);

    let tileset = match cache.get_tileset().await {
        Ok(tileset) => {
            println!("✓ success");
            tileset
        }
        Err(e) => {
            println!("✗ failed");
            println!();
            println!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let (tile_width, tile_height) = grid.tile_size(tileset.width(), tileset.height());
    println!("  Size: {}x{} px", tileset.width(), tileset.height());
    println!("  Tile size: {}x{} px", tile_width, tile_height);
    println!("  Tiles: {}", grid.total_tiles());

    if !grid.divides(tileset.width(), tileset.height()) {
        println!(
            "  ! Dimensions are not a multiple of the grid; {}x{} px at the edges are unused",
            tileset.width() - tile_width * grid.cols(),
            tileset.height() - tile_height * grid.rows()
        );
    }

    if tile_width == 0 || tile_height == 0 {
        println!();
        println!("✗ Tileset is too small for the grid");
        return ExitCode::FAILURE;
    }

    println!();
    println!("═════════════");
    println!("✓ All checks passed!");

    ExitCode::SUCCESS
}

// =============================================================================
// Placeholder Command
// =============================================================================

fn run_placeholder(config: PlaceholderConfig) -> ExitCode {
    if let Err(e) = config.validate() {
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE;
    }

    let grid = match config.grid.grid() {
        Ok(grid) => grid,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match write_placeholder(&config.output, &grid, config.tile_size) {
        Ok(image) => {
            println!(
                "Wrote {}x{} placeholder to {}",
                image.width(),
                image.height(),
                config.output.display()
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
