//! Configuration management for the tileset streamer.
//!
//! This module provides a configuration system that supports:
//! - Command-line arguments via clap
//! - Environment variables with `TILESET_` prefix
//! - Sensible defaults for all optional settings
//!
//! # Example
//!
//! ```ignore
//! use clap::Parser;
//! use tileset_streamer::config::{Cli, Command};
//!
//! match Cli::parse().into_command() {
//!     Command::Serve(config) => println!("Listening on {}", config.bind_address()),
//!     Command::Check(config) => println!("Checking {}", config.tileset.display()),
//!     Command::Placeholder(config) => println!("Writing {}", config.output.display()),
//! }
//! ```
//!
//! # Environment Variables
//!
//! - `TILESET_HOST` - Server bind address (default: 0.0.0.0)
//! - `TILESET_PORT` - Server port (default: 5000)
//! - `TILESET_PATH` - Tileset image path (default: data/TileSets/tileset.png)
//! - `TILESET_STATIC_DIR` - Directory served under /tilesets (default: data/TileSets)
//! - `TILESET_ROWS` / `TILESET_COLS` - Grid dimensions (default: 4x4)
//! - `TILESET_MAX_TEXTURE_SIZE` - Longest side of encoded images (default: 512)
//! - `TILESET_STRICT_GRID` - Reject tilesets not divisible by the grid
//! - `TILESET_CREATE_PLACEHOLDER` - Write a placeholder if the tileset is missing
//! - `TILESET_CACHE_MAX_AGE` - HTTP cache max-age seconds (default: 3600)
//! - `TILESET_CORS_ORIGINS` - Allowed CORS origins, comma-separated

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::error::ConfigError;
use crate::placeholder::{placeholder_dimensions, DEFAULT_PLACEHOLDER_TILE_SIZE};
use crate::server::{DEFAULT_CACHE_MAX_AGE, DEFAULT_STATIC_DIR};
use crate::tile::DEFAULT_MAX_TEXTURE_SIZE;
use crate::tileset::{TileGrid, DEFAULT_GRID_COLS, DEFAULT_GRID_ROWS};

// =============================================================================
// Default Values
// =============================================================================

/// Default server host.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default server port.
pub const DEFAULT_PORT: u16 = 5000;

/// Default tileset image path.
pub const DEFAULT_TILESET_PATH: &str = "data/TileSets/tileset.png";

// =============================================================================
// CLI Arguments
// =============================================================================

/// Tileset Streamer - serves tiles of a tileset image to WebGL clients.
#[derive(Parser, Debug, Clone)]
#[command(name = "tileset-streamer")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Serve options used when no subcommand is given.
    #[command(flatten)]
    pub serve: ServeConfig,
}

impl Cli {
    /// Resolve the command to run, defaulting to `serve`.
    pub fn into_command(self) -> Command {
        self.command.unwrap_or(Command::Serve(self.serve))
    }
}

/// Subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Run the HTTP server
    Serve(ServeConfig),

    /// Load the tileset and report its geometry
    Check(CheckConfig),

    /// Write a placeholder tileset image
    Placeholder(PlaceholderConfig),
}

// =============================================================================
// Grid Arguments
// =============================================================================

/// Grid dimensions shared by all subcommands.
#[derive(Args, Debug, Clone)]
pub struct GridArgs {
    /// Number of tile rows in the tileset.
    #[arg(long, default_value_t = DEFAULT_GRID_ROWS, env = "TILESET_ROWS")]
    pub rows: u32,

    /// Number of tile columns in the tileset.
    #[arg(long, default_value_t = DEFAULT_GRID_COLS, env = "TILESET_COLS")]
    pub cols: u32,
}

impl GridArgs {
    pub fn grid(&self) -> Result<TileGrid, ConfigError> {
        TileGrid::new(self.rows, self.cols)
    }
}

// =============================================================================
// Serve Configuration
// =============================================================================

/// Options for the `serve` command.
#[derive(Args, Debug, Clone)]
pub struct ServeConfig {
    // =========================================================================
    // Server Configuration
    // =========================================================================
    /// Host address to bind the server to.
    #[arg(long, default_value = DEFAULT_HOST, env = "TILESET_HOST")]
    pub host: String,

    /// Port to listen on.
    #[arg(short, long, default_value_t = DEFAULT_PORT, env = "TILESET_PORT")]
    pub port: u16,

    // =========================================================================
    // Tileset Configuration
    // =========================================================================
    /// Path of the tileset image.
    #[arg(long, default_value = DEFAULT_TILESET_PATH, env = "TILESET_PATH")]
    pub tileset: PathBuf,

    /// Directory served as-is under /tilesets.
    #[arg(long, default_value = DEFAULT_STATIC_DIR, env = "TILESET_STATIC_DIR")]
    pub static_dir: PathBuf,

    #[command(flatten)]
    pub grid: GridArgs,

    /// Reject tilesets whose size is not a multiple of the grid.
    ///
    /// When disabled, trailing edge pixels are silently left out of every tile.
    #[arg(long, default_value_t = false, env = "TILESET_STRICT_GRID")]
    pub strict_grid: bool,

    /// Write a placeholder tileset at startup if the tileset file is missing.
    #[arg(long, default_value_t = false, env = "TILESET_CREATE_PLACEHOLDER")]
    pub create_placeholder: bool,

    // =========================================================================
    // Encoding Configuration
    // =========================================================================
    /// Maximum width or height of encoded images, in pixels.
    #[arg(long, default_value_t = DEFAULT_MAX_TEXTURE_SIZE, env = "TILESET_MAX_TEXTURE_SIZE")]
    pub max_texture_size: u32,

    /// HTTP Cache-Control max-age in seconds.
    #[arg(long, default_value_t = DEFAULT_CACHE_MAX_AGE, env = "TILESET_CACHE_MAX_AGE")]
    pub cache_max_age: u32,

    // =========================================================================
    // CORS Configuration
    // =========================================================================
    /// Allowed CORS origins (comma-separated).
    ///
    /// If not specified, allows any origin.
    #[arg(long, env = "TILESET_CORS_ORIGINS", value_delimiter = ',')]
    pub cors_origins: Option<Vec<String>>,

    // =========================================================================
    // Logging Configuration
    // =========================================================================
    /// Enable verbose logging (debug level).
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,

    /// Disable request tracing.
    #[arg(long, default_value_t = false)]
    pub no_tracing: bool,
}

impl ServeConfig {
    /// Validate the configuration and return an error message if invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.tileset.as_os_str().is_empty() {
            return Err("Tileset path is required. Set --tileset or TILESET_PATH".to_string());
        }

        self.grid.grid().map_err(|e| e.to_string())?;

        if self.max_texture_size == 0 {
            return Err("max_texture_size must be greater than 0".to_string());
        }

        Ok(())
    }

    /// Get the server bind address as "host:port".
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the tile grid (call validate() first).
    pub fn grid(&self) -> Result<TileGrid, ConfigError> {
        self.grid.grid()
    }
}

// =============================================================================
// Check Configuration
// =============================================================================

/// Options for the `check` command.
#[derive(Args, Debug, Clone)]
pub struct CheckConfig {
    /// Path of the tileset image.
    #[arg(long, default_value = DEFAULT_TILESET_PATH, env = "TILESET_PATH")]
    pub tileset: PathBuf,

    #[command(flatten)]
    pub grid: GridArgs,

    /// Fail if the tileset size is not a multiple of the grid.
    #[arg(long, default_value_t = false, env = "TILESET_STRICT_GRID")]
    pub strict_grid: bool,

    /// Enable verbose logging.
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

// =============================================================================
// Placeholder Configuration
// =============================================================================

/// Options for the `placeholder` command.
#[derive(Args, Debug, Clone)]
pub struct PlaceholderConfig {
    /// Where to write the PNG.
    #[arg(short, long, default_value = DEFAULT_TILESET_PATH)]
    pub output: PathBuf,

    #[command(flatten)]
    pub grid: GridArgs,

    /// Edge length of each cell in pixels.
    #[arg(long, default_value_t = DEFAULT_PLACEHOLDER_TILE_SIZE)]
    pub tile_size: u32,

    /// Overwrite an existing file.
    #[arg(long, default_value_t = false)]
    pub force: bool,
}

impl PlaceholderConfig {
    pub fn validate(&self) -> Result<(), String> {
        let grid = self.grid.grid().map_err(|e| e.to_string())?;

        if self.tile_size == 0 {
            return Err("tile_size must be greater than 0".to_string());
        }

        placeholder_dimensions(&grid, self.tile_size).map_err(|e| e.to_string())?;

        if self.output.exists() && !self.force {
            return Err(format!(
                "{} already exists (use --force to overwrite)",
                self.output.display()
            ));
        }

        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================
