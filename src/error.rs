use thiserror::Error;

/// Errors that can occur while loading, slicing or encoding tiles.
#[derive(Debug, Clone, Error)]
pub enum TilesetError {
    /// Backing image is missing or unreadable
    #[error("Tileset not found at {path}: {message}")]
    SourceNotFound { path: String, message: String },

    /// Bytes could not be decoded as an image
    #[error("Failed to decode tileset: {message}")]
    DecodeFailure { message: String },

    /// Tileset dimensions are not a multiple of the grid (strict grid mode only)
    #[error(
        "Tileset of {width}x{height} pixels cannot be split evenly into {rows} rows and {cols} columns"
    )]
    UnevenGrid {
        width: u32,
        height: u32,
        rows: u32,
        cols: u32,
    },

    /// Row or column outside the declared grid (should map to HTTP 400)
    #[error("Invalid tile coordinate ({row}, {col}): row must be 1-{rows}, col must be 1-{cols}")]
    InvalidCoordinate {
        row: i64,
        col: i64,
        rows: u32,
        cols: u32,
    },

    /// Path segment is not an integer (should map to HTTP 400)
    #[error("Malformed tile coordinate: {value:?} is not an integer")]
    MalformedCoordinate { value: String },

    /// Crop rectangle could not be extracted from the tileset
    #[error("Failed to extract tile: {message}")]
    ExtractionFailure { message: String },

    /// PNG encoding of a tile or tileset failed
    #[error("Failed to encode image: {message}")]
    EncodeFailure { message: String },
}

impl TilesetError {
    /// Whether the error was caused by the caller's input rather than the server.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            TilesetError::InvalidCoordinate { .. } | TilesetError::MalformedCoordinate { .. }
        )
    }
}

/// Errors raised while validating configuration values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Grid must have at least one row and one column
    #[error("Grid must have at least one row and one column, got {rows}x{cols}")]
    EmptyGrid { rows: u32, cols: u32 },

    /// Any other invalid value
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Errors raised while generating or writing a placeholder tileset.
#[derive(Debug, Error)]
pub enum PlaceholderError {
    #[error("Invalid placeholder configuration: {0}")]
    Config(#[from] ConfigError),

    /// Directory creation or file write failed
    #[error("Cannot write placeholder to {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to encode placeholder: {message}")]
    Encode { message: String },
}
