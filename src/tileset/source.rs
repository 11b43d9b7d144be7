//! Storage backends for tileset images.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::TilesetError;

// =============================================================================
// TilesetSource Trait
// =============================================================================

/// Trait for fetching the raw bytes of a tileset image.
///
/// This abstraction lets the cache work against the local filesystem in
/// production and against in-memory sources in tests.
#[async_trait]
pub trait TilesetSource: Send + Sync {
    /// Read the complete encoded image.
    ///
    /// Missing or unreadable data must be reported as
    /// [`TilesetError::SourceNotFound`].
    async fn read(&self) -> Result<Bytes, TilesetError>;

    /// Human-readable location of the tileset, used in logs and errors.
    fn location(&self) -> String;
}

// =============================================================================
// Filesystem Source
// =============================================================================

/// Tileset source backed by a single file on local disk.
#[derive(Debug, Clone)]
pub struct FsTilesetSource {
    path: PathBuf,
}

impl FsTilesetSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl TilesetSource for FsTilesetSource {
    async fn read(&self) -> Result<Bytes, TilesetError> {
        match tokio::fs::read(&self.path).await {
            Ok(data) => Ok(Bytes::from(data)),
            Err(e) => {
                let message = if e.kind() == ErrorKind::NotFound {
                    "file does not exist".to_string()
                } else {
                    e.to_string()
                };
                Err(TilesetError::SourceNotFound {
                    path: self.location(),
                    message,
                })
            }
        }
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}
