//! Error taxonomy
//!
//! Only startup and persistence can fail; per-frame simulation is total.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ArcadeError {
    #[error("failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid JSON in {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid settings: {0}")]
    InvalidSettings(String),
    #[error("surface failed: {0}")]
    Surface(String),
}

impl ArcadeError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        ArcadeError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        ArcadeError::Json {
            path: path.into(),
            source,
        }
    }
}
