//! Error types for map documents and the map store

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid map JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Cell ({q}, {r}, {s}) is not a cube coordinate on a radius {radius} board")]
    InvalidCell { q: i32, r: i32, s: i32, radius: i32 },
}

impl MapError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        MapError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, MapError>;
