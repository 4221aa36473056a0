//! Error types for the evaluation harness

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum EvalError {
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

impl EvalError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        EvalError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Why a single match log could not be used
#[derive(Debug, thiserror::Error)]
pub enum LogError {
    #[error("cannot read log: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed log: {0}")]
    Json(#[from] serde_json::Error),

    #[error("log has no turns")]
    Empty,
}
