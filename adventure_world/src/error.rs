use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum WorldError {
    #[error("Failed to read world file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("World file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, WorldError>;
