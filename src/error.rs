use std::path::PathBuf;

use thiserror::Error;

/// Errors raised at the crate's edges (files, JSON, TOML)
///
/// The rendering and gesture core never fails; only loading and writing do.
#[derive(Debug, Error)]
pub enum MapError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid config file: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid GeoJSON: {0}")]
    InvalidGeoJson(String),
}

impl MapError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        MapError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, MapError>;
