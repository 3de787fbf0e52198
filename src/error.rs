use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PresetError {
    #[error("at least one duration preset is required")]
    Empty,
    #[error("preset {0:?} has a zero length")]
    ZeroLength(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to write config to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] serde_json::Error),
}
