use serde_json::Error as SerdeJsonError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("JSON error: {0}")]
    Json(#[from] SerdeJsonError),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("error getting info for '{}': {source}", path.display())]
    Stat { path: PathBuf, source: io::Error },

    #[error("error opening '{}': {source}", path.display())]
    Open { path: PathBuf, source: io::Error },

    #[error("critical error rewinding '{}' for hash: {source}", path.display())]
    Rewind { path: PathBuf, source: io::Error },

    #[error("error calculating hashes for '{}': {source}", path.display())]
    Hash { path: PathBuf, source: io::Error },

    #[error("Invalid scan directory '{}': {reason}", path.display())]
    InvalidScanDirectory { path: PathBuf, reason: String },
}
