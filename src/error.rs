//! Crate-wide error type.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Invalid request: {0}")]
    Validation(String),

    #[error("Unsupported document type: {0}")]
    Unsupported(String),

    #[error("No text detected in document")]
    NoText,
}

pub type Result<T> = std::result::Result<T, Error>;
