//! Error types for the tap.

use thiserror::Error;

/// Errors raised while discovering or syncing a base
#[derive(Debug, Error)]
pub enum TapError {
    /// Missing or invalid configuration value
    #[error("Configuration error: {0}")]
    Config(String),

    /// Reading config/catalog files or writing the output stream
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Body or file did not have the expected JSON shape
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Network failure talking to the remote API
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The remote API answered with a non-success status
    #[error("API returned HTTP {status} for {url}")]
    Api { status: u16, url: String },

    /// A schema property carried a type list we don't know how to coerce
    #[error("Unsupported field type: {0:?}")]
    InvalidFieldType(Vec<String>),
}

pub type Result<T> = std::result::Result<T, TapError>;
