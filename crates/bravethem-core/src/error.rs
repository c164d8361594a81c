//! Core error types for bravethem-core.
//!
//! Storage failures never reach the UI: repositories recover from a
//! [`StoreError`] by falling back to a default value. The other variants
//! surface through the CLI and the offline shell.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for bravethem-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Storage-related errors
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Offline shell errors
    #[error("Offline shell error: {0}")]
    Shell(#[from] ShellError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
}

/// Key/value store errors.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Failed to open the backing database
    #[error("Failed to open store at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Read or write against the backing storage failed
    #[error("Storage access failed: {0}")]
    Access(String),

    /// Storage refused the write (quota exceeded, storage disabled)
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    /// Stored payload could not be decoded
    #[error("Corrupt payload under '{key}': {message}")]
    Corrupt { key: String, message: String },

    /// Value could not be encoded
    #[error("Failed to encode value for '{key}': {message}")]
    Encode { key: String, message: String },
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Unknown dot-path key
    #[error("unknown config key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Data directory could not be resolved or created
    #[error("Data directory unavailable: {0}")]
    DataDir(String),
}

/// Offline shell errors.
#[derive(Error, Debug)]
pub enum ShellError {
    /// Network failed and nothing was cached for the request
    #[error("offline and no cached response for {0}")]
    Offline(String),

    /// Request URL could not be parsed
    #[error("Invalid request URL '{url}': {message}")]
    InvalidUrl { url: String, message: String },

    /// Network fetch failed
    #[error("Fetch failed for {url}: {message}")]
    Fetch { url: String, message: String },
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(e, _msg)
                if e.code == rusqlite::ErrorCode::DiskFull
                    || e.code == rusqlite::ErrorCode::ReadOnly =>
            {
                StoreError::Unavailable(err.to_string())
            }
            _ => StoreError::Access(err.to_string()),
        }
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
