//! Error types shared by the device backend, catalog loader, and skill handler.

use thiserror::Error;

/// Failure talking to the playback device or interpreting its replies.
#[derive(Debug, Error)]
pub enum DeviceError {
    #[error("device request failed ({command}): {message}")]
    Transport { command: String, message: String },
    #[error("device returned HTTP {status} ({command})")]
    Status { command: String, status: u16 },
    #[error("device response malformed ({command}): {message}")]
    MalformedResponse { command: String, message: String },
    #[error("catalog exceeded {max_pages} pages of {page_size} records")]
    CatalogTooLarge { max_pages: usize, page_size: usize },
}

/// Failure handling a skill event.
#[derive(Debug, Error)]
pub enum SkillError {
    #[error("invalid application id: {0}")]
    InvalidApplicationId(String),
    #[error("invalid intent: {0}")]
    InvalidIntent(String),
    #[error("unsupported request type")]
    UnsupportedRequest,
    #[error(transparent)]
    Device(#[from] DeviceError),
}

/// Failure reading or writing the config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to access config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}
