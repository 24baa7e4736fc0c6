//! Error types for platform-facing operations

use thiserror::Error;

/// Failures reading or writing the key-value preference store
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("local storage is not available")]
    Unavailable,
    #[error("failed to read key '{key}'")]
    Read { key: String },
    #[error("failed to write key '{key}'")]
    Write { key: String },
    #[error("failed to encode value for '{key}': {reason}")]
    Encode { key: String, reason: String },
}

/// Failures during browser startup
#[derive(Debug, Error)]
pub enum BootError {
    #[error("browser window is not available")]
    NoWindow,
    #[error("document is not available")]
    NoDocument,
    #[error("missing element '#{0}'")]
    MissingElement(&'static str),
    #[error("element '#{0}' has the wrong type")]
    WrongElementType(&'static str),
    #[error("failed to create rendering surface: {0}")]
    Surface(String),
    #[error("no compatible graphics adapter: {0}")]
    Adapter(String),
    #[error("failed to create graphics device: {0}")]
    Device(String),
}
