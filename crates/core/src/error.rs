//! Error types for Mojibox
//!
//! Store operations report "not found" through `bool`/`Option` returns and
//! swallow persistence failures at the storage boundary. This type is what
//! travels across those boundaries internally (backends, fetchers, config
//! loading) before being logged or surfaced by a constructor.

use thiserror::Error;

/// All Mojibox errors.
#[derive(Debug, Error)]
pub enum Error {
    /// Entity not found (group, emoji, key)
    #[error("not found: {0}")]
    NotFound(String),

    /// Backend read/write failure
    #[error("storage error: {0}")]
    Storage(String),

    /// JSON or TOML encoding failure
    #[error("serialization error: {0}")]
    Serialization(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Icon or default-payload fetch failure
    #[error("fetch error: {0}")]
    Fetch(String),

    /// Invalid configuration value
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Cross-surface notification failure
    #[error("broadcast error: {0}")]
    Broadcast(String),

    /// Internal error (bug or invariant violation)
    #[error("internal error: {0}")]
    Internal(String),
}

/// Result type for Mojibox operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Check if this is a not-found error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }

    /// Check if this error came from the persistence layer.
    pub fn is_storage(&self) -> bool {
        matches!(self, Error::Storage(_) | Error::Io(_) | Error::Serialization(_))
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Error::Config(e.to_string())
    }
}
