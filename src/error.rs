//! Unified error types for Mojibox.
//!
//! This module provides a clean error type that wraps internal errors
//! and presents a consistent interface to users.

use thiserror::Error;

/// All Mojibox errors.
///
/// Only opening a store and loading configuration can fail; everyday
/// collection operations report "not found" through their return value.
#[derive(Debug, Error)]
pub enum Error {
    /// Entity not found (group, emoji, key)
    #[error("not found: {0}")]
    NotFound(String),

    /// Invalid configuration
    #[error("invalid configuration: {0}")]
    Config(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Storage error
    #[error("storage error: {0}")]
    Storage(String),

    /// Icon or default payload could not be fetched
    #[error("fetch error: {0}")]
    Fetch(String),

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

    /// Check if the failure came from the storage backend.
    pub fn is_storage(&self) -> bool {
        matches!(self, Error::Storage(_) | Error::Io(_))
    }

    /// Check if this is a configuration error.
    pub fn is_config(&self) -> bool {
        matches!(self, Error::Config(_))
    }
}

// Convert from internal core errors
impl From<mojibox_core::Error> for Error {
    fn from(e: mojibox_core::Error) -> Self {
        use mojibox_core::Error as CoreError;
        match e {
            CoreError::NotFound(what) => Error::NotFound(what),
            CoreError::Storage(msg) => Error::Storage(msg),
            CoreError::Serialization(msg) => Error::Serialization(msg),
            CoreError::Io(io_err) => Error::Io(io_err),
            CoreError::Fetch(msg) => Error::Fetch(msg),
            CoreError::Config(msg) => Error::Config(msg),
            CoreError::Broadcast(msg) => Error::Internal(format!("broadcast: {}", msg)),
            CoreError::Internal(msg) => Error::Internal(msg),
        }
    }
}

// Convert from serde_json errors
impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}
