//! Bundled default payload
//!
//! Used exactly once per storage area: when a store initializes and nothing
//! has been persisted yet.

use mojibox_core::error::{Error, Result};
use mojibox_core::types::PersistPayload;
use std::io::ErrorKind;
use std::path::PathBuf;

/// Source of the payload installed into an empty storage area.
pub trait DefaultPayloadSource: Send + Sync {
    /// Fetch the default payload. `Ok(None)` means there is none.
    fn fetch_default(&self) -> Result<Option<PersistPayload>>;
}

/// No bundled defaults; an empty store stays empty.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDefaults;

impl DefaultPayloadSource for NoDefaults {
    fn fetch_default(&self) -> Result<Option<PersistPayload>> {
        Ok(None)
    }
}

/// A payload held in memory.
#[derive(Debug, Clone)]
pub struct StaticDefaults(pub PersistPayload);

impl DefaultPayloadSource for StaticDefaults {
    fn fetch_default(&self) -> Result<Option<PersistPayload>> {
        Ok(Some(self.0.clone()))
    }
}

/// A JSON document on disk, shaped like the persisted payload.
///
/// A missing file means "no defaults"; an unreadable or malformed one is an
/// error.
#[derive(Debug, Clone)]
pub struct JsonFileDefaults {
    path: PathBuf,
}

impl JsonFileDefaults {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DefaultPayloadSource for JsonFileDefaults {
    fn fetch_default(&self) -> Result<Option<PersistPayload>> {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(Error::Fetch(format!(
                    "reading {} failed: {}",
                    self.path.display(),
                    e
                )))
            }
        };
        Ok(Some(serde_json::from_str(&text)?))
    }
}
