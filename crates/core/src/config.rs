//! Store configuration
//!
//! Every knob has a default matching the extension's behaviour, so an empty
//! TOML document is a valid configuration:
//!
//! ```toml
//! hot_cache_ttl_ms = 60000
//! hot_limit = 50
//! decay_factor = 0.8
//! decay_period_ms = 86400000
//! icon_cache_ttl_ms = 300000
//! payload_key = "emojiExtensionPayload"
//! common_group_key = "emojiGroups-common"
//! ungrouped_key = "ungrouped-emojis"
//! ```

use crate::clock::MILLIS_PER_DAY;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Storage key of the main payload.
pub const DEFAULT_PAYLOAD_KEY: &str = "emojiExtensionPayload";
/// Storage key of the redundant common-group copy.
pub const DEFAULT_COMMON_GROUP_KEY: &str = "emojiGroups-common";
/// Storage key of the redundant ungrouped-list copy.
pub const DEFAULT_UNGROUPED_KEY: &str = "ungrouped-emojis";

/// Tunables for the collection store and its caches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Maximum age of a cached hot-emoji ranking
    pub hot_cache_ttl_ms: u64,
    /// Number of entries kept in the hot ranking
    pub hot_limit: usize,
    /// Multiplier applied to usage counts per elapsed decay period
    pub decay_factor: f64,
    /// Length of one decay period
    pub decay_period_ms: i64,
    /// Maximum age of a cached group icon
    pub icon_cache_ttl_ms: u64,
    /// Key of the main payload
    pub payload_key: String,
    /// Key of the common group copy
    pub common_group_key: String,
    /// Key of the ungrouped list copy
    pub ungrouped_key: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            hot_cache_ttl_ms: 60_000,
            hot_limit: 50,
            decay_factor: 0.8,
            decay_period_ms: MILLIS_PER_DAY,
            icon_cache_ttl_ms: 5 * 60_000,
            payload_key: DEFAULT_PAYLOAD_KEY.to_string(),
            common_group_key: DEFAULT_COMMON_GROUP_KEY.to_string(),
            ungrouped_key: DEFAULT_UNGROUPED_KEY.to_string(),
        }
    }
}

impl StoreConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: StoreConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<()> {
        if !(self.decay_factor > 0.0 && self.decay_factor <= 1.0) {
            return Err(Error::Config(format!(
                "decay_factor must be in (0, 1], got {}",
                self.decay_factor
            )));
        }
        if self.decay_period_ms <= 0 {
            return Err(Error::Config("decay_period_ms must be positive".into()));
        }
        if self.hot_limit == 0 {
            return Err(Error::Config("hot_limit must be at least 1".into()));
        }
        for (name, key) in [
            ("payload_key", &self.payload_key),
            ("common_group_key", &self.common_group_key),
            ("ungrouped_key", &self.ungrouped_key),
        ] {
            if key.is_empty() {
                return Err(Error::Config(format!("{} must not be empty", name)));
            }
        }
        if self.payload_key == self.common_group_key
            || self.payload_key == self.ungrouped_key
            || self.common_group_key == self.ungrouped_key
        {
            return Err(Error::Config("storage keys must be distinct".into()));
        }
        Ok(())
    }

    /// Hot cache TTL as a duration.
    pub fn hot_cache_ttl(&self) -> Duration {
        Duration::from_millis(self.hot_cache_ttl_ms)
    }

    /// Icon cache TTL as a duration.
    pub fn icon_cache_ttl(&self) -> Duration {
        Duration::from_millis(self.icon_cache_ttl_ms)
    }
}
