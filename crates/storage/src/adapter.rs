//! Payload storage adapter
//!
//! Serializes the [`PersistPayload`] and its two redundant sub-keys to a
//! [`KeyValueBackend`]. Everything here fails soft: reads turn any backend or
//! JSON error into `None`, writes log and swallow errors. The `try_*`
//! variants expose the underlying error for callers that want it.
//!
//! No shape validation happens at this layer beyond what deserialization
//! requires.

use crate::backend::KeyValueBackend;
use mojibox_core::config::StoreConfig;
use mojibox_core::error::Result;
use mojibox_core::types::{EmojiGroup, PersistPayload, UngroupedEmoji};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

/// Storage keys used by the adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageKeys {
    /// Main payload
    pub payload: String,
    /// Redundant copy of the common group
    pub common_group: String,
    /// Redundant copy of the ungrouped list
    pub ungrouped: String,
}

impl StorageKeys {
    /// Keys configured in `config`.
    pub fn from_config(config: &StoreConfig) -> Self {
        Self {
            payload: config.payload_key.clone(),
            common_group: config.common_group_key.clone(),
            ungrouped: config.ungrouped_key.clone(),
        }
    }
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self::from_config(&StoreConfig::default())
    }
}

/// Whole-value reads and writes of the persisted state.
#[derive(Clone)]
pub struct StorageAdapter {
    backend: Arc<dyn KeyValueBackend>,
    keys: StorageKeys,
}

impl std::fmt::Debug for StorageAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorageAdapter")
            .field("backend", &self.backend.name())
            .field("keys", &self.keys)
            .finish()
    }
}

impl StorageAdapter {
    /// Adapter with the default key names.
    pub fn new(backend: Arc<dyn KeyValueBackend>) -> Self {
        Self::with_keys(backend, StorageKeys::default())
    }

    /// Adapter with explicit key names.
    pub fn with_keys(backend: Arc<dyn KeyValueBackend>, keys: StorageKeys) -> Self {
        Self { backend, keys }
    }

    /// Key names in use.
    pub fn keys(&self) -> &StorageKeys {
        &self.keys
    }

    /// Underlying backend.
    pub fn backend(&self) -> &Arc<dyn KeyValueBackend> {
        &self.backend
    }

    // =========================================================================
    // Main payload
    // =========================================================================

    /// Load the payload, or `None` if absent or unreadable.
    pub fn load_payload(&self) -> Option<PersistPayload> {
        self.soft_read(&self.keys.payload, self.try_load_payload())
    }

    /// Save the payload, logging and swallowing any failure.
    pub fn save_payload(&self, payload: &PersistPayload) {
        if let Err(e) = self.try_save_payload(payload) {
            tracing::warn!(
                backend = self.backend.name(),
                key = %self.keys.payload,
                error = %e,
                "payload write failed"
            );
        }
    }

    /// Load the payload, surfacing errors.
    pub fn try_load_payload(&self) -> Result<Option<PersistPayload>> {
        self.read_json(&self.keys.payload)
    }

    /// Save the payload, surfacing errors.
    pub fn try_save_payload(&self, payload: &PersistPayload) -> Result<()> {
        self.write_json(&self.keys.payload, payload)
    }

    // =========================================================================
    // Sub-keys
    // =========================================================================

    /// Read the redundant common-group copy.
    pub fn load_common_group(&self) -> Option<EmojiGroup> {
        let key = &self.keys.common_group;
        self.soft_read(key, self.read_json(key))
    }

    /// Write the redundant common-group copy. Returns `true` on success.
    pub fn save_common_group(&self, group: &EmojiGroup) -> bool {
        self.soft_write(&self.keys.common_group, group)
    }

    /// Read the redundant ungrouped-list copy.
    pub fn load_ungrouped(&self) -> Option<Vec<UngroupedEmoji>> {
        let key = &self.keys.ungrouped;
        self.soft_read(key, self.read_json(key))
    }

    /// Write the redundant ungrouped-list copy. Returns `true` on success.
    pub fn save_ungrouped(&self, list: &[UngroupedEmoji]) -> bool {
        self.soft_write(&self.keys.ungrouped, list)
    }

    /// Remove the payload and both sub-keys.
    ///
    /// Returns the number of keys that existed.
    pub fn clear(&self) -> usize {
        [&self.keys.payload, &self.keys.common_group, &self.keys.ungrouped]
            .into_iter()
            .filter(|key| match self.backend.remove(key) {
                Ok(existed) => existed,
                Err(e) => {
                    tracing::warn!(key = %key, error = %e, "remove failed");
                    false
                }
            })
            .count()
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    fn read_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.backend.get(key)? {
            Some(text) => Ok(Some(serde_json::from_str(&text)?)),
            None => Ok(None),
        }
    }

    fn write_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let text = serde_json::to_string(value)?;
        self.backend.set(key, &text)
    }

    fn soft_read<T>(&self, key: &str, result: Result<Option<T>>) -> Option<T> {
        match result {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(
                    backend = self.backend.name(),
                    key = %key,
                    error = %e,
                    "read failed, treating as empty"
                );
                None
            }
        }
    }

    fn soft_write<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> bool {
        match self.write_json(key, value) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(
                    backend = self.backend.name(),
                    key = %key,
                    error = %e,
                    "write failed"
                );
                false
            }
        }
    }
}
