//! Key-value backend abstraction
//!
//! The adapter only ever reads or writes whole values, so a backend is a
//! plain string map. Swapping local storage for a synced one is a matter of
//! handing a different backend to [`StorageAdapter`](crate::StorageAdapter).

use mojibox_core::error::Result;
use std::sync::Arc;

/// A string-keyed, string-valued persistent map.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`; each call is expected to be atomic
/// with respect to the single key it touches. No cross-key atomicity is
/// assumed.
pub trait KeyValueBackend: Send + Sync {
    /// Short name used in log events.
    fn name(&self) -> &'static str;

    /// Read the value stored under `key`.
    ///
    /// Returns `Ok(None)` if the key has never been written.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value stored under `key`.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`. Returns `true` if it existed.
    fn remove(&self, key: &str) -> Result<bool>;
}

impl<B: KeyValueBackend + ?Sized> KeyValueBackend for Arc<B> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<bool> {
        (**self).remove(key)
    }
}
