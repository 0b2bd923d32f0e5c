//! In-process backend
//!
//! DashMap-backed, so reads never block each other and writes only lock the
//! target shard. The handle is cheaply cloneable: clones share the same map,
//! which is how tests model several extension surfaces sitting on one
//! storage area.

use crate::backend::KeyValueBackend;
use dashmap::DashMap;
use mojibox_core::error::Result;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Shared in-memory key-value map.
///
/// # Example
///
/// ```
/// use mojibox_storage::{KeyValueBackend, MemoryBackend};
///
/// let backend = MemoryBackend::new();
/// let other_surface = backend.clone();
/// backend.set("k", "v").unwrap();
/// assert_eq!(other_surface.get("k").unwrap().as_deref(), Some("v"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    inner: Arc<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    entries: DashMap<String, String>,
    /// Number of successful `set` calls
    writes: AtomicU64,
}

impl MemoryBackend {
    /// Create an empty backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.inner.entries.len()
    }

    /// Check if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.inner.entries.is_empty()
    }

    /// Stored keys, sorted.
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self
            .inner
            .entries
            .iter()
            .map(|entry| entry.key().clone())
            .collect();
        keys.sort();
        keys
    }

    /// Total number of writes since creation.
    pub fn write_count(&self) -> u64 {
        self.inner.writes.load(Ordering::Acquire)
    }
}

impl KeyValueBackend for MemoryBackend {
    fn name(&self) -> &'static str {
        "memory"
    }

    #[inline]
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.inner.entries.get(key).map(|v| v.value().clone()))
    }

    #[inline]
    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.inner
            .entries
            .insert(key.to_string(), value.to_string());
        self.inner.writes.fetch_add(1, Ordering::AcqRel);
        Ok(())
    }

    #[inline]
    fn remove(&self, key: &str) -> Result<bool> {
        Ok(self.inner.entries.remove(key).is_some())
    }
}
