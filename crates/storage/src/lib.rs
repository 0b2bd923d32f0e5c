//! Storage layer for Mojibox
//!
//! This crate implements persistence for the collection store:
//! - [`KeyValueBackend`]: the swappable string key-value backend
//! - [`MemoryBackend`]: shared in-process map (DashMap)
//! - [`FileBackend`]: one file per key, atomic replace on write
//! - [`StorageAdapter`]: fail-soft load/save of the payload and its sub-keys

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapter;
pub mod backend;
pub mod file;
pub mod memory;

pub use adapter::{StorageAdapter, StorageKeys};
pub use backend::KeyValueBackend;
pub use file::FileBackend;
pub use memory::MemoryBackend;
