//! # Mojibox
//!
//! Persistent emoji and sticker collection for browser-extension style
//! hosts.
//!
//! Mojibox keeps user-curated emoji groups, a list of ungrouped emojis and
//! global display settings in a string key-value backend, tracks per-emoji
//! usage with daily decay, and serves a "hot" ranking and group icons from
//! short-lived caches.
//!
//! ## Quick Start
//!
//! ```ignore
//! use mojibox::prelude::*;
//!
//! let mb = Mojibox::open("./emoji-data")?;
//!
//! let mut cats = EmojiGroup::new("cats", "🐱");
//! let purr = Emoji::new("purr", "https://cdn.example/purr.png");
//! let purr_id = purr.uuid.clone();
//! cats.emojis.push(purr);
//! mb.store.add_group(cats);
//!
//! mb.store.record_usage_by_uuid(&purr_id);
//! let hot = mb.store.get_hot_emojis(false);
//! ```
//!
//! ## Components
//!
//! - [`CollectionStore`] - groups, ungrouped list, usage and hot ranking
//! - [`SettingsManager`] - settings and payload persistence
//! - [`IconCache`] - TTL cache of group icons
//! - [`StorageAdapter`] - fail-soft JSON persistence over a backend

#![warn(missing_docs)]

mod database;
mod error;
mod types;

pub mod prelude;

// Re-export main entry points
pub use database::{Mojibox, MojiboxBuilder};
pub use error::{Error, Result};

// Re-export types
pub use types::*;
