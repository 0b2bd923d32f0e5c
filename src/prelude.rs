//! Convenient imports for Mojibox.
//!
//! This module re-exports the most commonly used types so you can get started
//! with a single import:
//!
//! ```ignore
//! use mojibox::prelude::*;
//!
//! let mb = Mojibox::in_memory()?;
//! mb.store.add_group(EmojiGroup::new("faces", "😀"));
//! ```

// Main entry point
pub use crate::database::{Mojibox, MojiboxBuilder};

// Error handling
pub use crate::error::{Error, Result};

// Data model
pub use crate::types::{Emoji, EmojiGroup, HotEmoji, OutputFormat, Settings, SettingsPatch, UngroupedEmoji};

// Collaborators
pub use crate::types::{
    ChannelCommunication, CommunicationService, DefaultPayloadSource, IconFetcher, IconUpdate,
    InitSource, JsonFileDefaults, MemoryBackend, StaticDefaults, StoreConfig,
};

// Time
pub use crate::types::{Clock, ManualClock};

// Reserved group UUIDs
pub use crate::types::{COMMON_GROUP_UUID, UNGROUPED_GROUP_UUID};
