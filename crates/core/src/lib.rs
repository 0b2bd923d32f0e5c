//! Core types for Mojibox
//!
//! This crate defines what every other layer shares:
//! - [`types`]: emojis, groups, settings and the persisted payload
//! - [`error`]: the error type and `Result` alias
//! - [`clock`]: the time source used for decay and cache expiry
//! - [`config`]: store tunables loadable from TOML

#![warn(clippy::all)]

pub mod clock;
pub mod config;
pub mod error;
pub mod types;

pub use clock::{Clock, ManualClock, SystemClock, MILLIS_PER_DAY};
pub use config::StoreConfig;
pub use error::{Error, Result};
pub use types::{
    new_uuid, Emoji, EmojiGroup, HotEmoji, OutputFormat, PersistPayload, Settings, SettingsPatch,
    UngroupedEmoji, COMMON_GROUP_UUID, GRID_COLUMNS_RANGE, IMAGE_SCALE_RANGE, NIL_GROUP_UUID,
    UNGROUPED_GROUP_UUID,
};
