//! Public types for the Mojibox API.
//!
//! This module re-exports types from internal crates with a clean public interface.

// Data model
pub use mojibox_core::types::{
    new_uuid, Emoji, EmojiGroup, HotEmoji, OutputFormat, PersistPayload, Settings, SettingsPatch,
    UngroupedEmoji, COMMON_GROUP_UUID, GRID_COLUMNS_RANGE, IMAGE_SCALE_RANGE, NIL_GROUP_UUID,
    UNGROUPED_GROUP_UUID,
};

// Time and configuration
pub use mojibox_core::clock::{Clock, ManualClock, SystemClock, MILLIS_PER_DAY};
pub use mojibox_core::config::StoreConfig;

// Storage
pub use mojibox_storage::{FileBackend, KeyValueBackend, MemoryBackend, StorageAdapter, StorageKeys};

// Engine
pub use mojibox_engine::{
    decode_data_uri, is_remote_icon, CachedIcon, ChannelCommunication, CollectionStore,
    CommunicationService, DefaultPayloadSource, FoundEmoji, IconCache, IconFetcher, IconUpdate,
    InitSource, JsonFileDefaults, NoDefaults, NoopCommunication, OfflineFetcher, PreloadReport,
    SettingsManager, StaticDefaults, StoreMessage, Subscription,
};

#[cfg(feature = "http")]
pub use mojibox_engine::HttpIconFetcher;
