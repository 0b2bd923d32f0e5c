//! Engine layer for Mojibox
//!
//! This crate coordinates the in-memory collection and its persistence:
//! - [`SettingsManager`]: global settings and payload saves
//! - [`CollectionStore`]: groups, ungrouped list, usage and hot ranking
//! - [`IconCache`]: TTL cache of resolved group icons
//! - collaborator traits: [`CommunicationService`], [`DefaultPayloadSource`],
//!   [`IconFetcher`]

#![warn(clippy::all)]

pub mod comms;
pub mod defaults;
pub mod fetch;
pub mod icons;
pub mod settings;
pub mod store;

pub use comms::{ChannelCommunication, CommunicationService, NoopCommunication, StoreMessage};
pub use defaults::{DefaultPayloadSource, JsonFileDefaults, NoDefaults, StaticDefaults};
#[cfg(feature = "http")]
pub use fetch::HttpIconFetcher;
pub use fetch::{decode_data_uri, is_remote_icon, IconFetcher, OfflineFetcher};
pub use icons::{CachedIcon, IconCache, PreloadReport};
pub use settings::{Listener, SettingsManager, Subscription};
pub use store::{CollectionStore, Decay, FoundEmoji, IconUpdate, InitSource, FAVOURITES_MARKERS};
