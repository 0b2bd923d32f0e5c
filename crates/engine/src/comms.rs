//! Cross-surface notifications
//!
//! Every hosting surface (popup, options page, content script) runs its own
//! store instance. The store tells the others about ungrouped-list and icon
//! changes through an injected [`CommunicationService`]; it never depends on
//! the transport. Notifications are fire-and-forget: the store logs a failed
//! send and carries on.

use mojibox_core::clock::Clock;
use mojibox_core::error::Result;
use mojibox_core::types::UngroupedEmoji;
use parking_lot::Mutex;
use serde::Serialize;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;

/// Broadcast capability consumed by the collection store.
pub trait CommunicationService: Send + Sync {
    /// The ungrouped list changed; `emojis` is the full new list.
    fn send_ungrouped_emojis_changed_sync(&self, emojis: &[UngroupedEmoji]) -> Result<()>;

    /// A group's icon changed.
    fn send_group_icon_updated(&self, group_uuid: &str, icon: &str) -> Result<()>;
}

/// Drops every notification. Used when a store runs alone.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopCommunication;

impl CommunicationService for NoopCommunication {
    fn send_ungrouped_emojis_changed_sync(&self, _emojis: &[UngroupedEmoji]) -> Result<()> {
        Ok(())
    }

    fn send_group_icon_updated(&self, _group_uuid: &str, _icon: &str) -> Result<()> {
        Ok(())
    }
}

/// Message delivered to subscribers of a [`ChannelCommunication`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StoreMessage {
    /// Full snapshot of the ungrouped list
    UngroupedEmojisChanged {
        emojis: Vec<UngroupedEmoji>,
        timestamp: i64,
    },
    /// One group's icon changed
    GroupIconUpdated {
        #[serde(rename = "groupUUID")]
        group_uuid: String,
        #[serde(rename = "iconUrl")]
        icon_url: String,
        timestamp: i64,
    },
}

/// In-process broadcast over `std::sync::mpsc` channels.
///
/// Each [`subscribe`](ChannelCommunication::subscribe) call gets its own
/// receiver; subscribers whose receiver was dropped are pruned on the next
/// send.
pub struct ChannelCommunication {
    subscribers: Mutex<Vec<Sender<StoreMessage>>>,
    clock: Arc<dyn Clock>,
}

impl ChannelCommunication {
    /// Create a broadcaster stamping messages with `clock`.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            subscribers: Mutex::new(Vec::new()),
            clock,
        }
    }

    /// Register a new subscriber.
    pub fn subscribe(&self) -> Receiver<StoreMessage> {
        let (tx, rx) = channel();
        self.subscribers.lock().push(tx);
        rx
    }

    /// Number of live subscribers as of the last send.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.lock().len()
    }

    fn broadcast(&self, message: StoreMessage) {
        let mut subscribers = self.subscribers.lock();
        subscribers.retain(|tx| tx.send(message.clone()).is_ok());
    }
}

impl CommunicationService for ChannelCommunication {
    fn send_ungrouped_emojis_changed_sync(&self, emojis: &[UngroupedEmoji]) -> Result<()> {
        self.broadcast(StoreMessage::UngroupedEmojisChanged {
            emojis: emojis.to_vec(),
            timestamp: self.clock.now_millis(),
        });
        Ok(())
    }

    fn send_group_icon_updated(&self, group_uuid: &str, icon: &str) -> Result<()> {
        self.broadcast(StoreMessage::GroupIconUpdated {
            group_uuid: group_uuid.to_string(),
            icon_url: icon.to_string(),
            timestamp: self.clock.now_millis(),
        });
        Ok(())
    }
}
