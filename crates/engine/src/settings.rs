//! Settings manager
//!
//! Holds the in-memory [`Settings`] and is the single writer of the
//! persisted payload: the collection store persists groups and the
//! ungrouped list by calling [`SettingsManager::save`].
//!
//! ## Listeners
//!
//! Listeners registered with [`SettingsManager::on_change`] run
//! synchronously after every save, on the saving thread. Callers holding
//! their own locks split the save into [`SettingsManager::persist`] and
//! [`SettingsManager::notify`], notifying only once those locks are
//! released, so a listener may read the collection store.

use mojibox_core::clock::Clock;
use mojibox_core::types::{
    EmojiGroup, PersistPayload, Settings, SettingsPatch, UngroupedEmoji, GRID_COLUMNS_RANGE,
    IMAGE_SCALE_RANGE,
};
use mojibox_storage::StorageAdapter;
use parking_lot::{Mutex, RwLock};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

/// Callback invoked with the settings that were just saved.
pub type Listener = Arc<dyn Fn(&Settings) + Send + Sync>;

type ListenerList = Mutex<Vec<(u64, Listener)>>;

/// Handle returned by [`SettingsManager::on_change`].
///
/// Dropping the handle keeps the listener registered; call
/// [`unsubscribe`](Subscription::unsubscribe) to remove it.
#[derive(Debug)]
pub struct Subscription {
    id: u64,
    listeners: Weak<ListenerList>,
}

impl Subscription {
    /// Remove the listener. Returns `false` if it was already gone.
    pub fn unsubscribe(self) -> bool {
        let Some(listeners) = self.listeners.upgrade() else {
            return false;
        };
        let mut listeners = listeners.lock();
        let before = listeners.len();
        listeners.retain(|(id, _)| *id != self.id);
        listeners.len() != before
    }
}

/// Owner of the global settings and of payload persistence.
pub struct SettingsManager {
    storage: StorageAdapter,
    clock: Arc<dyn Clock>,
    settings: RwLock<Settings>,
    listeners: Arc<ListenerList>,
    next_listener_id: AtomicU64,
}

impl std::fmt::Debug for SettingsManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SettingsManager")
            .field("storage", &self.storage)
            .field("settings", &*self.settings.read())
            .field("listeners", &self.listeners.lock().len())
            .finish()
    }
}

impl SettingsManager {
    /// Create a manager, seeding it from the persisted settings if any.
    pub fn new(storage: StorageAdapter, clock: Arc<dyn Clock>) -> Self {
        let mut settings = storage
            .load_payload()
            .map(|payload| payload.settings)
            .unwrap_or_default();
        sanitize(&mut settings);

        Self {
            storage,
            clock,
            settings: RwLock::new(settings),
            listeners: Arc::new(Mutex::new(Vec::new())),
            next_listener_id: AtomicU64::new(1),
        }
    }

    /// Storage adapter used for persistence.
    pub fn storage(&self) -> &StorageAdapter {
        &self.storage
    }

    /// Current settings.
    pub fn get_settings(&self) -> Settings {
        self.settings.read().clone()
    }

    /// Merge `patch` into the current settings and save.
    ///
    /// `groups`, when given, are persisted alongside; otherwise the stored
    /// groups are kept.
    pub fn set_settings(&self, patch: SettingsPatch, groups: Option<&[EmojiGroup]>) {
        {
            let mut settings = self.settings.write();
            patch.apply_to(&mut settings);
            sanitize(&mut settings);
        }
        self.save(groups, None);
    }

    /// Replace the settings wholesale without saving.
    pub fn replace_settings(&self, mut settings: Settings) {
        sanitize(&mut settings);
        *self.settings.write() = settings;
    }

    /// Restore default settings and save.
    pub fn reset_settings(&self, groups: Option<&[EmojiGroup]>) {
        *self.settings.write() = Settings::default();
        self.save(groups, None);
        tracing::info!("settings reset to defaults");
    }

    /// Persist the full payload and notify listeners.
    pub fn save(&self, groups: Option<&[EmojiGroup]>, ungrouped: Option<&[UngroupedEmoji]>) {
        let settings = self.persist(groups, ungrouped);
        self.notify(&settings);
    }

    /// Persist the full payload without notifying listeners, returning the
    /// settings that were written.
    ///
    /// Fields passed as `None` are taken from the stored payload so that a
    /// settings-only save never drops groups or ungrouped items.
    pub fn persist(
        &self,
        groups: Option<&[EmojiGroup]>,
        ungrouped: Option<&[UngroupedEmoji]>,
    ) -> Settings {
        let settings = {
            let mut settings = self.settings.write();
            settings.last_modified = self.clock.now();
            settings.clone()
        };

        let stored = if groups.is_none() || ungrouped.is_none() {
            self.storage.load_payload()
        } else {
            None
        };
        let (stored_groups, stored_ungrouped) = stored
            .map(|p| (p.emoji_groups, p.ungrouped))
            .unwrap_or_default();

        let payload = PersistPayload::new(
            settings.clone(),
            groups.map_or(stored_groups, <[EmojiGroup]>::to_vec),
            ungrouped.map_or(stored_ungrouped, <[UngroupedEmoji]>::to_vec),
        );
        self.storage.save_payload(&payload);
        tracing::debug!(
            groups = payload.emoji_groups.len(),
            ungrouped = payload.ungrouped.len(),
            "payload saved"
        );
        settings
    }

    /// Register a change listener.
    pub fn on_change<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&Settings) + Send + Sync + 'static,
    {
        let id = self.next_listener_id.fetch_add(1, Ordering::Relaxed);
        self.listeners.lock().push((id, Arc::new(listener)));
        Subscription {
            id,
            listeners: Arc::downgrade(&self.listeners),
        }
    }

    /// Number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.lock().len()
    }

    /// Run every registered listener with `settings`.
    pub fn notify(&self, settings: &Settings) {
        // Snapshot so listeners may subscribe or unsubscribe while running.
        let listeners: Vec<Listener> = self
            .listeners
            .lock()
            .iter()
            .map(|(_, l)| Arc::clone(l))
            .collect();
        for listener in listeners {
            listener(settings);
        }
    }
}

fn sanitize(settings: &mut Settings) {
    let columns = settings
        .grid_columns
        .clamp(*GRID_COLUMNS_RANGE.start(), *GRID_COLUMNS_RANGE.end());
    if columns != settings.grid_columns {
        tracing::warn!(
            requested = settings.grid_columns,
            applied = columns,
            "gridColumns out of range"
        );
        settings.grid_columns = columns;
    }

    let scale = settings
        .image_scale
        .clamp(*IMAGE_SCALE_RANGE.start(), *IMAGE_SCALE_RANGE.end());
    if scale != settings.image_scale {
        tracing::warn!(
            requested = settings.image_scale,
            applied = scale,
            "imageScale out of range"
        );
        settings.image_scale = scale;
    }
}
