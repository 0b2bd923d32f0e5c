//! Collection store
//!
//! One [`CollectionStore`] per hosting surface. It owns the groups, the
//! ungrouped list and the hot ranking cache, and persists every mutation
//! through the [`SettingsManager`].
//!
//! ## Locking
//!
//! Collections sit behind one `RwLock`. A mutation holds the write lock
//! for its whole duration, including the payload save, the sub-key writes
//! and the broadcasts, so saves from one instance are ordered and a reader
//! never sees a half-applied move. The hot cache has its own mutex, always
//! taken after the collections lock.
//!
//! Settings listeners run after the write lock is released, so a listener
//! may read the store.
//!
//! ## Failure model
//!
//! Not-found is reported through `bool`/`Option`. Storage, broadcast and
//! fetch failures are logged and swallowed; the in-memory state stays
//! authoritative.

mod hot;
mod usage;

pub use hot::{rank_hot, HotCache};
pub use usage::Decay;

use crate::comms::{CommunicationService, NoopCommunication};
use crate::defaults::{DefaultPayloadSource, NoDefaults};
use crate::fetch::{IconFetcher, OfflineFetcher};
use crate::icons::{IconCache, PreloadReport};
use crate::settings::SettingsManager;
use mojibox_core::clock::Clock;
use mojibox_core::config::StoreConfig;
use mojibox_core::types::{
    Emoji, EmojiGroup, HotEmoji, PersistPayload, Settings, UngroupedEmoji, COMMON_GROUP_UUID,
    UNGROUPED_GROUP_UUID,
};
use mojibox_storage::StorageAdapter;
use parking_lot::{Mutex, RwLock};
use std::sync::Arc;

/// Display-name markers of legacy favourites groups, hidden from
/// [`CollectionStore::get_normal_groups`].
pub const FAVOURITES_MARKERS: [&str; 3] = ["常用", "收藏", "最近"];

/// Where [`CollectionStore::init_from_storage`] got its data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitSource {
    /// A persisted payload
    Storage,
    /// The default payload source, now persisted
    BundledDefaults,
    /// Nothing stored and no defaults
    Empty,
}

/// Result of [`CollectionStore::find_emoji_by_uuid`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoundEmoji {
    /// Owning group, or [`UNGROUPED_GROUP_UUID`]
    pub group_uuid: String,
    pub emoji: Emoji,
}

impl FoundEmoji {
    pub fn is_ungrouped(&self) -> bool {
        self.group_uuid == UNGROUPED_GROUP_UUID
    }
}

/// One entry of [`CollectionStore::update_multiple_group_icons`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconUpdate {
    pub group_uuid: String,
    pub icon: String,
}

impl IconUpdate {
    pub fn new(group_uuid: impl Into<String>, icon: impl Into<String>) -> Self {
        Self {
            group_uuid: group_uuid.into(),
            icon: icon.into(),
        }
    }
}

#[derive(Debug, Default)]
struct Collections {
    groups: Vec<EmojiGroup>,
    ungrouped: Vec<UngroupedEmoji>,
}

impl Collections {
    fn group_mut(&mut self, uuid: &str) -> Option<&mut EmojiGroup> {
        self.groups.iter_mut().find(|g| g.uuid == uuid)
    }

    fn group_index(&self, uuid: &str) -> Option<usize> {
        self.groups.iter().position(|g| g.uuid == uuid)
    }

    fn ungrouped_index(&self, uuid: &str) -> Option<usize> {
        self.ungrouped.iter().position(|u| u.uuid() == uuid)
    }

    fn common(&self) -> Option<&EmojiGroup> {
        self.groups.iter().find(|g| g.is_common())
    }

    fn install(&mut self, payload: PersistPayload) {
        self.groups = payload.emoji_groups;
        self.ungrouped = payload.ungrouped;
    }
}

/// The emoji collection of one surface.
pub struct CollectionStore {
    config: StoreConfig,
    decay: Decay,
    storage: StorageAdapter,
    settings: Arc<SettingsManager>,
    comms: Arc<dyn CommunicationService>,
    defaults: Arc<dyn DefaultPayloadSource>,
    fetcher: Arc<dyn IconFetcher>,
    icons: Arc<IconCache>,
    clock: Arc<dyn Clock>,
    state: RwLock<Collections>,
    hot: Mutex<HotCache>,
}

impl std::fmt::Debug for CollectionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.read();
        f.debug_struct("CollectionStore")
            .field("storage", &self.storage)
            .field("groups", &state.groups.len())
            .field("ungrouped", &state.ungrouped.len())
            .field("icons", &self.icons.len())
            .finish()
    }
}

impl CollectionStore {
    /// Create an empty store. Call [`init_from_storage`](Self::init_from_storage)
    /// to load persisted data.
    ///
    /// Communication, defaults and icon fetching start as no-ops; replace
    /// them with the `with_*` methods.
    pub fn new(config: StoreConfig, storage: StorageAdapter, clock: Arc<dyn Clock>) -> Self {
        let settings = Arc::new(SettingsManager::new(storage.clone(), Arc::clone(&clock)));
        let icons = Arc::new(IconCache::new(config.icon_cache_ttl(), Arc::clone(&clock)));
        let decay = Decay {
            factor: config.decay_factor,
            period_ms: config.decay_period_ms,
        };
        Self {
            config,
            decay,
            storage,
            settings,
            comms: Arc::new(NoopCommunication),
            defaults: Arc::new(NoDefaults),
            fetcher: Arc::new(OfflineFetcher),
            icons,
            clock,
            state: RwLock::new(Collections::default()),
            hot: Mutex::new(HotCache::default()),
        }
    }

    pub fn with_communication(mut self, comms: Arc<dyn CommunicationService>) -> Self {
        self.comms = comms;
        self
    }

    pub fn with_defaults(mut self, defaults: Arc<dyn DefaultPayloadSource>) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn with_icon_fetcher(mut self, fetcher: Arc<dyn IconFetcher>) -> Self {
        self.fetcher = fetcher;
        self
    }

    /// Settings manager shared with this store.
    pub fn settings(&self) -> &Arc<SettingsManager> {
        &self.settings
    }

    /// Icon cache of this store.
    pub fn icons(&self) -> &Arc<IconCache> {
        &self.icons
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Load the persisted payload, falling back to the default source when
    /// nothing is stored. Defaults are persisted immediately.
    pub fn init_from_storage(&self) -> InitSource {
        let mut state = self.state.write();
        self.hot.lock().clear();

        if let Some(payload) = self.storage.load_payload() {
            self.settings.replace_settings(payload.settings.clone());
            state.install(payload);
            tracing::info!(
                source = "storage",
                groups = state.groups.len(),
                ungrouped = state.ungrouped.len(),
                "collection initialised"
            );
            return InitSource::Storage;
        }

        match self.defaults.fetch_default() {
            Ok(Some(payload)) => {
                self.settings.replace_settings(payload.settings.clone());
                state.install(payload);
                let saved = self.persist(&state);
                tracing::info!(
                    source = "defaults",
                    groups = state.groups.len(),
                    "collection initialised"
                );
                drop(state);
                self.settings.notify(&saved);
                InitSource::BundledDefaults
            }
            Ok(None) => {
                state.install(PersistPayload::default());
                tracing::info!(source = "empty", "collection initialised");
                InitSource::Empty
            }
            Err(e) => {
                state.install(PersistPayload::default());
                tracing::warn!(error = %e, "default payload unavailable");
                InitSource::Empty
            }
        }
    }

    /// Re-read the backend, replacing in-memory state and settings.
    ///
    /// Returns `false` and keeps the current state when nothing readable is
    /// stored.
    pub fn reload_from_storage(&self) -> bool {
        let Some(payload) = self.storage.load_payload() else {
            tracing::debug!("reload found no payload");
            return false;
        };
        let mut state = self.state.write();
        self.settings.replace_settings(payload.settings.clone());
        state.install(payload);
        self.hot.lock().clear();
        tracing::debug!(groups = state.groups.len(), "collection reloaded");
        true
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// All groups, with the common group pinned first.
    pub fn get_emoji_groups(&self) -> Vec<EmojiGroup> {
        pin_common(&self.state.read().groups)
    }

    /// Groups other than the common group and legacy favourites groups.
    pub fn get_normal_groups(&self) -> Vec<EmojiGroup> {
        self.state
            .read()
            .groups
            .iter()
            .filter(|g| !g.is_common() && !is_favourites_name(&g.display_name))
            .cloned()
            .collect()
    }

    pub fn get_common_emoji_group(&self) -> Option<EmojiGroup> {
        self.state.read().common().cloned()
    }

    pub fn get_ungrouped(&self) -> Vec<UngroupedEmoji> {
        self.state.read().ungrouped.clone()
    }

    pub fn find_group_by_uuid(&self, uuid: &str) -> Option<EmojiGroup> {
        self.state.read().groups.iter().find(|g| g.uuid == uuid).cloned()
    }

    /// Locate an emoji in the groups, then in the ungrouped list.
    pub fn find_emoji_by_uuid(&self, uuid: &str) -> Option<FoundEmoji> {
        let state = self.state.read();
        let grouped = state.groups.iter().find_map(|g| {
            g.emojis.iter().find(|e| e.uuid == uuid).map(|e| FoundEmoji {
                group_uuid: g.uuid.clone(),
                emoji: e.clone(),
            })
        });
        grouped.or_else(|| {
            state
                .ungrouped
                .iter()
                .find(|u| u.uuid() == uuid)
                .map(|u| FoundEmoji {
                    group_uuid: UNGROUPED_GROUP_UUID.to_string(),
                    emoji: u.emoji.clone(),
                })
        })
    }

    // =========================================================================
    // Group mutations
    // =========================================================================

    /// Replace every group.
    pub fn set_emoji_groups(&self, groups: Vec<EmojiGroup>) {
        let mut state = self.state.write();
        state.groups = groups;
        let saved = self.persist(&state);
        tracing::debug!(count = state.groups.len(), "groups replaced");
        drop(state);
        self.settings.notify(&saved);
    }

    /// Append a group. Rejects a UUID that is already present.
    pub fn add_group(&self, group: EmojiGroup) -> bool {
        let mut state = self.state.write();
        if state.group_index(&group.uuid).is_some() {
            tracing::debug!(group = %group.uuid, "group already exists");
            return false;
        }
        tracing::debug!(group = %group.uuid, "group added");
        state.groups.push(group);
        let saved = self.persist(&state);
        drop(state);
        self.settings.notify(&saved);
        true
    }

    pub fn remove_group(&self, uuid: &str) -> bool {
        let mut state = self.state.write();
        let Some(index) = state.group_index(uuid) else {
            return false;
        };
        state.groups.remove(index);
        let saved = self.persist(&state);
        self.icons.clear_icon_cache(Some(uuid));
        drop(state);
        tracing::debug!(group = uuid, "group removed");
        self.settings.notify(&saved);
        true
    }

    /// Insert `emoji` into a group at `position`, appending when the
    /// position is absent or past the end.
    pub fn add_emoji_to_group(&self, group_uuid: &str, emoji: Emoji, position: Option<usize>) -> bool {
        let mut state = self.state.write();
        let Some(group) = state.group_mut(group_uuid) else {
            return false;
        };
        tracing::debug!(group = group_uuid, emoji = %emoji.uuid, "emoji added");
        insert_at(&mut group.emojis, emoji, position);
        let saved = self.persist(&state);
        drop(state);
        self.settings.notify(&saved);
        true
    }

    pub fn remove_emoji_from_group(&self, group_uuid: &str, emoji_uuid: &str) -> bool {
        let mut state = self.state.write();
        let Some(group) = state.group_mut(group_uuid) else {
            return false;
        };
        let Some(index) = group.position_of(emoji_uuid) else {
            return false;
        };
        group.emojis.remove(index);
        let saved = self.persist(&state);
        drop(state);
        tracing::debug!(group = group_uuid, emoji = emoji_uuid, "emoji removed");
        self.settings.notify(&saved);
        true
    }

    /// Move an emoji between groups.
    ///
    /// Nothing changes unless both groups exist and the emoji is in `from`.
    pub fn move_emoji_between_groups(
        &self,
        from: &str,
        to: &str,
        emoji_uuid: &str,
        to_index: Option<usize>,
    ) -> bool {
        let mut state = self.state.write();
        let (Some(from_idx), Some(to_idx)) = (state.group_index(from), state.group_index(to)) else {
            return false;
        };
        let Some(emoji_idx) = state.groups[from_idx].position_of(emoji_uuid) else {
            return false;
        };

        let emoji = state.groups[from_idx].emojis.remove(emoji_idx);
        insert_at(&mut state.groups[to_idx].emojis, emoji, to_index);
        let saved = self.persist(&state);
        drop(state);
        tracing::debug!(from, to, emoji = emoji_uuid, "emoji moved");
        self.settings.notify(&saved);
        true
    }

    /// Move the emoji at `from_index` to `to_index` within one group.
    pub fn reorder_emoji_in_group(&self, group_uuid: &str, from_index: usize, to_index: usize) -> bool {
        let mut state = self.state.write();
        let Some(group) = state.group_mut(group_uuid) else {
            return false;
        };
        if !reorder(&mut group.emojis, from_index, to_index) {
            return false;
        }
        let saved = self.persist(&state);
        drop(state);
        tracing::debug!(group = group_uuid, from_index, to_index, "emoji reordered");
        self.settings.notify(&saved);
        true
    }

    /// Move the group at `from_index` to `to_index`, in stored order.
    pub fn reorder_groups(&self, from_index: usize, to_index: usize) -> bool {
        let mut state = self.state.write();
        if !reorder(&mut state.groups, from_index, to_index) {
            return false;
        }
        let saved = self.persist(&state);
        drop(state);
        tracing::debug!(from_index, to_index, "groups reordered");
        self.settings.notify(&saved);
        true
    }

    // =========================================================================
    // Ungrouped mutations
    // =========================================================================

    /// Append an emoji to the ungrouped list, stamped now.
    ///
    /// Rejects a UUID that is already in the list.
    pub fn add_ungrouped(&self, emoji: Emoji) -> bool {
        let mut state = self.state.write();
        if state.ungrouped_index(&emoji.uuid).is_some() {
            return false;
        }
        tracing::debug!(emoji = %emoji.uuid, "ungrouped emoji added");
        state
            .ungrouped
            .push(UngroupedEmoji::new(emoji, self.clock.now_millis()));
        let saved = self.persist_ungrouped(&state);
        drop(state);
        self.settings.notify(&saved);
        true
    }

    pub fn remove_ungrouped_by_uuid(&self, uuid: &str) -> bool {
        let mut state = self.state.write();
        let Some(index) = state.ungrouped_index(uuid) else {
            return false;
        };
        state.ungrouped.remove(index);
        let saved = self.persist_ungrouped(&state);
        drop(state);
        tracing::debug!(emoji = uuid, "ungrouped emoji removed");
        self.settings.notify(&saved);
        true
    }

    /// Replace the ungrouped list.
    pub fn set_ungrouped_emojis(&self, list: Vec<UngroupedEmoji>) {
        let mut state = self.state.write();
        state.ungrouped = list;
        let saved = self.persist_ungrouped(&state);
        tracing::debug!(count = state.ungrouped.len(), "ungrouped list replaced");
        drop(state);
        self.settings.notify(&saved);
    }

    /// Take an emoji out of a group and append it to the ungrouped list.
    ///
    /// Nothing changes when the UUID is already in the ungrouped list.
    pub fn move_emoji_to_ungrouped(&self, group_uuid: &str, emoji_uuid: &str) -> bool {
        let now = self.clock.now_millis();
        let mut state = self.state.write();
        if state.ungrouped_index(emoji_uuid).is_some() {
            tracing::debug!(emoji = emoji_uuid, "emoji already ungrouped");
            return false;
        }
        let Some(group) = state.group_mut(group_uuid) else {
            return false;
        };
        let Some(index) = group.position_of(emoji_uuid) else {
            return false;
        };
        let emoji = group.emojis.remove(index);
        state.ungrouped.push(UngroupedEmoji::new(emoji, now));
        let saved = self.persist_ungrouped(&state);
        drop(state);
        tracing::debug!(group = group_uuid, emoji = emoji_uuid, "emoji moved to ungrouped");
        self.settings.notify(&saved);
        true
    }

    /// Take an emoji off the ungrouped list and insert it into a group.
    pub fn move_emoji_from_ungrouped(
        &self,
        emoji_uuid: &str,
        target_group_uuid: &str,
        position: Option<usize>,
    ) -> bool {
        let mut state = self.state.write();
        let (Some(index), Some(target)) = (
            state.ungrouped_index(emoji_uuid),
            state.group_index(target_group_uuid),
        ) else {
            return false;
        };
        let emoji = state.ungrouped.remove(index).into_emoji();
        insert_at(&mut state.groups[target].emojis, emoji, position);
        let saved = self.persist_ungrouped(&state);
        drop(state);
        tracing::debug!(group = target_group_uuid, emoji = emoji_uuid, "emoji moved from ungrouped");
        self.settings.notify(&saved);
        true
    }

    // =========================================================================
    // Icons
    // =========================================================================

    pub fn update_group_icon(&self, group_uuid: &str, icon: &str) -> bool {
        self.update_multiple_group_icons(&[IconUpdate::new(group_uuid, icon)]) == 1
    }

    /// Apply several icon changes with a single save. Returns how many
    /// groups were found and updated.
    pub fn update_multiple_group_icons(&self, updates: &[IconUpdate]) -> usize {
        let mut state = self.state.write();
        let mut applied = Vec::new();
        for update in updates {
            if let Some(group) = state.group_mut(&update.group_uuid) {
                group.icon = update.icon.clone();
                applied.push(update);
            }
        }
        if applied.is_empty() {
            return 0;
        }

        let saved = self.persist(&state);
        if applied.iter().any(|u| u.group_uuid == COMMON_GROUP_UUID) {
            if let Some(common) = state.common() {
                self.storage.save_common_group(common);
            }
        }
        for update in &applied {
            self.icons.clear_icon_cache(Some(&update.group_uuid));
            if let Err(e) = self
                .comms
                .send_group_icon_updated(&update.group_uuid, &update.icon)
            {
                tracing::warn!(group = %update.group_uuid, error = %e, "icon broadcast failed");
            }
        }
        drop(state);
        tracing::debug!(count = applied.len(), "group icons updated");
        self.settings.notify(&saved);
        applied.len()
    }

    /// Warm the icon cache for the given groups. Unknown UUIDs are ignored.
    pub fn preload_group_icons(&self, group_uuids: &[&str]) -> PreloadReport {
        let groups: Vec<EmojiGroup> = {
            let state = self.state.read();
            group_uuids
                .iter()
                .filter_map(|uuid| state.groups.iter().find(|g| g.uuid == *uuid).cloned())
                .collect()
        };
        self.icons.preload(&groups, self.fetcher.as_ref())
    }

    // =========================================================================
    // Usage
    // =========================================================================

    /// Count one use of the emoji, applying decay for the time since its
    /// last use. Returns `false` if the UUID is unknown.
    pub fn record_usage_by_uuid(&self, uuid: &str) -> bool {
        let now = self.clock.now_millis();
        let mut guard = self.state.write();
        let state: &mut Collections = &mut guard;

        let owner = if let Some(group) = state
            .groups
            .iter_mut()
            .find(|g| g.position_of(uuid).is_some())
        {
            if let Some(emoji) = group.emojis.iter_mut().find(|e| e.uuid == uuid) {
                self.decay.record(emoji, now);
            }
            group.uuid.clone()
        } else if let Some(loose) = state.ungrouped.iter_mut().find(|u| u.uuid() == uuid) {
            self.decay.record(&mut loose.emoji, now);
            UNGROUPED_GROUP_UUID.to_string()
        } else {
            tracing::debug!(emoji = uuid, "usage recorded for unknown emoji");
            return false;
        };

        let saved = self.persist(state);
        if owner == COMMON_GROUP_UUID {
            self.write_and_verify_common(state, uuid);
        }
        drop(guard);
        tracing::debug!(group = %owner, emoji = uuid, "usage recorded");
        self.settings.notify(&saved);
        true
    }

    /// Zero every usage counter.
    pub fn reset_all_usage_counts(&self) {
        let mut state = self.state.write();
        let Collections { groups, ungrouped } = &mut *state;
        groups
            .iter_mut()
            .flat_map(|g| g.emojis.iter_mut())
            .chain(ungrouped.iter_mut().map(|u| &mut u.emoji))
            .for_each(Emoji::reset_usage);
        let saved = self.persist(&state);
        if let Some(common) = state.common() {
            self.storage.save_common_group(common);
        }
        drop(state);
        tracing::info!("usage counts reset");
        self.settings.notify(&saved);
    }

    pub fn reset_usage_count_by_uuid(&self, uuid: &str) -> bool {
        let mut state = self.state.write();
        let Collections { groups, ungrouped } = &mut *state;

        let mut in_common = false;
        let target = groups
            .iter_mut()
            .find_map(|g| {
                let common = g.is_common();
                g.emojis.iter_mut().find(|e| e.uuid == uuid).map(|e| {
                    in_common = common;
                    e
                })
            })
            .or_else(|| {
                ungrouped
                    .iter_mut()
                    .find(|u| u.uuid() == uuid)
                    .map(|u| &mut u.emoji)
            });
        let Some(emoji) = target else {
            return false;
        };
        emoji.reset_usage();

        let saved = self.persist(&state);
        if in_common {
            if let Some(common) = state.common() {
                self.storage.save_common_group(common);
            }
        }
        drop(state);
        tracing::debug!(emoji = uuid, "usage count reset");
        self.settings.notify(&saved);
        true
    }

    // =========================================================================
    // Hot ranking
    // =========================================================================

    /// Most used emojis, highest count first.
    ///
    /// Served from the cache while it is younger than the configured TTL
    /// unless `force_refresh` is set.
    pub fn get_hot_emojis(&self, force_refresh: bool) -> Vec<HotEmoji> {
        let now = self.clock.now_millis();
        let ttl = i64::try_from(self.config.hot_cache_ttl_ms).unwrap_or(i64::MAX);
        let state = self.state.read();
        let mut hot = self.hot.lock();

        if !force_refresh {
            if let Some(cached) = hot.fresh(now, ttl) {
                tracing::debug!(count = cached.len(), "hot emoji cache hit");
                return cached.to_vec();
            }
        }

        let ranked = rank_hot(&state.groups, &state.ungrouped, self.config.hot_limit);
        tracing::debug!(count = ranked.len(), forced = force_refresh, "hot emoji cache miss");
        hot.store(ranked.clone(), now);
        ranked
    }

    /// Drop the cached ranking.
    pub fn invalidate_hot_cache(&self) {
        self.hot.lock().clear();
    }

    // =========================================================================
    // Persistence helpers
    // =========================================================================

    // Listeners are not run here: callers notify with the returned settings
    // after releasing the state lock.
    fn persist(&self, state: &Collections) -> Settings {
        self.hot.lock().clear();
        self.settings
            .persist(Some(&state.groups), Some(&state.ungrouped))
    }

    /// Save, write the ungrouped sub-key, then broadcast. Each step fails
    /// soft on its own.
    fn persist_ungrouped(&self, state: &Collections) -> Settings {
        let saved = self.persist(state);
        self.storage.save_ungrouped(&state.ungrouped);
        if let Err(e) = self.comms.send_ungrouped_emojis_changed_sync(&state.ungrouped) {
            tracing::warn!(error = %e, "ungrouped broadcast failed");
        }
        saved
    }

    fn write_and_verify_common(&self, state: &Collections, emoji_uuid: &str) {
        let Some(common) = state.common() else {
            return;
        };
        if !self.storage.save_common_group(common) {
            return;
        }

        let expected = common.emojis.iter().find(|e| e.uuid == emoji_uuid);
        let stored = self.storage.load_common_group();
        let stored_emoji = stored
            .as_ref()
            .and_then(|g| g.emojis.iter().find(|e| e.uuid == emoji_uuid));

        let matches = match (expected, stored_emoji) {
            (Some(a), Some(b)) => a.usage_count == b.usage_count && a.last_used == b.last_used,
            _ => false,
        };
        if !matches {
            tracing::error!(
                emoji = emoji_uuid,
                expected = ?expected.and_then(|e| e.usage_count),
                stored = ?stored_emoji.and_then(|e| e.usage_count),
                "common group verification failed"
            );
        }
    }
}

/// Groups with the common group moved to the front.
pub fn pin_common(groups: &[EmojiGroup]) -> Vec<EmojiGroup> {
    let mut ordered = groups.to_vec();
    if let Some(index) = ordered.iter().position(EmojiGroup::is_common) {
        if index > 0 {
            let common = ordered.remove(index);
            ordered.insert(0, common);
        }
    }
    ordered
}

fn is_favourites_name(name: &str) -> bool {
    FAVOURITES_MARKERS.iter().any(|m| name.contains(m))
}

fn insert_at<T>(items: &mut Vec<T>, item: T, position: Option<usize>) {
    match position {
        Some(p) if p <= items.len() => items.insert(p, item),
        _ => items.push(item),
    }
}

fn reorder<T>(items: &mut Vec<T>, from_index: usize, to_index: usize) -> bool {
    if from_index >= items.len() {
        return false;
    }
    let item = items.remove(from_index);
    let to = to_index.min(items.len());
    items.insert(to, item);
    true
}
