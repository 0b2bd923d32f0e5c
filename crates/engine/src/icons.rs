//! Group icon cache
//!
//! Maps group UUID to the resolved icon: the source URL and, for remote or
//! `data:` icons, the fetched bytes. Entries expire `ttl` after they were
//! cached. Expired entries are evicted lazily on read, or in bulk by
//! [`IconCache::purge_expired`].

use crate::fetch::{decode_data_uri, is_remote_icon, IconFetcher};
use dashmap::DashMap;
use mojibox_core::clock::Clock;
use mojibox_core::types::EmojiGroup;
use std::sync::Arc;
use std::time::Duration;

/// A resolved group icon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedIcon {
    /// Icon as stored on the group (URL or glyph)
    pub url: String,
    /// Fetched bytes; `None` for glyph icons
    pub blob: Option<Arc<[u8]>>,
}

#[derive(Debug, Clone)]
struct IconEntry {
    icon: CachedIcon,
    cached_at: i64,
}

/// Outcome of a preload batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PreloadReport {
    /// Glyph icons cached without a blob
    pub glyphs: usize,
    /// Remote or data icons fetched and cached
    pub fetched: usize,
    /// Groups already cached
    pub skipped: usize,
    /// Fetch or decode failures
    pub failed: usize,
}

impl PreloadReport {
    /// Number of groups that ended up with a fresh cache entry.
    pub fn cached(&self) -> usize {
        self.glyphs + self.fetched
    }
}

/// TTL cache of group icons.
#[derive(Debug)]
pub struct IconCache {
    entries: DashMap<String, IconEntry>,
    ttl_ms: i64,
    clock: Arc<dyn Clock>,
}

impl IconCache {
    pub fn new(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: DashMap::new(),
            ttl_ms: i64::try_from(ttl.as_millis()).unwrap_or(i64::MAX),
            clock,
        }
    }

    /// Insert or replace the entry for `group_uuid`, stamped now.
    pub fn cache_group_icon(&self, group_uuid: &str, url: &str, blob: Option<Vec<u8>>) {
        self.entries.insert(
            group_uuid.to_string(),
            IconEntry {
                icon: CachedIcon {
                    url: url.to_string(),
                    blob: blob.map(Arc::from),
                },
                cached_at: self.clock.now_millis(),
            },
        );
    }

    /// Fresh entry for `group_uuid`, evicting it if expired.
    pub fn get_cached_group_icon(&self, group_uuid: &str) -> Option<CachedIcon> {
        let now = self.clock.now_millis();
        let found = self
            .entries
            .get(group_uuid)
            .map(|entry| (self.is_expired(&entry, now), entry.icon.clone()));

        match found {
            Some((false, icon)) => Some(icon),
            Some((true, _)) => {
                self.entries
                    .remove_if(group_uuid, |_, entry| self.is_expired(entry, now));
                tracing::debug!(group = group_uuid, "icon cache entry expired");
                None
            }
            None => None,
        }
    }

    /// Drop one entry, or every entry when `group_uuid` is `None`.
    pub fn clear_icon_cache(&self, group_uuid: Option<&str>) {
        match group_uuid {
            Some(uuid) => {
                self.entries.remove(uuid);
            }
            None => self.entries.clear(),
        }
    }

    /// Remove every expired entry. Returns how many were removed.
    pub fn purge_expired(&self) -> usize {
        let now = self.clock.now_millis();
        let before = self.entries.len();
        self.entries.retain(|_, entry| !self.is_expired(entry, now));
        before.saturating_sub(self.entries.len())
    }

    /// Number of entries, expired ones included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Warm the cache for `groups`.
    ///
    /// Groups with a fresh entry are skipped. A failure for one group is
    /// logged and counted; the rest of the batch still runs.
    pub fn preload<'a, I>(&self, groups: I, fetcher: &dyn IconFetcher) -> PreloadReport
    where
        I: IntoIterator<Item = &'a EmojiGroup>,
    {
        let mut report = PreloadReport::default();

        for group in groups {
            if self.get_cached_group_icon(&group.uuid).is_some() {
                report.skipped += 1;
                continue;
            }

            if !is_remote_icon(&group.icon) {
                self.cache_group_icon(&group.uuid, &group.icon, None);
                report.glyphs += 1;
                continue;
            }

            let bytes = if group.icon.get(..5).map_or(false, |s| s.eq_ignore_ascii_case("data:")) {
                decode_data_uri(&group.icon)
            } else {
                fetcher.fetch(&group.icon)
            };

            match bytes {
                Ok(bytes) => {
                    self.cache_group_icon(&group.uuid, &group.icon, Some(bytes));
                    report.fetched += 1;
                }
                Err(e) => {
                    tracing::warn!(
                        group = %group.uuid,
                        icon = %group.icon,
                        error = %e,
                        "icon preload failed"
                    );
                    report.failed += 1;
                }
            }
        }

        tracing::info!(
            glyphs = report.glyphs,
            fetched = report.fetched,
            skipped = report.skipped,
            failed = report.failed,
            "icon preload finished"
        );
        report
    }

    fn is_expired(&self, entry: &IconEntry, now: i64) -> bool {
        now.saturating_sub(entry.cached_at) > self.ttl_ms
    }
}
