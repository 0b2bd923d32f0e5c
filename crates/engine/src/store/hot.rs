//! Hot emoji ranking and its single-slot cache.

use mojibox_core::types::{EmojiGroup, HotEmoji, UngroupedEmoji, UNGROUPED_GROUP_UUID};

/// Rank every used emoji by usage count, highest first.
///
/// Group emojis come before ungrouped ones in the input order, and the sort
/// is stable, so ties keep that order.
pub fn rank_hot(groups: &[EmojiGroup], ungrouped: &[UngroupedEmoji], limit: usize) -> Vec<HotEmoji> {
    let grouped = groups.iter().flat_map(|g| {
        g.emojis.iter().map(move |e| HotEmoji {
            emoji: e.clone(),
            group_uuid: g.uuid.clone(),
        })
    });
    let loose = ungrouped.iter().map(|u| HotEmoji {
        emoji: u.emoji.clone(),
        group_uuid: UNGROUPED_GROUP_UUID.to_string(),
    });

    let mut ranked: Vec<HotEmoji> = grouped.chain(loose).filter(|h| h.emoji.usage() > 0).collect();
    ranked.sort_by(|a, b| b.emoji.usage().cmp(&a.emoji.usage()));
    ranked.truncate(limit);
    ranked
}

/// Cached ranking plus the time it was computed.
#[derive(Debug, Default)]
pub struct HotCache {
    slot: Option<(Vec<HotEmoji>, i64)>,
}

impl HotCache {
    /// Cached ranking if it is younger than `ttl_ms` at `now`.
    pub fn fresh(&self, now: i64, ttl_ms: i64) -> Option<&[HotEmoji]> {
        match &self.slot {
            Some((data, at)) if now.saturating_sub(*at) < ttl_ms => Some(data),
            _ => None,
        }
    }

    pub fn store(&mut self, data: Vec<HotEmoji>, now: i64) {
        self.slot = Some((data, now));
    }

    pub fn clear(&mut self) {
        self.slot = None;
    }

    pub fn is_populated(&self) -> bool {
        self.slot.is_some()
    }
}
