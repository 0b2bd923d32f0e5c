//! Usage recording, decay, resets and the hot ranking.

use crate::common::*;
use mojibox::{EmojiGroup, MILLIS_PER_DAY, COMMON_GROUP_UUID, UNGROUPED_GROUP_UUID};
use std::time::Duration;

fn used(uuid: &str, count: u32, last_used: Option<i64>) -> mojibox::Emoji {
    let mut e = emoji(uuid);
    e.usage_count = Some(count);
    e.last_used = last_used;
    e
}

#[test]
fn first_use_counts_one() {
    let h = harness();
    h.mb.store.add_group(group("g", 1));

    assert!(h.mb.store.record_usage_by_uuid("g-0"));

    let e = h.mb.store.find_emoji_by_uuid("g-0").unwrap().emoji;
    assert_eq!(e.usage_count, Some(1));
    assert_eq!(e.last_used, Some(T0));
}

#[test]
fn two_idle_days_decay_ten_to_seven() {
    let h = harness();
    let mut g = EmojiGroup::with_uuid("g", "g", "x");
    g.emojis.push(used("e", 10, Some(T0 - 2 * MILLIS_PER_DAY)));
    h.mb.store.add_group(g);

    assert!(h.mb.store.record_usage_by_uuid("e"));

    let e = h.mb.store.find_emoji_by_uuid("e").unwrap().emoji;
    assert_eq!(e.usage_count, Some(7));
    assert_eq!(e.last_used, Some(T0));
    let persisted = &stored(&h.backend).emoji_groups[0].emojis[0];
    assert_eq!(persisted.usage_count, Some(7));
}

#[test]
fn repeated_use_after_days() {
    let h = harness();
    h.mb.store.add_group(group("g", 1));
    for _ in 0..5 {
        h.mb.store.record_usage_by_uuid("g-0");
    }
    h.clock.advance_days(1);
    h.mb.store.record_usage_by_uuid("g-0");

    // floor(5 * 0.8) + 1
    let e = h.mb.store.find_emoji_by_uuid("g-0").unwrap().emoji;
    assert_eq!(e.usage_count, Some(5));
}

#[test]
fn ungrouped_usage_is_recorded() {
    let h = harness();
    h.mb.store.add_ungrouped(emoji("loose"));
    assert!(h.mb.store.record_usage_by_uuid("loose"));
    assert_eq!(h.mb.store.get_ungrouped()[0].emoji.usage_count, Some(1));
}

#[test]
fn unknown_uuid_is_rejected() {
    let h = harness();
    let writes = h.backend.write_count();
    assert!(!h.mb.store.record_usage_by_uuid("ghost"));
    assert_eq!(h.backend.write_count(), writes);
}

#[test]
fn common_group_usage_writes_sub_key() {
    let h = harness();
    h.mb.store.add_group(group(COMMON_GROUP_UUID, 2));
    assert!(h.adapter().load_common_group().is_none());

    h.mb.store.record_usage_by_uuid(&format!("{}-1", COMMON_GROUP_UUID));

    let copy = h.adapter().load_common_group().unwrap();
    assert_eq!(copy.emojis[1].usage_count, Some(1));
    assert_eq!(copy.emojis[1].last_used, Some(T0));
}

#[test]
fn hot_ranking_is_sorted_and_annotated() {
    let h = harness();
    let mut a = EmojiGroup::with_uuid("a", "a", "x");
    a.emojis = vec![used("a1", 3, Some(T0)), used("a2", 0, None), used("a3", 9, Some(T0))];
    h.mb.store.add_group(a);
    h.mb.store.add_ungrouped(used("u1", 3, Some(T0)));

    let hot = h.mb.store.get_hot_emojis(false);
    let ids: Vec<_> = hot.iter().map(|e| e.emoji.uuid.as_str()).collect();
    assert_eq!(ids, vec!["a3", "a1", "u1"]);
    assert_eq!(hot[0].group_uuid, "a");
    assert_eq!(hot[2].group_uuid, UNGROUPED_GROUP_UUID);
}

#[test]
fn hot_ranking_keeps_top_fifty() {
    let h = harness();
    let mut g = EmojiGroup::with_uuid("g", "g", "x");
    g.emojis = (0..60).map(|i| used(&format!("e{}", i), i + 1, Some(T0))).collect();
    h.mb.store.add_group(g);

    let hot = h.mb.store.get_hot_emojis(false);
    assert_eq!(hot.len(), 50);
    assert_eq!(hot[0].emoji.usage_count, Some(60));
    assert_eq!(hot[49].emoji.usage_count, Some(11));
}

#[test]
fn usage_recording_refreshes_hot_ranking() {
    let h = harness();
    h.mb.store.add_group(group("g", 2));
    h.mb.store.record_usage_by_uuid("g-0");
    assert_eq!(h.mb.store.get_hot_emojis(false).len(), 1);

    h.clock.advance(Duration::from_secs(5));
    h.mb.store.record_usage_by_uuid("g-1");
    h.mb.store.record_usage_by_uuid("g-1");

    let hot = h.mb.store.get_hot_emojis(false);
    assert_eq!(hot.len(), 2);
    assert_eq!(hot[0].emoji.uuid, "g-1");
}

#[test]
fn hot_ranking_survives_cache_expiry() {
    let h = harness();
    h.mb.store.add_group(group("g", 1));
    h.mb.store.record_usage_by_uuid("g-0");

    let first = h.mb.store.get_hot_emojis(false);
    h.clock.advance(Duration::from_secs(30));
    assert_eq!(h.mb.store.get_hot_emojis(false), first);
    h.clock.advance(Duration::from_secs(31));
    assert_eq!(h.mb.store.get_hot_emojis(false), first);
    assert_eq!(h.mb.store.get_hot_emojis(true), first);
}

#[test]
fn reset_all_clears_counts() {
    let h = harness();
    h.mb.store.add_group(group(COMMON_GROUP_UUID, 1));
    h.mb.store.add_ungrouped(emoji("loose"));
    h.mb.store.record_usage_by_uuid(&format!("{}-0", COMMON_GROUP_UUID));
    h.mb.store.record_usage_by_uuid("loose");
    assert_eq!(h.mb.store.get_hot_emojis(false).len(), 2);

    h.mb.store.reset_all_usage_counts();

    assert!(h.mb.store.get_hot_emojis(false).is_empty());
    let loose = &h.mb.store.get_ungrouped()[0].emoji;
    assert_eq!(loose.usage_count, Some(0));
    assert_eq!(loose.last_used, None);
    let copy = h.adapter().load_common_group().unwrap();
    assert_eq!(copy.emojis[0].usage_count, Some(0));
}

#[test]
fn reset_one_emoji() {
    let h = harness();
    h.mb.store.add_group(group("g", 2));
    h.mb.store.record_usage_by_uuid("g-0");
    h.mb.store.record_usage_by_uuid("g-1");

    assert!(h.mb.store.reset_usage_count_by_uuid("g-0"));
    assert!(!h.mb.store.reset_usage_count_by_uuid("ghost"));

    let hot = h.mb.store.get_hot_emojis(false);
    assert_eq!(hot.len(), 1);
    assert_eq!(hot[0].emoji.uuid, "g-1");
    let e = &stored(&h.backend).emoji_groups[0].emojis[0];
    assert_eq!((e.usage_count, e.last_used), (Some(0), None));

    // A reset emoji starts over on its next use.
    h.clock.advance_days(3);
    h.mb.store.record_usage_by_uuid("g-0");
    assert_eq!(h.mb.store.find_emoji_by_uuid("g-0").unwrap().emoji.usage_count, Some(1));
}
