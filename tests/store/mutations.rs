//! Group and emoji mutations.

use crate::common::*;
use mojibox::{EmojiGroup, IconUpdate, COMMON_GROUP_UUID};

#[test]
fn add_emoji_at_front() {
    let h = harness();
    h.mb.store.add_group(group("G2", 3));

    assert!(h.mb.store.add_emoji_to_group("G2", emoji("e"), Some(0)));

    let g = h.mb.store.find_group_by_uuid("G2").unwrap();
    assert_eq!(g.emojis.len(), 4);
    assert_eq!(g.emojis[0].uuid, "e");
    assert_eq!(emoji_ids(&stored(&h.backend).emoji_groups[0])[0], "e");
}

#[test]
fn add_emoji_past_end_appends() {
    let h = harness();
    h.mb.store.add_group(group("g", 2));

    assert!(h.mb.store.add_emoji_to_group("g", emoji("tail"), Some(10)));
    assert!(h.mb.store.add_emoji_to_group("g", emoji("end"), None));

    let g = h.mb.store.find_group_by_uuid("g").unwrap();
    assert_eq!(emoji_ids(&g), vec!["g-0", "g-1", "tail", "end"]);
}

#[test]
fn add_emoji_to_missing_group() {
    let h = harness();
    let writes = h.backend.write_count();
    assert!(!h.mb.store.add_emoji_to_group("nope", emoji("e"), None));
    assert_eq!(h.backend.write_count(), writes);
}

#[test]
fn add_and_remove_group() {
    let h = harness();
    assert!(h.mb.store.add_group(group("a", 0)));
    assert!(!h.mb.store.add_group(group("a", 3)));
    assert_eq!(stored(&h.backend).emoji_groups.len(), 1);

    h.mb.icons.cache_group_icon("a", "😀", None);
    assert!(h.mb.store.remove_group("a"));
    assert!(!h.mb.store.remove_group("a"));
    assert!(h.mb.icons.get_cached_group_icon("a").is_none());
    assert!(stored(&h.backend).emoji_groups.is_empty());
}

#[test]
fn remove_emoji() {
    let h = harness();
    h.mb.store.add_group(group("g", 3));

    assert!(h.mb.store.remove_emoji_from_group("g", "g-1"));
    assert!(!h.mb.store.remove_emoji_from_group("g", "g-1"));
    assert!(!h.mb.store.remove_emoji_from_group("x", "g-0"));

    let g = h.mb.store.find_group_by_uuid("g").unwrap();
    assert_eq!(emoji_ids(&g), vec!["g-0", "g-2"]);
}

#[test]
fn move_between_groups() {
    let h = harness();
    h.mb.store.set_emoji_groups(vec![group("a", 2), group("b", 2)]);

    assert!(h.mb.store.move_emoji_between_groups("a", "b", "a-1", Some(1)));

    let a = h.mb.store.find_group_by_uuid("a").unwrap();
    let b = h.mb.store.find_group_by_uuid("b").unwrap();
    assert_eq!(emoji_ids(&a), vec!["a-0"]);
    assert_eq!(emoji_ids(&b), vec!["b-0", "a-1", "b-1"]);

    let persisted = stored(&h.backend);
    assert_eq!(emoji_ids(&persisted.emoji_groups[1]), vec!["b-0", "a-1", "b-1"]);
}

#[test]
fn failed_move_changes_nothing() {
    let h = harness();
    h.mb.store.set_emoji_groups(vec![group("a", 2), group("b", 2)]);
    let before = h.mb.store.get_emoji_groups();
    let writes = h.backend.write_count();

    assert!(!h.mb.store.move_emoji_between_groups("a", "missing", "a-0", None));
    assert!(!h.mb.store.move_emoji_between_groups("missing", "b", "a-0", None));
    assert!(!h.mb.store.move_emoji_between_groups("a", "b", "b-0", None));

    assert_eq!(h.mb.store.get_emoji_groups(), before);
    assert_eq!(h.backend.write_count(), writes);
}

#[test]
fn move_within_same_group() {
    let h = harness();
    h.mb.store.add_group(group("a", 3));
    assert!(h.mb.store.move_emoji_between_groups("a", "a", "a-0", None));
    let a = h.mb.store.find_group_by_uuid("a").unwrap();
    assert_eq!(emoji_ids(&a), vec!["a-1", "a-2", "a-0"]);
}

#[test]
fn reorder_emojis_clamps_target() {
    let h = harness();
    h.mb.store.add_group(group("g", 4));

    assert!(h.mb.store.reorder_emoji_in_group("g", 0, 2));
    assert_eq!(
        emoji_ids(&h.mb.store.find_group_by_uuid("g").unwrap()),
        vec!["g-1", "g-2", "g-0", "g-3"]
    );

    assert!(h.mb.store.reorder_emoji_in_group("g", 0, 99));
    assert_eq!(
        emoji_ids(&h.mb.store.find_group_by_uuid("g").unwrap()),
        vec!["g-2", "g-0", "g-3", "g-1"]
    );

    assert!(!h.mb.store.reorder_emoji_in_group("g", 4, 0));
    assert!(!h.mb.store.reorder_emoji_in_group("missing", 0, 0));
}

#[test]
fn reorder_groups_in_stored_order() {
    let h = harness();
    h.mb.store
        .set_emoji_groups(vec![group("a", 0), group("b", 0), group("c", 0)]);

    assert!(h.mb.store.reorder_groups(2, 0));
    assert_eq!(group_ids(&h.mb.store.get_emoji_groups()), vec!["c", "a", "b"]);
    assert!(!h.mb.store.reorder_groups(3, 0));
    assert_eq!(group_ids(&stored(&h.backend).emoji_groups), vec!["c", "a", "b"]);
}

#[test]
fn normal_groups_skip_common_and_favourites() {
    let h = harness();
    h.mb.store.set_emoji_groups(vec![
        group(COMMON_GROUP_UUID, 0),
        EmojiGroup::with_uuid("recent", "最近使用", "🕒"),
        group("cats", 0),
        EmojiGroup::with_uuid("fav", "常用表情", "⭐"),
        group("dogs", 0),
    ]);
    assert_eq!(group_ids(&h.mb.store.get_normal_groups()), vec!["cats", "dogs"]);
}

#[test]
fn find_emoji_reports_owner() {
    let h = harness();
    h.mb.store.add_group(group("g", 2));
    h.mb.store.add_ungrouped(emoji("loose"));

    let found = h.mb.store.find_emoji_by_uuid("g-1").unwrap();
    assert_eq!(found.group_uuid, "g");
    assert_eq!(found.emoji.uuid, "g-1");
    assert!(h.mb.store.find_emoji_by_uuid("loose").unwrap().is_ungrouped());
    assert!(h.mb.store.find_emoji_by_uuid("ghost").is_none());
}

#[test]
fn update_icons_broadcasts_and_rewrites_common() {
    let h = harness();
    h.mb.store
        .set_emoji_groups(vec![group(COMMON_GROUP_UUID, 1), group("g", 0)]);
    h.mb.icons.cache_group_icon("g", "😀", None);

    let applied = h.mb.store.update_multiple_group_icons(&[
        IconUpdate::new(COMMON_GROUP_UUID, "⭐"),
        IconUpdate::new("g", "https://cdn.example/g.png"),
        IconUpdate::new("missing", "x"),
    ]);

    assert_eq!(applied, 2);
    assert_eq!(
        *h.comms.icons.lock(),
        vec![
            (COMMON_GROUP_UUID.to_string(), "⭐".to_string()),
            ("g".to_string(), "https://cdn.example/g.png".to_string()),
        ]
    );
    assert_eq!(h.adapter().load_common_group().unwrap().icon, "⭐");
    assert!(h.mb.icons.get_cached_group_icon("g").is_none());
    assert_eq!(stored(&h.backend).emoji_groups[1].icon, "https://cdn.example/g.png");
}

#[test]
fn update_single_icon() {
    let h = harness();
    h.mb.store.add_group(group("g", 0));
    assert!(h.mb.store.update_group_icon("g", "🐱"));
    assert!(!h.mb.store.update_group_icon("nope", "🐱"));
    assert_eq!(h.mb.store.find_group_by_uuid("g").unwrap().icon, "🐱");
    // Only the common group has a sub-key copy.
    assert!(h.adapter().load_common_group().is_none());
}
