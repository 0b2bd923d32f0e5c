//! Ungrouped list: persistence, sub-key copy and broadcasts.

use crate::common::*;
use mojibox::{Mojibox, UngroupedEmoji};
use std::sync::Arc;

#[test]
fn add_stamps_and_syncs() {
    let h = harness();
    assert!(h.mb.store.add_ungrouped(emoji("a")));
    assert!(!h.mb.store.add_ungrouped(emoji("a")));

    let list = h.mb.store.get_ungrouped();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].added_at, T0);

    assert_eq!(stored(&h.backend).ungrouped, list);
    assert_eq!(h.adapter().load_ungrouped(), Some(list.clone()));
    assert_eq!(*h.comms.ungrouped.lock(), vec![list]);
}

#[test]
fn remove_and_replace() {
    let h = harness();
    h.mb.store.add_ungrouped(emoji("a"));
    h.mb.store.add_ungrouped(emoji("b"));

    assert!(h.mb.store.remove_ungrouped_by_uuid("a"));
    assert!(!h.mb.store.remove_ungrouped_by_uuid("a"));
    assert_eq!(h.adapter().load_ungrouped().unwrap().len(), 1);

    let replacement = vec![UngroupedEmoji::new(emoji("z"), 5)];
    h.mb.store.set_ungrouped_emojis(replacement.clone());
    assert_eq!(h.mb.store.get_ungrouped(), replacement);
    assert_eq!(stored(&h.backend).ungrouped, replacement);
    assert_eq!(h.comms.ungrouped.lock().len(), 4);
}

#[test]
fn move_into_ungrouped() {
    let h = harness();
    h.mb.store.add_group(group("g", 2));
    h.clock.set(T0 + 500);

    assert!(h.mb.store.move_emoji_to_ungrouped("g", "g-0"));
    assert!(!h.mb.store.move_emoji_to_ungrouped("g", "g-0"));

    let g = h.mb.store.find_group_by_uuid("g").unwrap();
    assert_eq!(emoji_ids(&g), vec!["g-1"]);
    let list = h.mb.store.get_ungrouped();
    assert_eq!(list[0].uuid(), "g-0");
    assert_eq!(list[0].added_at, T0 + 500);
    assert_eq!(h.adapter().load_ungrouped(), Some(list));
}

#[test]
fn move_into_ungrouped_rejects_uuid_already_there() {
    let h = harness();
    h.mb.store.add_group(group("g", 1));
    h.mb.store.add_emoji_to_group("g", emoji("dup"), None);
    h.mb.store.add_ungrouped(emoji("dup"));
    let broadcasts = h.comms.ungrouped.lock().len();

    assert!(!h.mb.store.move_emoji_to_ungrouped("g", "dup"));

    let g = h.mb.store.find_group_by_uuid("g").unwrap();
    assert_eq!(emoji_ids(&g), vec!["g-0", "dup"]);
    assert_eq!(h.mb.store.get_ungrouped().len(), 1);
    assert_eq!(stored(&h.backend).ungrouped.len(), 1);
    assert_eq!(h.comms.ungrouped.lock().len(), broadcasts);
}

#[test]
fn move_out_of_ungrouped() {
    let h = harness();
    h.mb.store.add_group(group("g", 2));
    h.mb.store.add_ungrouped(emoji("loose"));

    assert!(!h.mb.store.move_emoji_from_ungrouped("loose", "missing", None));
    assert_eq!(h.mb.store.get_ungrouped().len(), 1);

    assert!(h.mb.store.move_emoji_from_ungrouped("loose", "g", Some(1)));
    assert!(h.mb.store.get_ungrouped().is_empty());
    assert_eq!(
        emoji_ids(&h.mb.store.find_group_by_uuid("g").unwrap()),
        vec!["g-0", "loose", "g-1"]
    );

    let raw = h.backend.get_raw_payload();
    assert!(!raw.contains("addedAt"));
    assert_eq!(h.adapter().load_ungrouped(), Some(vec![]));
}

#[test]
fn sub_key_and_broadcast_failures_do_not_undo_save() {
    init_tracing();
    let backend = FaultyBackend::default();
    backend.fail_writes_to("ungrouped-emojis");
    let mb = Mojibox::builder()
        .backend(Arc::new(backend.clone()))
        .communication(Arc::new(FailingComms))
        .open()
        .unwrap();

    assert!(mb.store.add_ungrouped(emoji("a")));

    assert_eq!(mb.store.get_ungrouped().len(), 1);
    assert_eq!(stored(&backend.inner).ungrouped.len(), 1);
    assert!(mb.store.settings().storage().load_ungrouped().is_none());

    backend.heal();
    assert!(mb.store.remove_ungrouped_by_uuid("a"));
    assert_eq!(mb.store.settings().storage().load_ungrouped(), Some(vec![]));
}

#[test]
fn payload_failure_keeps_memory_state() {
    init_tracing();
    let backend = FaultyBackend::default();
    backend.fail_writes_to("emojiExtensionPayload");
    let mb = Mojibox::builder()
        .backend(Arc::new(backend.clone()))
        .open()
        .unwrap();

    assert!(mb.store.add_ungrouped(emoji("a")));
    assert_eq!(mb.store.get_ungrouped().len(), 1);
    assert!(backend.inner.get_raw_payload_opt().is_none());
    // The sub-key is written independently of the payload.
    assert_eq!(mb.store.settings().storage().load_ungrouped().unwrap().len(), 1);
}

trait RawPayload {
    fn get_raw_payload_opt(&self) -> Option<String>;

    fn get_raw_payload(&self) -> String {
        self.get_raw_payload_opt().expect("payload written")
    }
}

impl RawPayload for mojibox::MemoryBackend {
    fn get_raw_payload_opt(&self) -> Option<String> {
        use mojibox::KeyValueBackend;
        self.get("emojiExtensionPayload").unwrap()
    }
}
