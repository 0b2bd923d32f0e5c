//! Icon Cache Integration Tests
//!
//! TTL behaviour and preloading through the store.

#[path = "../common/mod.rs"]
mod common;

use common::*;
use mojibox::{EmojiGroup, IconCache, ManualClock, Mojibox};
use std::sync::Arc;
use std::time::Duration;

const FIVE_MINUTES: Duration = Duration::from_secs(300);

fn store_with_fetcher(fetcher: Arc<CountingFetcher>) -> (Mojibox, Arc<ManualClock>) {
    init_tracing();
    let clock = Arc::new(ManualClock::new(T0));
    let mb = Mojibox::builder()
        .clock(clock.clone())
        .icon_fetcher(fetcher)
        .open()
        .unwrap();
    mb.store.set_emoji_groups(vec![
        EmojiGroup::with_uuid("glyph", "Glyph", "🐱"),
        EmojiGroup::with_uuid("remote", "Remote", "https://cdn.example/remote.png"),
        EmojiGroup::with_uuid("inline", "Inline", "data:image/png;base64,aWNvbg=="),
    ]);
    (mb, clock)
}

#[test]
fn entry_expires_after_five_minutes() {
    let clock = Arc::new(ManualClock::new(T0));
    let cache = IconCache::new(FIVE_MINUTES, clock.clone());
    cache.cache_group_icon("g", "https://cdn.example/g.png", Some(vec![1, 2, 3]));

    clock.advance(Duration::from_secs(299));
    let hit = cache.get_cached_group_icon("g").unwrap();
    assert_eq!(hit.url, "https://cdn.example/g.png");
    assert_eq!(hit.blob.as_deref(), Some(&[1u8, 2, 3][..]));

    clock.advance(Duration::from_secs(2));
    assert!(cache.get_cached_group_icon("g").is_none());
    assert!(cache.is_empty());
}

#[test]
fn preload_resolves_each_icon_kind() {
    let fetcher = Arc::new(CountingFetcher::default());
    let (mb, _) = store_with_fetcher(fetcher.clone());

    let report = mb.store.preload_group_icons(&["glyph", "remote", "inline", "ghost"]);

    assert_eq!((report.glyphs, report.fetched, report.failed), (1, 2, 0));
    assert_eq!(report.cached(), 3);
    assert_eq!(*fetcher.calls.lock(), vec!["https://cdn.example/remote.png".to_string()]);

    assert!(mb.icons.get_cached_group_icon("glyph").unwrap().blob.is_none());
    assert_eq!(
        mb.icons.get_cached_group_icon("inline").unwrap().blob.as_deref(),
        Some(&b"icon"[..])
    );
}

#[test]
fn preload_skips_fresh_entries_and_refetches_stale() {
    let fetcher = Arc::new(CountingFetcher::default());
    let (mb, clock) = store_with_fetcher(fetcher.clone());

    mb.store.preload_group_icons(&["remote"]);
    let again = mb.store.preload_group_icons(&["remote"]);
    assert_eq!(again.skipped, 1);
    assert_eq!(fetcher.call_count(), 1);

    clock.advance(FIVE_MINUTES + Duration::from_millis(1));
    mb.store.preload_group_icons(&["remote"]);
    assert_eq!(fetcher.call_count(), 2);
}

#[test]
fn failed_fetch_does_not_stop_batch() {
    let fetcher = Arc::new(CountingFetcher::failing());
    let (mb, _) = store_with_fetcher(fetcher);

    let report = mb.store.preload_group_icons(&["remote", "glyph", "inline"]);
    assert_eq!(report.failed, 1);
    assert_eq!(report.cached(), 2);
    assert!(mb.icons.get_cached_group_icon("remote").is_none());
}

#[test]
fn icon_update_drops_cached_entry() {
    let fetcher = Arc::new(CountingFetcher::default());
    let (mb, _) = store_with_fetcher(fetcher.clone());
    mb.store.preload_group_icons(&["remote"]);

    assert!(mb.store.update_group_icon("remote", "https://cdn.example/v2.png"));
    assert!(mb.icons.get_cached_group_icon("remote").is_none());

    mb.store.preload_group_icons(&["remote"]);
    assert_eq!(
        fetcher.calls.lock().last().map(String::as_str),
        Some("https://cdn.example/v2.png")
    );
}

#[test]
fn purge_and_clear() {
    let clock = Arc::new(ManualClock::new(T0));
    let cache = IconCache::new(FIVE_MINUTES, clock.clone());
    cache.cache_group_icon("a", "🐱", None);
    clock.advance(Duration::from_secs(200));
    cache.cache_group_icon("b", "🐶", None);
    clock.advance(Duration::from_secs(200));

    assert_eq!(cache.purge_expired(), 1);
    assert_eq!(cache.len(), 1);
    cache.clear_icon_cache(None);
    assert!(cache.is_empty());
}
