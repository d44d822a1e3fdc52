//! Result cache expiry, capacity, and bookkeeping.
//!
//! Time is paused so TTL boundaries are exact.

use std::rc::Rc;
use std::time::Duration;

use roadmap_mcp_server::roadmap::cache::{CACHE_CAPACITY, CACHE_TTL};
use roadmap_mcp_server::roadmap::{ResultCache, RoadmapItem};
use serde_json::json;

fn items(titles: &[&str]) -> Rc<Vec<RoadmapItem>> {
    let items: Vec<RoadmapItem> = titles
        .iter()
        .enumerate()
        .map(|(i, title)| serde_json::from_value(json!({ "id": i, "title": title })).unwrap())
        .collect();
    Rc::new(items)
}

#[tokio::test(start_paused = true)]
async fn lookup_hits_until_ttl_elapses() {
    let cache = ResultCache::new();
    let stored = items(&["Copilot in Teams"]);
    cache.store("status eq 'Launched'", Rc::clone(&stored));

    tokio::time::advance(CACHE_TTL - Duration::from_secs(1)).await;
    let hit = cache.lookup("status eq 'Launched'").expect("fresh entry should hit");
    assert_eq!(*hit, *stored);

    tokio::time::advance(Duration::from_secs(1)).await;
    assert!(cache.lookup("status eq 'Launched'").is_none(), "entry at TTL is a miss");
}

#[tokio::test(start_paused = true)]
async fn expired_entry_stays_until_replaced() {
    let cache = ResultCache::new();
    cache.store("k", items(&["old"]));
    tokio::time::advance(CACHE_TTL).await;

    assert!(cache.lookup("k").is_none());
    assert_eq!(cache.len(), 1, "lookup does not delete expired entries");

    cache.store("k", items(&["new"]));
    let hit = cache.lookup("k").unwrap();
    assert_eq!(hit[0].title.as_deref(), Some("new"));
    assert_eq!(cache.len(), 1);
}

#[tokio::test]
async fn capacity_evicts_first_inserted_key() {
    let cache = ResultCache::new();
    for i in 0..=CACHE_CAPACITY {
        cache.store(&format!("key-{i}"), items(&["x"]));
    }

    assert_eq!(cache.len(), CACHE_CAPACITY);
    assert!(cache.lookup("key-0").is_none(), "first key should be evicted");
    assert!(cache.lookup("key-1").is_some());
    assert!(cache.lookup(&format!("key-{CACHE_CAPACITY}")).is_some());
}

#[tokio::test]
async fn eviction_follows_insertion_not_access() {
    let cache = ResultCache::with_limits(CACHE_TTL, 2);
    cache.store("a", items(&["a"]));
    cache.store("b", items(&["b"]));

    // Reading and re-storing `a` keeps its original slot.
    assert!(cache.lookup("a").is_some());
    cache.store("a", items(&["a2"]));

    cache.store("c", items(&["c"]));
    assert!(cache.lookup("a").is_none());
    assert!(cache.lookup("b").is_some());
    assert!(cache.lookup("c").is_some());
}

#[tokio::test]
async fn clear_reports_prior_size() {
    let cache = ResultCache::new();
    cache.store("a", items(&["a"]));
    cache.store("b", items(&["b"]));

    assert_eq!(cache.clear(), 2);
    assert!(cache.is_empty());
    assert_eq!(cache.clear(), 0);
}

#[tokio::test(start_paused = true)]
async fn stats_report_age_in_insertion_order() {
    let cache = ResultCache::new();
    cache.store("first", items(&["a", "b"]));
    tokio::time::advance(Duration::from_secs(120)).await;
    cache.store("second", items(&["c"]));

    let stats = cache.stats();
    assert_eq!(stats.size, 2);
    assert_eq!(stats.entries[0].key, "first");
    assert_eq!(stats.entries[0].age_seconds, 120);
    assert_eq!(stats.entries[0].item_count, 2);
    assert!(!stats.entries[0].expired);
    assert_eq!(stats.entries[1].key, "second");
    assert_eq!(stats.entries[1].age_seconds, 0);
}
