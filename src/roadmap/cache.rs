use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::time::Instant;

use super::item::RoadmapItem;

/// How long a fetched result stays servable (5 minutes).
pub const CACHE_TTL: Duration = Duration::from_secs(5 * 60);

/// Maximum number of distinct filter keys held at once.
pub const CACHE_CAPACITY: usize = 50;

/// Key used for the unfiltered collection.
pub const UNFILTERED_KEY: &str = "__all__";

#[derive(Debug, Clone)]
struct CacheEntry {
    items: Rc<Vec<RoadmapItem>>,
    fetched_at: Instant,
    fetched_at_utc: DateTime<Utc>,
}

#[derive(Debug, Default)]
struct Entries {
    map: HashMap<String, CacheEntry>,
    /// Keys in first-insertion order; replacing a key keeps its slot.
    order: VecDeque<String>,
}

/// Bounded, time-expiring store of upstream results keyed by filter.
///
/// Single-threaded: the server runs every request on one `LocalSet`, and no
/// borrow of the inner state is held across an `.await`.
#[derive(Debug)]
pub struct ResultCache {
    entries: RefCell<Entries>,
    ttl: Duration,
    capacity: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStats {
    pub size: usize,
    pub entries: Vec<CacheEntryStats>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheEntryStats {
    pub key: String,
    pub age_seconds: u64,
    pub item_count: usize,
    pub fetched_at: String,
    pub expired: bool,
}

impl Default for ResultCache {
    fn default() -> Self {
        Self::new()
    }
}

impl ResultCache {
    pub fn new() -> Self {
        Self::with_limits(CACHE_TTL, CACHE_CAPACITY)
    }

    pub fn with_limits(ttl: Duration, capacity: usize) -> Self {
        Self {
            entries: RefCell::new(Entries::default()),
            ttl,
            capacity,
        }
    }

    /// Return the cached items for `key` if present and younger than the TTL.
    ///
    /// Expired entries are reported as a miss but left in place; the next
    /// `store` for the same key replaces them.
    pub fn lookup(&self, key: &str) -> Option<Rc<Vec<RoadmapItem>>> {
        let entries = self.entries.borrow();
        let entry = entries.map.get(key)?;
        if entry.fetched_at.elapsed() < self.ttl {
            Some(Rc::clone(&entry.items))
        } else {
            None
        }
    }

    /// Insert or replace the entry for `key`, evicting the oldest-inserted
    /// key when over capacity.
    pub fn store(&self, key: &str, items: Rc<Vec<RoadmapItem>>) {
        let mut entries = self.entries.borrow_mut();
        let entry = CacheEntry {
            items,
            fetched_at: Instant::now(),
            fetched_at_utc: Utc::now(),
        };

        if entries.map.insert(key.to_string(), entry).is_none() {
            entries.order.push_back(key.to_string());
        }

        if entries.map.len() > self.capacity {
            if let Some(oldest) = entries.order.pop_front() {
                entries.map.remove(&oldest);
                tracing::debug!(key = %oldest, "evicted cache entry");
            }
        }
    }

    /// Drop every entry, returning how many were held.
    pub fn clear(&self) -> usize {
        let mut entries = self.entries.borrow_mut();
        let count = entries.map.len();
        entries.map.clear();
        entries.order.clear();
        count
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot of every entry in insertion order.
    pub fn stats(&self) -> CacheStats {
        let entries = self.entries.borrow();
        let stats = entries
            .order
            .iter()
            .filter_map(|key| {
                let entry = entries.map.get(key)?;
                let age = entry.fetched_at.elapsed();
                Some(CacheEntryStats {
                    key: key.clone(),
                    age_seconds: age.as_secs(),
                    item_count: entry.items.len(),
                    fetched_at: entry.fetched_at_utc.to_rfc3339(),
                    expired: age >= self.ttl,
                })
            })
            .collect();

        CacheStats {
            size: entries.map.len(),
            entries: stats,
        }
    }
}
