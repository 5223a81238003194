//! Metrics System
//!
//! Provides a small metrics layer for the cache and the document manager using
//! BTreeMap-based reporting. Each component tracks its own counters while
//! implementing the common [`CacheMetrics`] trait.
//!
//! BTreeMap is used instead of HashMap so that reported metrics always come
//! out in the same order, which keeps test assertions and simulator output
//! reproducible.

use std::collections::BTreeMap;

pub mod lru;
pub mod manager;

pub use lru::LruCacheMetrics;
pub use manager::ManagerMetrics;

/// Counters common to every recency-ordered cache.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CoreCacheMetrics {
    /// Total number of lookups (`get`) made against the cache
    pub requests: u64,

    /// Number of lookups that found the key resident
    pub cache_hits: u64,

    /// Number of new keys written into the cache
    pub insertions: u64,

    /// Number of writes that replaced the value of a resident key
    pub updates: u64,

    /// Number of entries evicted because the cache was at capacity
    pub evictions: u64,

    /// Number of entries currently resident
    pub resident: u64,

    /// Maximum number of resident entries
    pub capacity: u64,
}

impl CoreCacheMetrics {
    /// Creates a new CoreCacheMetrics instance for a cache of `capacity` entries
    pub fn new(capacity: u64) -> Self {
        Self {
            capacity,
            ..Default::default()
        }
    }

    /// Records a lookup that found the key resident
    pub fn record_hit(&mut self) {
        self.requests += 1;
        self.cache_hits += 1;
    }

    /// Records a lookup that did not find the key
    ///
    /// Misses are derived as `requests - cache_hits`.
    pub fn record_miss(&mut self) {
        self.requests += 1;
    }

    /// Records a write of a key that was not resident
    pub fn record_insertion(&mut self) {
        self.insertions += 1;
        self.resident += 1;
    }

    /// Records a write that replaced a resident value in place
    pub fn record_update(&mut self) {
        self.updates += 1;
    }

    /// Records the eviction of the least recently used entry
    pub fn record_eviction(&mut self) {
        self.evictions += 1;
        self.resident = self.resident.saturating_sub(1);
    }

    /// Records an explicit removal (not counted as an eviction)
    pub fn record_removal(&mut self) {
        self.resident = self.resident.saturating_sub(1);
    }

    /// Number of lookups that missed
    pub fn cache_misses(&self) -> u64 {
        self.requests - self.cache_hits
    }

    /// Fraction of lookups served from the cache, or 0.0 with no lookups
    pub fn hit_rate(&self) -> f64 {
        if self.requests > 0 {
            self.cache_hits as f64 / self.requests as f64
        } else {
            0.0
        }
    }

    /// Fraction of lookups that missed, or 0.0 with no lookups
    pub fn miss_rate(&self) -> f64 {
        if self.requests > 0 {
            self.cache_misses() as f64 / self.requests as f64
        } else {
            0.0
        }
    }

    /// How full the cache is relative to its capacity
    pub fn utilization(&self) -> f64 {
        if self.capacity > 0 {
            self.resident as f64 / self.capacity as f64
        } else {
            0.0
        }
    }

    /// Convert core metrics to a BTreeMap for reporting
    pub fn to_btreemap(&self) -> BTreeMap<String, f64> {
        let mut metrics = BTreeMap::new();

        metrics.insert("cache_hits".to_string(), self.cache_hits as f64);
        metrics.insert("cache_misses".to_string(), self.cache_misses() as f64);
        metrics.insert("evictions".to_string(), self.evictions as f64);
        metrics.insert("insertions".to_string(), self.insertions as f64);
        metrics.insert("requests".to_string(), self.requests as f64);
        metrics.insert("updates".to_string(), self.updates as f64);

        metrics.insert("hit_rate".to_string(), self.hit_rate());
        metrics.insert("miss_rate".to_string(), self.miss_rate());

        metrics.insert("resident".to_string(), self.resident as f64);
        metrics.insert("capacity".to_string(), self.capacity as f64);
        metrics.insert("utilization".to_string(), self.utilization());

        metrics
    }
}

/// Uniform metrics reporting for the cache and the document manager
pub trait CacheMetrics {
    /// Returns all metrics as key-value pairs in deterministic order
    fn metrics(&self) -> BTreeMap<String, f64>;

    /// Short name identifying the reporting component (e.g. "LRU")
    fn component_name(&self) -> &'static str;
}
