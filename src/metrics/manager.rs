//! Document Manager Metrics
//!
//! Counters describing how the manager splits work between its cache and
//! its backing store.

use std::collections::BTreeMap;

/// Counters maintained by [`DocumentManager`](crate::DocumentManager).
///
/// The cache's own counters are reported alongside these, prefixed with
/// `cache_`, by the manager's [`CacheMetrics`](super::CacheMetrics) impl.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ManagerMetrics {
    /// Successful saves (inserts and updates)
    pub saves: u64,
    /// Saves rejected because no document was supplied
    pub rejected_saves: u64,
    /// Identifiers handed out by the id generator
    pub generated_ids: u64,
    /// Calls to `find_by_id`
    pub lookups: u64,
    /// Lookups answered from the cache
    pub lookup_cache_hits: u64,
    /// Lookups that missed the cache and were answered by the store
    pub store_fallbacks: u64,
    /// Lookups for identifiers the store does not hold
    pub not_found: u64,
    /// Calls to `search`
    pub searches: u64,
    /// Documents evaluated against search predicates
    pub documents_scanned: u64,
    /// Documents returned by searches
    pub documents_matched: u64,
}

impl ManagerMetrics {
    /// Fraction of lookups answered without touching the store
    pub fn lookup_hit_rate(&self) -> f64 {
        if self.lookups > 0 {
            self.lookup_cache_hits as f64 / self.lookups as f64
        } else {
            0.0
        }
    }

    /// Converts manager metrics to a BTreeMap for reporting
    pub fn to_btreemap(&self) -> BTreeMap<String, f64> {
        let mut metrics = BTreeMap::new();
        metrics.insert("saves".to_string(), self.saves as f64);
        metrics.insert("rejected_saves".to_string(), self.rejected_saves as f64);
        metrics.insert("generated_ids".to_string(), self.generated_ids as f64);
        metrics.insert("lookups".to_string(), self.lookups as f64);
        metrics.insert(
            "lookup_cache_hits".to_string(),
            self.lookup_cache_hits as f64,
        );
        metrics.insert("lookup_hit_rate".to_string(), self.lookup_hit_rate());
        metrics.insert("store_fallbacks".to_string(), self.store_fallbacks as f64);
        metrics.insert("not_found".to_string(), self.not_found as f64);
        metrics.insert("searches".to_string(), self.searches as f64);
        metrics.insert(
            "documents_scanned".to_string(),
            self.documents_scanned as f64,
        );
        metrics.insert(
            "documents_matched".to_string(),
            self.documents_matched as f64,
        );
        metrics
    }
}
