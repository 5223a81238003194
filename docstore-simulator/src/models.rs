//! Data models for workload simulation.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::time::Duration;

/// Operation performed by a workload request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Op {
    /// Save the document `key` (insert or update)
    Save,
    /// Look up the document `key`
    Find,
    /// Search for documents by `author`
    Search,
}

impl Op {
    pub fn as_str(&self) -> &'static str {
        match self {
            Op::Save => "save",
            Op::Find => "find",
            Op::Search => "search",
        }
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of a workload file: `op,key,title,content,author`.
///
/// Unused columns are empty: a find only needs `key`, a search only `author`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    pub op: Op,
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub author: String,
}

impl Request {
    pub fn save(
        key: impl Into<String>,
        title: impl Into<String>,
        content: impl Into<String>,
        author: impl Into<String>,
    ) -> Self {
        Self {
            op: Op::Save,
            key: key.into(),
            title: title.into(),
            content: content.into(),
            author: author.into(),
        }
    }

    pub fn find(key: impl Into<String>) -> Self {
        Self {
            op: Op::Find,
            key: key.into(),
            title: String::new(),
            content: String::new(),
            author: String::new(),
        }
    }

    pub fn search(author: impl Into<String>) -> Self {
        Self {
            op: Op::Search,
            key: String::new(),
            title: String::new(),
            content: String::new(),
            author: author.into(),
        }
    }
}

/// Manager execution mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ManagerMode {
    /// Plain `DocumentManager` driven from one thread
    Sequential,
    /// `ConcurrentDocumentManager` shared by worker threads
    Concurrent,
}

impl ManagerMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ManagerMode::Sequential => "Sequential",
            ManagerMode::Concurrent => "Concurrent",
        }
    }
}

impl fmt::Display for ManagerMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifies one simulation run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SimulationKey {
    pub cache_size: NonZeroUsize,
    pub mode: ManagerMode,
}

impl SimulationKey {
    pub fn new(cache_size: NonZeroUsize, mode: ManagerMode) -> Self {
        Self { cache_size, mode }
    }
}

impl fmt::Display for SimulationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.cache_size, self.mode)
    }
}

/// Configuration for a simulation run
#[derive(Debug, Clone)]
pub struct SimulationConfig {
    /// Workload file; `None` replays a generated workload
    pub input: Option<PathBuf>,
    /// One run per cache size
    pub cache_sizes: Vec<NonZeroUsize>,
    /// Modes to run each cache size in
    pub modes: Vec<ManagerMode>,
    /// Worker threads for concurrent runs
    pub threads: usize,
}

/// Counters collected from one run
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RunStats {
    pub saves: u64,
    pub lookups: u64,
    pub cache_hits: u64,
    pub store_fallbacks: u64,
    pub not_found: u64,
    pub searches: u64,
    pub documents_matched: u64,
    pub evictions: u64,
    pub stored_documents: u64,
    pub elapsed: Duration,
    pub latency: LatencyStats,
}

impl RunStats {
    /// Percentage of lookups answered by the cache
    pub fn hit_rate(&self) -> f64 {
        if self.lookups > 0 {
            (self.cache_hits as f64 / self.lookups as f64) * 100.0
        } else {
            0.0
        }
    }

    /// Percentage of lookups that went to the store and found the document
    pub fn fallback_rate(&self) -> f64 {
        if self.lookups > 0 {
            (self.store_fallbacks as f64 / self.lookups as f64) * 100.0
        } else {
            0.0
        }
    }
}

/// Latency statistics for one operation type
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OpLatencyStats {
    /// Total time spent (nanoseconds)
    pub total_ns: u64,
    pub count: u64,
    pub min_ns: u64,
    pub max_ns: u64,
    pub p50_ns: u64,
    pub p99_ns: u64,
}

impl OpLatencyStats {
    pub fn avg_ns(&self) -> f64 {
        if self.count > 0 {
            self.total_ns as f64 / self.count as f64
        } else {
            0.0
        }
    }

    pub fn ops_per_sec(&self) -> f64 {
        if self.total_ns > 0 {
            (self.count as f64 * 1_000_000_000.0) / self.total_ns as f64
        } else {
            0.0
        }
    }
}

/// Latency statistics for all manager operations
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LatencyStats {
    pub save: OpLatencyStats,
    pub find: OpLatencyStats,
    pub search: OpLatencyStats,
}

/// Results of a simulation
#[derive(Debug)]
pub struct SimulationResult {
    pub runs: Vec<(SimulationKey, RunStats)>,
    pub total_requests: usize,
    pub unique_keys: usize,
    pub duration: Duration,
}

/// CSV export row for simulation results
#[derive(Debug, Serialize)]
pub struct CsvResultRow {
    pub cache_size: usize,
    pub mode: String,
    pub saves: u64,
    pub lookups: u64,
    pub cache_hits: u64,
    pub store_fallbacks: u64,
    pub not_found: u64,
    pub hit_rate: f64,
    pub searches: u64,
    pub documents_matched: u64,
    pub evictions: u64,
    pub stored_documents: u64,
    pub elapsed_ms: u128,
    pub save_avg_ns: f64,
    pub find_avg_ns: f64,
    pub find_p99_ns: u64,
    pub search_avg_ns: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_rate_with_no_lookups() {
        let stats = RunStats::default();
        assert_eq!(stats.hit_rate(), 0.0);
        assert_eq!(stats.fallback_rate(), 0.0);
    }

    #[test]
    fn test_hit_rate() {
        let stats = RunStats {
            lookups: 4,
            cache_hits: 3,
            store_fallbacks: 1,
            ..RunStats::default()
        };
        assert_eq!(stats.hit_rate(), 75.0);
        assert_eq!(stats.fallback_rate(), 25.0);
    }

    #[test]
    fn test_simulation_key_ordering() {
        let small = SimulationKey::new(NonZeroUsize::new(10).unwrap(), ManagerMode::Concurrent);
        let large = SimulationKey::new(NonZeroUsize::new(100).unwrap(), ManagerMode::Sequential);
        assert!(small < large);
        assert_eq!(small.to_string(), "10-Concurrent");
    }
}
