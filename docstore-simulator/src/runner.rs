//! Replays workloads against document managers.
//!
//! Each cache size gets a fresh manager. Sequential runs drive a
//! `DocumentManager` from the calling thread. Concurrent runs share one
//! `ConcurrentDocumentManager` between worker threads, each replaying every
//! n-th request, so the interleaving (and therefore the hit rate) varies from
//! run to run.

use crate::models::{
    LatencyStats, ManagerMode, Op, OpLatencyStats, Request, RunStats, SimulationConfig,
    SimulationKey, SimulationResult,
};
use docstore::metrics::CacheMetrics;
use docstore::{Author, ConcurrentDocumentManager, Document, DocumentManager, SearchRequest};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;
use std::num::NonZeroUsize;
use std::thread;
use std::time::Instant;
use tracing::{info, warn};

const MAX_SAMPLES: usize = 5000;

/// Tracks latency for a single operation type
#[derive(Debug)]
struct OpLatencyTracker {
    total_ns: u64,
    count: u64,
    min_ns: u64,
    max_ns: u64,
    /// Reservoir for percentile calculation
    samples: Vec<u64>,
}

impl OpLatencyTracker {
    fn new() -> Self {
        Self {
            total_ns: 0,
            count: 0,
            min_ns: u64::MAX,
            max_ns: 0,
            samples: Vec::with_capacity(MAX_SAMPLES),
        }
    }

    #[inline]
    fn record(&mut self, latency_ns: u64) {
        self.total_ns += latency_ns;
        self.count += 1;
        self.min_ns = self.min_ns.min(latency_ns);
        self.max_ns = self.max_ns.max(latency_ns);

        // Algorithm R: every latency seen so far stays in the reservoir with
        // probability MAX_SAMPLES / count
        if self.samples.len() < MAX_SAMPLES {
            self.samples.push(latency_ns);
        } else {
            let slot = rand::thread_rng().gen_range(0..self.count);
            if slot < MAX_SAMPLES as u64 {
                self.samples[slot as usize] = latency_ns;
            }
        }
    }

    /// Folds another worker's tracker into this one.
    ///
    /// When the pooled reservoirs overflow, each side keeps a share of
    /// `MAX_SAMPLES` proportional to the number of latencies it recorded.
    fn merge(&mut self, other: OpLatencyTracker) {
        let total = self.count + other.count;
        if self.samples.len() + other.samples.len() > MAX_SAMPLES {
            let mut rng = rand::thread_rng();
            let weighted =
                (MAX_SAMPLES as u128 * u128::from(self.count) / u128::from(total)) as usize;
            let from_self = weighted
                .min(self.samples.len())
                .max(MAX_SAMPLES - other.samples.len().min(MAX_SAMPLES));
            let from_other = (MAX_SAMPLES - from_self).min(other.samples.len());

            let mut pooled: Vec<u64> = self
                .samples
                .choose_multiple(&mut rng, from_self)
                .copied()
                .collect();
            pooled.extend(other.samples.choose_multiple(&mut rng, from_other).copied());
            self.samples = pooled;
        } else {
            self.samples.extend(other.samples);
        }

        self.total_ns += other.total_ns;
        self.count = total;
        self.min_ns = self.min_ns.min(other.min_ns);
        self.max_ns = self.max_ns.max(other.max_ns);
    }

    fn finalize(mut self) -> OpLatencyStats {
        self.samples.sort_unstable();
        let len = self.samples.len();
        let percentile = |p: usize| {
            if len == 0 {
                0
            } else {
                self.samples[(len * p / 100).min(len - 1)]
            }
        };

        OpLatencyStats {
            total_ns: self.total_ns,
            count: self.count,
            min_ns: if self.min_ns == u64::MAX { 0 } else { self.min_ns },
            max_ns: self.max_ns,
            p50_ns: percentile(50),
            p99_ns: percentile(99),
        }
    }
}

/// Per-operation latency trackers for one worker
#[derive(Debug)]
struct LatencyTracker {
    save: OpLatencyTracker,
    find: OpLatencyTracker,
    search: OpLatencyTracker,
}

impl LatencyTracker {
    fn new() -> Self {
        Self {
            save: OpLatencyTracker::new(),
            find: OpLatencyTracker::new(),
            search: OpLatencyTracker::new(),
        }
    }

    fn record(&mut self, op: Op, latency_ns: u64) {
        match op {
            Op::Save => self.save.record(latency_ns),
            Op::Find => self.find.record(latency_ns),
            Op::Search => self.search.record(latency_ns),
        }
    }

    fn merge(&mut self, other: LatencyTracker) {
        self.save.merge(other.save);
        self.find.merge(other.find);
        self.search.merge(other.search);
    }

    fn finalize(self) -> LatencyStats {
        LatencyStats {
            save: self.save.finalize(),
            find: self.find.finalize(),
            search: self.search.finalize(),
        }
    }
}

/// Minimal surface shared by both manager flavours
trait Target {
    fn save(&mut self, document: Document);
    fn find_by_id(&mut self, id: &str) -> bool;
    fn search(&mut self, request: &SearchRequest) -> usize;
}

impl Target for DocumentManager {
    fn save(&mut self, document: Document) {
        if let Err(err) = DocumentManager::save(self, document) {
            warn!(error = %err, "save failed during replay");
        }
    }

    fn find_by_id(&mut self, id: &str) -> bool {
        DocumentManager::find_by_id(self, id).is_some()
    }

    fn search(&mut self, request: &SearchRequest) -> usize {
        DocumentManager::search(self, request).len()
    }
}

impl Target for &ConcurrentDocumentManager {
    fn save(&mut self, document: Document) {
        if let Err(err) = ConcurrentDocumentManager::save(*self, document) {
            warn!(error = %err, "save failed during replay");
        }
    }

    fn find_by_id(&mut self, id: &str) -> bool {
        ConcurrentDocumentManager::find_by_id(*self, id).is_some()
    }

    fn search(&mut self, request: &SearchRequest) -> usize {
        ConcurrentDocumentManager::search(*self, request).len()
    }
}

fn to_document(request: &Request) -> Document {
    Document::new(
        request.title.clone(),
        request.content.clone(),
        Author::new(request.author.clone(), request.author.clone()),
    )
    .with_id(request.key.clone())
}

/// Replays `requests` against `target`, timing each manager call.
fn replay<'a, T: Target>(
    target: &mut T,
    requests: impl Iterator<Item = &'a Request>,
) -> LatencyTracker {
    let mut latency = LatencyTracker::new();

    for request in requests {
        let elapsed = match request.op {
            Op::Save => {
                let document = to_document(request);
                let start = Instant::now();
                target.save(document);
                start.elapsed()
            }
            Op::Find => {
                let start = Instant::now();
                target.find_by_id(&request.key);
                start.elapsed()
            }
            Op::Search => {
                let search = SearchRequest::new().with_author_ids([request.author.clone()]);
                let start = Instant::now();
                target.search(&search);
                start.elapsed()
            }
        };
        latency.record(request.op, elapsed.as_nanos() as u64);
    }

    latency
}

fn collect_stats(component: &dyn CacheMetrics) -> RunStats {
    let metrics = component.metrics();
    let get = |name: &str| metrics.get(name).copied().unwrap_or(0.0) as u64;
    RunStats {
        saves: get("saves"),
        lookups: get("lookups"),
        cache_hits: get("lookup_cache_hits"),
        store_fallbacks: get("store_fallbacks"),
        not_found: get("not_found"),
        searches: get("searches"),
        documents_matched: get("documents_matched"),
        evictions: get("cache_evictions"),
        stored_documents: get("stored_documents"),
        ..RunStats::default()
    }
}

/// Runner for workload simulations
#[derive(Debug)]
pub struct SimulationRunner {
    config: SimulationConfig,
}

impl SimulationRunner {
    pub fn new(config: SimulationConfig) -> Self {
        Self { config }
    }

    /// Runs every configured cache size and mode over `requests`.
    pub fn run(&self, requests: &[Request]) -> SimulationResult {
        let unique_keys = requests
            .iter()
            .filter(|r| r.op != Op::Search)
            .map(|r| r.key.as_str())
            .collect::<HashSet<_>>()
            .len();

        info!(
            requests = requests.len(),
            unique_keys,
            sizes = self.config.cache_sizes.len(),
            "starting simulation"
        );

        let start = Instant::now();
        let mut runs = Vec::new();

        for &cache_size in &self.config.cache_sizes {
            for &mode in &self.config.modes {
                let key = SimulationKey::new(cache_size, mode);
                let stats = match mode {
                    ManagerMode::Sequential => Self::run_sequential(cache_size, requests),
                    ManagerMode::Concurrent => {
                        Self::run_concurrent(cache_size, requests, self.config.threads)
                    }
                };
                info!(
                    run = %key,
                    hit_rate = stats.hit_rate(),
                    evictions = stats.evictions,
                    elapsed = ?stats.elapsed,
                    "run complete"
                );
                runs.push((key, stats));
            }
        }

        SimulationResult {
            runs,
            total_requests: requests.len(),
            unique_keys,
            duration: start.elapsed(),
        }
    }

    fn run_sequential(cache_size: NonZeroUsize, requests: &[Request]) -> RunStats {
        let mut manager = DocumentManager::with_capacity(cache_size);
        let start = Instant::now();
        let latency = replay(&mut manager, requests.iter());
        let elapsed = start.elapsed();

        RunStats {
            elapsed,
            latency: latency.finalize(),
            ..collect_stats(&manager)
        }
    }

    fn run_concurrent(cache_size: NonZeroUsize, requests: &[Request], threads: usize) -> RunStats {
        let threads = threads.max(1);
        let manager = ConcurrentDocumentManager::with_capacity(cache_size);
        let start = Instant::now();

        let latency = thread::scope(|scope| {
            let handles: Vec<_> = (0..threads)
                .map(|worker| {
                    let manager = &manager;
                    scope.spawn(move || {
                        let mut target = manager;
                        replay(
                            &mut target,
                            requests.iter().skip(worker).step_by(threads),
                        )
                    })
                })
                .collect();

            let mut merged = LatencyTracker::new();
            for handle in handles {
                match handle.join() {
                    Ok(tracker) => merged.merge(tracker),
                    Err(_) => warn!("replay worker panicked"),
                }
            }
            merged
        });
        let elapsed = start.elapsed();

        RunStats {
            elapsed,
            latency: latency.finalize(),
            ..collect_stats(&manager)
        }
    }
}
