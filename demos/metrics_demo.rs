//! Document Manager Metrics Demonstration
//!
//! Runs a small workload against a manager with a tiny cache and prints the
//! manager and cache metrics, showing how lookups split between cache hits
//! and store fallbacks once evictions start.
//!
//! Run with: cargo run --example metrics_demo

use docstore::{
    config::DocumentManagerConfig, metrics::CacheMetrics, Author, Document, DocumentManager,
    LruCache, SearchRequest, SequentialGenerator,
};
use std::collections::BTreeMap;
use std::num::NonZeroUsize;

fn main() {
    println!("Document Manager Metrics");
    println!("========================\n");

    let capacity = NonZeroUsize::new(3).unwrap();
    println!("Cache capacity: {} documents", capacity.get());
    println!("Workload: save 5, look up old and new, search, look up unknown\n");

    let manager = run_workload(capacity);
    let cache = run_lru_workload(capacity);

    print_metrics("DocumentManager", &manager);
    print_metrics("Standalone LRU", &cache);

    println!("\nCached ids, most recent first: {:?}", manager.cached_ids());
    demonstrate_deterministic_ordering(&manager);
}

fn run_workload(capacity: NonZeroUsize) -> DocumentManager<SequentialGenerator> {
    let mut manager = DocumentManager::init(
        DocumentManagerConfig {
            cache_size: capacity,
        },
        SequentialGenerator::new("doc-"),
    );
    let author = Author::new("author-1", "John Doe");

    for title in ["apple", "banana", "cherry", "date", "elderberry"] {
        manager
            .save(Document::new(title, format!("about {title}"), author.clone()))
            .unwrap();
    }

    // doc-5 is cached, doc-1 was evicted and comes from the store
    manager.find_by_id("doc-5");
    manager.find_by_id("doc-1");
    manager.find_by_id("doc-1");
    manager.find_by_id("unknown");

    let request = SearchRequest::new().with_contents(["an"]);
    let found = manager.search(&request);
    println!("Search for content containing \"an\": {} match(es)", found.len());

    manager
}

fn run_lru_workload(capacity: NonZeroUsize) -> LruCache<&'static str, i32> {
    let mut cache = LruCache::new(capacity);
    cache.put("apple", 1);
    cache.put("banana", 2);
    cache.put("cherry", 3);
    cache.get("apple");
    cache.get("apple");
    cache.get("missing");
    cache.put("date", 4);
    cache
}

fn print_metrics(label: &str, component: &dyn CacheMetrics) {
    println!("\n{label} ({})", component.component_name());
    println!("{}", "-".repeat(40));
    for (name, value) in component.metrics() {
        println!("  {:<28} {}", name, format_value(&name, value));
    }
}

fn format_value(name: &str, value: f64) -> String {
    if name.ends_with("rate") || name.ends_with("utilization") {
        format!("{:.1}%", value * 100.0)
    } else {
        format!("{value:.0}")
    }
}

fn demonstrate_deterministic_ordering(component: &dyn CacheMetrics) {
    let metrics: BTreeMap<String, f64> = component.metrics();
    println!("\nMetric keys are reported in a stable, alphabetical order:");
    for (i, key) in metrics.keys().take(5).enumerate() {
        println!("  {}. {}", i + 1, key);
    }
}
