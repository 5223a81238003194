//! Concurrent Document Manager Benchmarks
//!
//! Measures `ConcurrentDocumentManager` throughput for read-heavy, write-heavy
//! and mixed access patterns across thread counts.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use docstore::config::DocumentManagerConfig;
use docstore::{Author, ConcurrentDocumentManager, Document, SearchRequest, SequentialGenerator};
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::thread;

const CACHE_SIZE: usize = 1_000;
const STORED: usize = 10_000;
const OPS_PER_THREAD: usize = 1_000;

type Manager = ConcurrentDocumentManager<SequentialGenerator>;

fn document(t: usize, i: usize) -> Document {
    Document::new(
        format!("T{t} Title {i}"),
        format!("Content {i}"),
        Author::new(format!("author-{}", i % 10), "Writer"),
    )
}

fn populated_manager() -> Arc<Manager> {
    let manager = ConcurrentDocumentManager::init(
        DocumentManagerConfig {
            cache_size: NonZeroUsize::new(CACHE_SIZE).unwrap(),
        },
        SequentialGenerator::new("doc-"),
    );
    for i in 0..STORED {
        manager.save(document(0, i)).unwrap();
    }
    Arc::new(manager)
}

/// Benchmark concurrent lookups, mostly served from the cache
fn concurrent_reads(c: &mut Criterion) {
    let mut group = c.benchmark_group("Concurrent Reads");
    let manager = populated_manager();

    for threads in [1, 2, 4, 8] {
        group.throughput(Throughput::Elements((threads * OPS_PER_THREAD) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(threads), &threads, |b, &n| {
            b.iter(|| run_concurrent_reads(Arc::clone(&manager), n, OPS_PER_THREAD));
        });
    }

    group.finish();
}

/// Benchmark concurrent saves of new documents
fn concurrent_writes(c: &mut Criterion) {
    let mut group = c.benchmark_group("Concurrent Writes");
    let manager = populated_manager();

    for threads in [1, 2, 4, 8] {
        group.throughput(Throughput::Elements((threads * OPS_PER_THREAD) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(threads), &threads, |b, &n| {
            b.iter(|| run_concurrent_writes(Arc::clone(&manager), n, OPS_PER_THREAD));
        });
    }

    group.finish();
}

/// Benchmark a mix of lookups (70%), saves (20%) and searches (10%)
fn concurrent_mixed(c: &mut Criterion) {
    let mut group = c.benchmark_group("Concurrent Mixed");
    group.sample_size(20);
    let manager = populated_manager();

    for threads in [1, 4, 8] {
        let ops = OPS_PER_THREAD / 10;
        group.throughput(Throughput::Elements((threads * ops) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(threads), &threads, |b, &n| {
            b.iter(|| run_concurrent_mixed(Arc::clone(&manager), n, ops));
        });
    }

    group.finish();
}

fn run_concurrent_reads(manager: Arc<Manager>, num_threads: usize, ops_per_thread: usize) {
    let mut handles = Vec::with_capacity(num_threads);
    for t in 0..num_threads {
        let manager = Arc::clone(&manager);
        handles.push(thread::spawn(move || {
            for i in 0..ops_per_thread {
                let n = STORED - (t * ops_per_thread + i) % CACHE_SIZE;
                black_box(manager.find_by_id(&format!("doc-{n}")));
            }
        }));
    }
    for handle in handles {
        handle.join().unwrap();
    }
}

fn run_concurrent_writes(manager: Arc<Manager>, num_threads: usize, ops_per_thread: usize) {
    let mut handles = Vec::with_capacity(num_threads);
    for t in 0..num_threads {
        let manager = Arc::clone(&manager);
        handles.push(thread::spawn(move || {
            for i in 0..ops_per_thread {
                black_box(manager.save(document(t, i)).unwrap());
            }
        }));
    }
    for handle in handles {
        handle.join().unwrap();
    }
}

fn run_concurrent_mixed(manager: Arc<Manager>, num_threads: usize, ops_per_thread: usize) {
    let mut handles = Vec::with_capacity(num_threads);
    for t in 0..num_threads {
        let manager = Arc::clone(&manager);
        handles.push(thread::spawn(move || {
            let request = SearchRequest::new().with_author_ids([format!("author-{t}")]);
            for i in 0..ops_per_thread {
                match i % 10 {
                    0 => {
                        black_box(manager.search(&request));
                    }
                    1 | 2 => {
                        black_box(manager.save(document(t, i)).unwrap());
                    }
                    _ => {
                        let n = (t * ops_per_thread + i) % STORED + 1;
                        black_box(manager.find_by_id(&format!("doc-{n}")));
                    }
                }
            }
        }));
    }
    for handle in handles {
        handle.join().unwrap();
    }
}

criterion_group!(
    benches,
    concurrent_reads,
    concurrent_writes,
    concurrent_mixed
);
criterion_main!(benches);
