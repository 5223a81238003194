use chrono::{Duration, Utc};
use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use docstore::config::{DocumentManagerConfig, LruCacheConfig};
use docstore::{Author, Document, DocumentManager, LruCache, SearchRequest, SequentialGenerator};
use std::num::NonZeroUsize;

const CACHE_SIZE: usize = 1000;
const STORED: usize = 5000;

fn make_lru<K: std::hash::Hash + Eq + Clone, V>(cap: usize) -> LruCache<K, V> {
    let config = LruCacheConfig {
        capacity: NonZeroUsize::new(cap).unwrap(),
    };
    LruCache::init(config, None)
}

fn make_manager(cap: usize) -> DocumentManager<SequentialGenerator> {
    DocumentManager::init(
        DocumentManagerConfig {
            cache_size: NonZeroUsize::new(cap).unwrap(),
        },
        SequentialGenerator::new("doc-"),
    )
}

fn document(i: usize) -> Document {
    let prefix = ["ABC", "XYZ", "QRS"][i % 3];
    Document::new(
        format!("{prefix} Title {i}"),
        format!("Content {i} {}", if i % 2 == 0 { "ABC" } else { "XYZ" }),
        Author::new(format!("author-{}", i % 10), "Writer"),
    )
    .with_created(Utc::now() - Duration::seconds(i as i64))
}

/// Manager holding `STORED` documents; ids `doc-1..=doc-STORED`.
fn populated_manager() -> DocumentManager<SequentialGenerator> {
    let mut manager = make_manager(CACHE_SIZE);
    for i in 0..STORED {
        manager.save(document(i)).unwrap();
    }
    manager
}

pub fn lru_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("LRU Operations");

    let mut cache = make_lru(CACHE_SIZE);
    for i in 0..CACHE_SIZE {
        cache.put(i, i);
    }

    group.bench_function("get hit", |b| {
        b.iter(|| {
            for i in 0..100 {
                black_box(cache.get(&(i % CACHE_SIZE)));
            }
        });
    });

    group.bench_function("get miss", |b| {
        b.iter(|| {
            for i in 0..100 {
                black_box(cache.get(&(i + CACHE_SIZE)));
            }
        });
    });

    group.bench_function("put with eviction", |b| {
        let mut next = CACHE_SIZE;
        b.iter(|| {
            for _ in 0..100 {
                black_box(cache.put(next, next));
                next += 1;
            }
        });
    });

    group.finish();
}

pub fn manager_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("DocumentManager Operations");

    group.bench_function("save new", |b| {
        b.iter_batched(
            || make_manager(CACHE_SIZE),
            |mut manager| {
                for i in 0..100 {
                    black_box(manager.save(document(i)).unwrap());
                }
            },
            BatchSize::SmallInput,
        );
    });

    let mut manager = populated_manager();

    group.bench_function("find_by_id cache hit", |b| {
        let ids: Vec<String> = (STORED - 99..=STORED).map(|n| format!("doc-{n}")).collect();
        b.iter(|| {
            for id in &ids {
                black_box(manager.find_by_id(id));
            }
        });
    });

    group.bench_function("find_by_id store fallback", |b| {
        // Cycle through more ids than the cache holds so each lookup misses
        let mut n = 0;
        b.iter(|| {
            for _ in 0..100 {
                n = n % STORED + 1;
                black_box(manager.find_by_id(&format!("doc-{n}")));
            }
        });
    });

    group.bench_function("find_by_id not found", |b| {
        b.iter(|| black_box(manager.find_by_id("missing")));
    });

    let request = SearchRequest::new()
        .with_title_prefixes(["ABC"])
        .with_contents(["ABC"])
        .with_author_ids(["author-0", "author-4"]);
    group.bench_function("search multi-predicate", |b| {
        b.iter(|| black_box(manager.search(&request)));
    });

    group.bench_function("search all", |b| {
        b.iter(|| black_box(manager.search(None)));
    });

    group.finish();
}

criterion_group!(benches, lru_benchmark, manager_benchmark);
criterion_main!(benches);
