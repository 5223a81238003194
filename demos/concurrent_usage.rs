//! Concurrent Document Manager Usage
//!
//! Shares one `ConcurrentDocumentManager` between writer and reader threads.
//!
//! Run with: cargo run --example concurrent_usage --features concurrent

use docstore::config::DocumentManagerConfig;
use docstore::metrics::CacheMetrics;
use docstore::{Author, ConcurrentDocumentManager, Document, SearchRequest, SequentialGenerator};
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::thread;
use std::time::Instant;

const WRITERS: usize = 4;
const READERS: usize = 4;
const DOCS_PER_WRITER: usize = 250;

fn main() {
    let manager = Arc::new(ConcurrentDocumentManager::init(
        DocumentManagerConfig {
            cache_size: NonZeroUsize::new(200).unwrap(),
        },
        SequentialGenerator::new("doc-"),
    ));
    let start = Instant::now();

    let writers: Vec<_> = (0..WRITERS)
        .map(|w| {
            let manager = Arc::clone(&manager);
            thread::spawn(move || {
                let author = Author::new(format!("author-{w}"), format!("Writer {w}"));
                for i in 0..DOCS_PER_WRITER {
                    let doc = Document::new(
                        format!("W{w} Report {i}"),
                        format!("Quarterly numbers, part {i}"),
                        author.clone(),
                    );
                    if let Err(err) = manager.save(doc) {
                        eprintln!("writer {w}: {err}");
                    }
                }
            })
        })
        .collect();

    let readers: Vec<_> = (0..READERS)
        .map(|r| {
            let manager = Arc::clone(&manager);
            thread::spawn(move || {
                let mut found = 0;
                for i in 0..DOCS_PER_WRITER {
                    let n = (r * DOCS_PER_WRITER + i) % (WRITERS * DOCS_PER_WRITER) + 1;
                    if manager.find_by_id(&format!("doc-{n}")).is_some() {
                        found += 1;
                    }
                }
                found
            })
        })
        .collect();

    for handle in writers {
        handle.join().unwrap();
    }
    let found: usize = readers.into_iter().map(|h| h.join().unwrap()).sum();

    println!("Elapsed: {:?}", start.elapsed());
    println!("Stored documents: {}", manager.len());
    println!("Cached documents: {}", manager.cache_len());
    println!("Reader lookups that found a document: {found}");

    let request = SearchRequest::new()
        .with_title_prefixes(["W0 ", "W1 "])
        .with_contents(["part 1"]);
    println!(
        "Documents by writers 0 and 1 mentioning \"part 1\": {}",
        manager.search(&request).len()
    );

    let metrics = manager.metrics();
    println!(
        "Lookup hit rate: {:.1}%",
        metrics.get("lookup_hit_rate").copied().unwrap_or(0.0) * 100.0
    );
    println!(
        "Cache evictions: {:.0}",
        metrics.get("cache_evictions").copied().unwrap_or(0.0)
    );
}
