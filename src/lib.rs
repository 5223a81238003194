//! # docstore
//!
//! An in-memory document repository with create/update ("upsert"), point
//! lookup by identifier and multi-predicate search, fronted by a
//! fixed-capacity LRU cache that accelerates repeated lookups.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                        DocumentManager                          │
//! │                                                                 │
//! │   save ───────┬──────────────────────────────┐                  │
//! │               ▼                              ▼                  │
//! │   ┌──────────────────────┐      ┌─────────────────────────┐     │
//! │   │ Store                │      │ LruCache                │     │
//! │   │ id -> Arc<Document>  │      │ id -> Arc<Document>     │     │
//! │   │ insertion ordered    │      │ recency ordered, bounded│     │
//! │   └──────────────────────┘      └─────────────────────────┘     │
//! │        ▲          ▲                     ▲                       │
//! │ search │  miss    └──── find_by_id ─────┘ hit                   │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! - The [`Store`] is authoritative. The cache only ever holds documents the
//!   store holds, and both share the same `Arc<Document>`.
//! - The [`LruCache`] tracks recency with an arena-backed doubly linked list
//!   and evicts the least recently used entry when full. Reads and writes
//!   both count as use.
//! - [`DocumentManager::search`] scans the store; the cache is not an index.
//!   Matches are written into the cache.
//!
//! ## Quick Start
//!
//! ```rust
//! use docstore::{Author, Document, DocumentManager, SearchRequest};
//!
//! let mut manager = DocumentManager::new();
//! let author = Author::new("author-1", "John Doe");
//!
//! let saved = manager
//!     .save(Document::new("ABC Title", "ABC Content", author.clone()))
//!     .unwrap();
//! assert!(saved.id.is_some());
//!
//! // Served from the cache
//! let found = manager.find_by_id(saved.id()).unwrap();
//! assert_eq!(found.title, "ABC Title");
//!
//! // Unknown ids are not an error
//! assert!(manager.find_by_id("non-existing-id").is_none());
//!
//! let request = SearchRequest::new()
//!     .with_title_prefixes(["ABC"])
//!     .with_author_ids(["author-1"]);
//! assert_eq!(manager.search(&request).len(), 1);
//! ```
//!
//! ## Deterministic Identifiers
//!
//! Identifiers come from an injected [`IdGenerator`]. [`UuidGenerator`] is
//! the default; [`SequentialGenerator`] gives predictable ids.
//!
//! ```rust
//! use docstore::{Author, Document, DocumentManager, SequentialGenerator};
//! use core::num::NonZeroUsize;
//!
//! let mut manager = DocumentManager::with_id_generator(
//!     NonZeroUsize::new(2).unwrap(),
//!     SequentialGenerator::new("doc-"),
//! );
//! let saved = manager.save(Document::new("t", "c", Author::new("a", "n"))).unwrap();
//! assert_eq!(saved.id(), "doc-1");
//! ```
//!
//! ## Features
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `hashbrown` | yes | Use `hashbrown` maps for the cache and store index |
//! | `concurrent` | no | [`ConcurrentDocumentManager`], a mutex-guarded manager |
//! | `serde` | no | Serialize/deserialize documents, requests and configs |
//!
//! ## Logging
//!
//! The crate emits `tracing` events (cache hits and misses, evictions,
//! generated ids, search summaries) and never installs a subscriber.

#![cfg_attr(docsrs, feature(doc_cfg))]

/// Doubly linked list used for recency ordering.
pub mod list;

/// Configuration structures.
pub mod config;

/// Document and author records.
pub mod document;

/// Error type.
pub mod error;

/// Identifier generators.
pub mod id;

/// The LRU cache.
pub mod lru;

/// The document manager.
pub mod manager;

/// Metrics reporting.
pub mod metrics;

/// Search requests and predicate evaluation.
pub mod search;

/// The backing store.
pub mod store;

/// Thread-safe manager.
#[cfg(feature = "concurrent")]
#[cfg_attr(docsrs, doc(cfg(feature = "concurrent")))]
pub mod concurrent;

pub use document::{Author, Document};
pub use error::{Error, Result};
pub use id::{IdGenerator, SequentialGenerator, UuidGenerator};
pub use lru::LruCache;
pub use manager::DocumentManager;
pub use search::SearchRequest;
pub use store::Store;

#[cfg(feature = "concurrent")]
pub use concurrent::ConcurrentDocumentManager;
