//! Thread-safe document manager.
//!
//! [`ConcurrentDocumentManager`] puts a whole [`DocumentManager`] behind one
//! `parking_lot::Mutex`. Every operation holds the lock for its full
//! duration, so:
//!
//! - a `save` is never observable with the document in the store but not yet
//!   in the cache, or the reverse;
//! - recency updates and eviction decisions are atomic with respect to other
//!   callers;
//! - the cache keeps strict global LRU order.
//!
//! A `Mutex` rather than an `RwLock`: even `find_by_id` mutates recency
//! state, so every operation needs exclusive access anyway.
//!
//! # Example
//!
//! ```rust
//! use docstore::{Author, ConcurrentDocumentManager, Document};
//! use std::sync::Arc;
//! use std::thread;
//!
//! let manager = Arc::new(ConcurrentDocumentManager::new());
//!
//! let handles: Vec<_> = (0..4).map(|t| {
//!     let manager = Arc::clone(&manager);
//!     thread::spawn(move || {
//!         for i in 0..10 {
//!             let doc = Document::new(format!("{t}-{i}"), "body", Author::new("a", "n"));
//!             let saved = manager.save(doc).unwrap();
//!             assert!(manager.find_by_id(saved.id()).is_some());
//!         }
//!     })
//! }).collect();
//!
//! for handle in handles {
//!     handle.join().unwrap();
//! }
//! assert_eq!(manager.len(), 40);
//! ```

use crate::config::DocumentManagerConfig;
use crate::document::Document;
use crate::error::Result;
use crate::id::{IdGenerator, UuidGenerator};
use crate::manager::DocumentManager;
use crate::metrics::CacheMetrics;
use crate::search::SearchRequest;
use core::num::NonZeroUsize;
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::sync::Arc;

/// A [`DocumentManager`] that can be shared between threads.
///
/// Methods mirror [`DocumentManager`] but take `&self`.
pub struct ConcurrentDocumentManager<G = UuidGenerator> {
    inner: Mutex<DocumentManager<G>>,
}

impl ConcurrentDocumentManager<UuidGenerator> {
    /// Creates a manager with the default cache size and UUID identifiers.
    pub fn new() -> Self {
        Self::from_manager(DocumentManager::new())
    }

    /// Creates a manager caching up to `cache_size` documents.
    pub fn with_capacity(cache_size: NonZeroUsize) -> Self {
        Self::from_manager(DocumentManager::with_capacity(cache_size))
    }
}

impl Default for ConcurrentDocumentManager<UuidGenerator> {
    fn default() -> Self {
        Self::new()
    }
}

impl<G: IdGenerator> ConcurrentDocumentManager<G> {
    /// Creates a manager from a configuration and an identifier generator.
    pub fn init(config: DocumentManagerConfig, id_generator: G) -> Self {
        Self::from_manager(DocumentManager::init(config, id_generator))
    }

    /// Wraps an existing manager.
    pub fn from_manager(manager: DocumentManager<G>) -> Self {
        Self {
            inner: Mutex::new(manager),
        }
    }

    /// Unwraps the inner manager.
    pub fn into_inner(self) -> DocumentManager<G> {
        self.inner.into_inner()
    }

    /// See [`DocumentManager::save`].
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`](crate::Error::InvalidArgument) if `document`
    /// is `None`.
    pub fn save(&self, document: impl Into<Option<Document>>) -> Result<Arc<Document>> {
        self.inner.lock().save(document)
    }

    /// See [`DocumentManager::find_by_id`].
    pub fn find_by_id(&self, id: &str) -> Option<Arc<Document>> {
        self.inner.lock().find_by_id(id)
    }

    /// See [`DocumentManager::search`].
    pub fn search<'a>(
        &self,
        request: impl Into<Option<&'a SearchRequest>>,
    ) -> Vec<Arc<Document>> {
        self.inner.lock().search(request)
    }

    /// Runs `f` with exclusive access to the manager.
    ///
    /// Use this to make several operations atomic as a group.
    pub fn with_manager<R>(&self, f: impl FnOnce(&mut DocumentManager<G>) -> R) -> R {
        f(&mut self.inner.lock())
    }

    /// Number of stored documents.
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Returns `true` if nothing has been saved.
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Number of documents resident in the cache.
    pub fn cache_len(&self) -> usize {
        self.inner.lock().cache_len()
    }

    /// Maximum number of cached documents.
    pub fn capacity(&self) -> NonZeroUsize {
        self.inner.lock().capacity()
    }

    /// Returns `true` if `id` is resident in the cache.
    pub fn is_cached(&self, id: &str) -> bool {
        self.inner.lock().is_cached(id)
    }
}

impl<G> core::fmt::Debug for ConcurrentDocumentManager<G> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.inner.try_lock() {
            Some(manager) => f
                .debug_struct("ConcurrentDocumentManager")
                .field("inner", &*manager)
                .finish(),
            None => f
                .debug_struct("ConcurrentDocumentManager")
                .field("inner", &"<locked>")
                .finish(),
        }
    }
}

impl<G: IdGenerator> CacheMetrics for ConcurrentDocumentManager<G> {
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.inner.lock().metrics()
    }

    fn component_name(&self) -> &'static str {
        "ConcurrentDocumentManager"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Author;
    use crate::id::SequentialGenerator;
    use std::thread;

    #[test]
    fn test_concurrent_saves_are_cached_and_stored() {
        let manager = Arc::new(ConcurrentDocumentManager::with_capacity(
            NonZeroUsize::new(1000).unwrap(),
        ));

        let handles: Vec<_> = (0..8)
            .map(|t| {
                let manager = Arc::clone(&manager);
                thread::spawn(move || {
                    for i in 0..50 {
                        let doc = Document::new(format!("{t}-{i}"), "c", Author::new("a", "n"));
                        let saved = manager.save(doc).unwrap();
                        assert!(manager.is_cached(saved.id()));
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(manager.len(), 400);
        assert_eq!(manager.cache_len(), 400);
    }

    #[test]
    fn test_with_manager_groups_operations() {
        let manager = ConcurrentDocumentManager::init(
            DocumentManagerConfig {
                cache_size: NonZeroUsize::new(2).unwrap(),
            },
            SequentialGenerator::new("d"),
        );
        let ids = manager.with_manager(|m| {
            let a = m.save(Document::new("a", "c", Author::new("x", "n"))).unwrap();
            let b = m.save(Document::new("b", "c", Author::new("x", "n"))).unwrap();
            (a.id().to_string(), b.id().to_string())
        });
        assert_eq!(ids, ("d1".to_string(), "d2".to_string()));
        assert_eq!(manager.search(None).len(), 2);

        let inner = manager.into_inner();
        assert_eq!(inner.cached_ids(), vec!["d2", "d1"]);
    }
}
