//! Document manager: the store with an LRU lookup cache in front of it.
//!
//! # Control Flow
//!
//! ```text
//!            save                    find_by_id                 search
//!              │                         │                         │
//!              ▼                         ▼                         ▼
//!      ┌───────────────┐   hit   ┌───────────────┐         ┌───────────────┐
//!      │ Store.upsert  │ ◀────── │  LruCache.get │         │  scan Store   │
//!      └───────┬───────┘  (ret)  └───────┬───────┘         └───────┬───────┘
//!              │                    miss │                         │ matches
//!              ▼                         ▼                         ▼
//!      ┌───────────────┐         ┌───────────────┐         ┌───────────────┐
//!      │ LruCache.put  │         │   Store.get   │──found─▶│ LruCache.put  │
//!      └───────────────┘         └───────────────┘         └───────────────┘
//! ```
//!
//! Every write and every store hit populates the cache, so the cache only
//! ever holds documents that the store also holds, and both hold the same
//! `Arc`. The cache is never consulted by `search`; it is not an index.

use crate::config::DocumentManagerConfig;
use crate::document::Document;
use crate::error::{Error, Result};
use crate::id::{IdGenerator, UuidGenerator};
use crate::lru::LruCache;
use crate::metrics::{CacheMetrics, ManagerMetrics};
use crate::search::SearchRequest;
use crate::store::Store;
use core::num::NonZeroUsize;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, trace, warn};

/// In-memory document repository with cached point lookups.
///
/// # Examples
///
/// ```
/// use docstore::{Author, Document, DocumentManager, SearchRequest};
///
/// let mut manager = DocumentManager::new();
/// let author = Author::new("a-1", "Jane Doe");
///
/// let saved = manager.save(Document::new("ABC Title", "ABC Content", author.clone())).unwrap();
/// manager.save(Document::new("XYZ Title", "ABC Content", author)).unwrap();
///
/// let found = manager.find_by_id(saved.id()).unwrap();
/// assert_eq!(found.title, "ABC Title");
///
/// let request = SearchRequest::new().with_title_prefixes(["ABC"]);
/// assert_eq!(manager.search(&request).len(), 1);
/// assert_eq!(manager.search(None).len(), 2);
/// ```
pub struct DocumentManager<G = UuidGenerator> {
    store: Store<G>,
    cache: LruCache<String, Arc<Document>>,
    metrics: ManagerMetrics,
}

impl DocumentManager<UuidGenerator> {
    /// Creates a manager with the default cache size and UUID identifiers.
    pub fn new() -> Self {
        Self::init(DocumentManagerConfig::default(), UuidGenerator)
    }

    /// Creates a manager caching up to `cache_size` documents.
    pub fn with_capacity(cache_size: NonZeroUsize) -> Self {
        Self::with_id_generator(cache_size, UuidGenerator)
    }
}

impl Default for DocumentManager<UuidGenerator> {
    fn default() -> Self {
        Self::new()
    }
}

impl<G: IdGenerator> DocumentManager<G> {
    /// Creates a manager from a configuration and an identifier generator.
    pub fn init(config: DocumentManagerConfig, id_generator: G) -> Self {
        Self {
            store: Store::new(id_generator),
            cache: LruCache::init(config.cache_config(), None),
            metrics: ManagerMetrics::default(),
        }
    }

    /// Creates a manager caching up to `cache_size` documents whose new
    /// documents get identifiers from `id_generator`.
    pub fn with_id_generator(cache_size: NonZeroUsize, id_generator: G) -> Self {
        Self::init(DocumentManagerConfig { cache_size }, id_generator)
    }

    /// Inserts or updates a document and caches the stored version.
    ///
    /// Documents without an id are assigned one. The returned document always
    /// has its id set. `created` is never changed by a save.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] if `document` is `None`.
    pub fn save(&mut self, document: impl Into<Option<Document>>) -> Result<Arc<Document>> {
        let Some(document) = document.into() else {
            self.metrics.rejected_saves += 1;
            warn!("rejected save of an absent document");
            return Err(Error::InvalidArgument("document is absent"));
        };

        let needs_id = !document.has_id();
        let saved = match self.store.upsert(document) {
            Ok(saved) => saved,
            Err(err) => {
                self.metrics.rejected_saves += 1;
                warn!(error = %err, "rejected save");
                return Err(err);
            }
        };

        if needs_id {
            self.metrics.generated_ids += 1;
        }
        self.metrics.saves += 1;
        self.populate(&saved);
        Ok(saved)
    }

    /// Looks up a document, consulting the cache before the store.
    ///
    /// A cache hit refreshes the document's recency and leaves the store
    /// untouched. A miss that the store can answer writes the document
    /// through to the cache. Unknown ids return `None`.
    pub fn find_by_id(&mut self, id: &str) -> Option<Arc<Document>> {
        self.metrics.lookups += 1;

        if let Some(document) = self.cache.get(id).cloned() {
            self.metrics.lookup_cache_hits += 1;
            debug!(id, "cache hit");
            return Some(document);
        }

        match self.store.get(id) {
            Some(document) => {
                self.metrics.store_fallbacks += 1;
                debug!(id, "cache miss, loaded from store");
                self.populate(&document);
                Some(document)
            }
            None => {
                self.metrics.not_found += 1;
                debug!(id, "document not found");
                None
            }
        }
    }

    /// Returns the stored documents matching `request`.
    ///
    /// With no request every stored document is returned and the cache is
    /// left alone. Otherwise each stored document is evaluated with
    /// [`SearchRequest::matches`] and every match is written to the cache, in
    /// result order. Results follow store insertion order.
    pub fn search<'a>(
        &mut self,
        request: impl Into<Option<&'a SearchRequest>>,
    ) -> Vec<Arc<Document>> {
        self.metrics.searches += 1;

        let Some(request) = request.into() else {
            let all = self.store.all();
            debug!(returned = all.len(), "search without predicates");
            return all;
        };

        let matched: Vec<Arc<Document>> = self
            .store
            .iter()
            .filter(|document| request.matches(document))
            .cloned()
            .collect();

        self.metrics.documents_scanned += self.store.len() as u64;
        self.metrics.documents_matched += matched.len() as u64;

        for document in &matched {
            self.populate(document);
        }

        debug!(
            scanned = self.store.len(),
            matched = matched.len(),
            "search complete"
        );
        matched
    }

    fn populate(&mut self, document: &Arc<Document>) {
        let id = document.id();
        trace!(id, "caching document");
        if let Some((evicted, _)) = self.cache.put(id.to_string(), Arc::clone(document)) {
            if evicted != id {
                debug!(%evicted, "evicted least recently used document");
            }
        }
    }

    /// Number of stored documents.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Returns `true` if nothing has been saved.
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Number of documents resident in the cache.
    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    /// Maximum number of cached documents.
    pub fn capacity(&self) -> NonZeroUsize {
        self.cache.cap()
    }

    /// Returns `true` if `id` is resident in the cache. Does not count as an
    /// access.
    pub fn is_cached(&self, id: &str) -> bool {
        self.cache.contains(id)
    }

    /// Cached document ids from most to least recently used.
    pub fn cached_ids(&self) -> Vec<&str> {
        self.cache.iter().map(|(id, _)| id.as_str()).collect()
    }

    /// Read access to the backing store.
    pub fn store(&self) -> &Store<G> {
        &self.store
    }

    /// The manager's own counters (without the cache's).
    pub fn manager_metrics(&self) -> &ManagerMetrics {
        &self.metrics
    }
}

impl<G> core::fmt::Debug for DocumentManager<G> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DocumentManager")
            .field("cache", &self.cache)
            .field("metrics", &self.metrics)
            .finish_non_exhaustive()
    }
}

impl<G: IdGenerator> CacheMetrics for DocumentManager<G> {
    fn metrics(&self) -> BTreeMap<String, f64> {
        let mut metrics = self.metrics.to_btreemap();
        for (name, value) in self.cache.metrics() {
            metrics.insert(format!("cache_{name}"), value);
        }
        metrics.insert("stored_documents".to_string(), self.store.len() as f64);
        metrics
    }

    fn component_name(&self) -> &'static str {
        "DocumentManager"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Author;
    use crate::id::SequentialGenerator;

    fn manager(cap: usize) -> DocumentManager<SequentialGenerator> {
        DocumentManager::with_id_generator(
            NonZeroUsize::new(cap).unwrap(),
            SequentialGenerator::new("d"),
        )
    }

    fn doc(title: &str) -> Document {
        Document::new(title, "content", Author::new("a", "n"))
    }

    #[test]
    fn test_save_absent_document() {
        let mut manager = manager(2);
        assert_eq!(
            manager.save(None),
            Err(Error::InvalidArgument("document is absent"))
        );
        assert_eq!(manager.manager_metrics().rejected_saves, 1);
        assert!(manager.is_empty());
        assert_eq!(manager.cache_len(), 0);
    }

    #[test]
    fn test_save_with_empty_id_generates_one() {
        let mut manager = manager(2);
        let saved = manager.save(doc("one").with_id("")).unwrap();
        assert_eq!(saved.id(), "d1");
        assert!(manager.is_cached("d1"));
        assert!(!manager.is_cached(""));
        assert!(manager.find_by_id("").is_none());
        assert_eq!(manager.manager_metrics().generated_ids, 1);
    }

    #[test]
    fn test_save_populates_cache() {
        let mut manager = manager(2);
        let saved = manager.save(doc("one")).unwrap();
        assert_eq!(saved.id(), "d1");
        assert!(manager.is_cached("d1"));

        let found = manager.find_by_id("d1").unwrap();
        assert!(Arc::ptr_eq(&saved, &found));
        assert_eq!(manager.manager_metrics().lookup_cache_hits, 1);
        assert_eq!(manager.manager_metrics().store_fallbacks, 0);
    }

    #[test]
    fn test_find_by_id_falls_back_to_store() {
        let mut manager = manager(1);
        manager.save(doc("one")).unwrap();
        manager.save(doc("two")).unwrap();
        assert!(!manager.is_cached("d1"));

        let found = manager.find_by_id("d1").unwrap();
        assert_eq!(found.title, "one");
        assert!(manager.is_cached("d1"));
        assert!(!manager.is_cached("d2"));
        assert_eq!(manager.manager_metrics().store_fallbacks, 1);

        // Now resident
        manager.find_by_id("d1").unwrap();
        assert_eq!(manager.manager_metrics().lookup_cache_hits, 1);
    }

    #[test]
    fn test_find_by_id_unknown() {
        let mut manager = manager(2);
        assert!(manager.find_by_id("non-existing-id").is_none());
        assert_eq!(manager.manager_metrics().not_found, 1);
        assert_eq!(manager.cache_len(), 0);
    }

    #[test]
    fn test_lookup_hit_refreshes_recency() {
        let mut manager = manager(2);
        manager.save(doc("one")).unwrap();
        manager.save(doc("two")).unwrap();
        manager.find_by_id("d1").unwrap();
        assert_eq!(manager.cached_ids(), vec!["d1", "d2"]);

        manager.save(doc("three")).unwrap();
        assert_eq!(manager.cached_ids(), vec!["d3", "d1"]);
    }

    #[test]
    fn test_update_replaces_cached_document() {
        let mut manager = manager(2);
        let saved = manager.save(doc("one")).unwrap();
        let mut edited = (*saved).clone();
        edited.title = "edited".to_string();
        let updated = manager.save(edited).unwrap();

        assert_eq!(updated.id(), saved.id());
        let found = manager.find_by_id(saved.id()).unwrap();
        assert_eq!(found.title, "edited");
        assert!(Arc::ptr_eq(&found, &manager.store().get(saved.id()).unwrap()));
        assert_eq!(manager.manager_metrics().generated_ids, 1);
    }

    #[test]
    fn test_search_populates_cache_in_order() {
        let mut manager = manager(3);
        for title in ["ABC 1", "XYZ", "ABC 2", "other", "ABC 3"] {
            manager.save(doc(title)).unwrap();
        }
        let request = SearchRequest::new().with_title_prefixes(["ABC"]);
        let results = manager.search(&request);
        let titles: Vec<_> = results.iter().map(|d| d.title.as_str()).collect();
        assert_eq!(titles, vec!["ABC 1", "ABC 2", "ABC 3"]);
        assert_eq!(manager.cached_ids(), vec!["d5", "d3", "d1"]);
    }

    #[test]
    fn test_search_without_request_leaves_cache() {
        let mut manager = manager(1);
        manager.save(doc("one")).unwrap();
        manager.save(doc("two")).unwrap();
        let all = manager.search(None);
        assert_eq!(all.len(), 2);
        assert_eq!(manager.cached_ids(), vec!["d2"]);
    }

    #[test]
    fn test_metrics_report() {
        let mut manager = manager(2);
        manager.save(doc("one")).unwrap();
        manager.find_by_id("d1");
        manager.find_by_id("missing");
        let metrics = manager.metrics();
        assert_eq!(metrics.get("saves"), Some(&1.0));
        assert_eq!(metrics.get("lookups"), Some(&2.0));
        assert_eq!(metrics.get("lookup_hit_rate"), Some(&0.5));
        assert_eq!(metrics.get("cache_hits").copied(), None);
        assert_eq!(metrics.get("cache_cache_hits"), Some(&1.0));
        assert_eq!(metrics.get("stored_documents"), Some(&1.0));
        assert_eq!(manager.component_name(), "DocumentManager");
    }
}
