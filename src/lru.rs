//! Least Recently Used (LRU) Cache Implementation
//!
//! This module provides the bounded, recency-ordered map that sits in front of
//! the document store. Entries are ordered by their last access; both `get`
//! hits and `put` count as an access. Once the cache holds `capacity` entries,
//! inserting a new key evicts exactly one entry, the least recently used.
//!
//! # Algorithm
//!
//! A hash map from key to a [`NodeIndex`] is paired with an arena-backed
//! doubly linked list holding `(key, value)` pairs. The front of the list is
//! the most recently used entry. `get` and `put` unlink the touched node and
//! relink it at the front; eviction pops the back of the list and removes its
//! key from the map.
//!
//! # Performance Characteristics
//!
//! - **Time Complexity**:
//!   - Get: O(1)
//!   - Put: O(1) amortized
//!   - Remove: O(1)
//!
//! - **Space Complexity**:
//!   - O(n) where n is the capacity of the cache
//!
//! # Thread Safety
//!
//! This implementation is not thread-safe. Every `get` mutates recency state,
//! so concurrent callers need exclusive access (for example a `Mutex`).

use crate::config::LruCacheConfig;
use crate::list::{List, NodeIndex};
use crate::metrics::{CacheMetrics, LruCacheMetrics};
use core::borrow::Borrow;
use core::hash::{BuildHasher, Hash};
use core::num::NonZeroUsize;
use std::collections::BTreeMap;

#[cfg(feature = "hashbrown")]
use hashbrown::DefaultHashBuilder;
#[cfg(feature = "hashbrown")]
use hashbrown::HashMap;

#[cfg(not(feature = "hashbrown"))]
use std::collections::hash_map::RandomState as DefaultHashBuilder;
#[cfg(not(feature = "hashbrown"))]
use std::collections::HashMap;

/// An implementation of a Least Recently Used (LRU) cache.
///
/// The cache has a fixed capacity and supports O(1) operations for
/// inserting, retrieving, and updating entries. When the cache is full,
/// the least recently used entry is evicted to make room for a new key.
///
/// # Examples
///
/// ```
/// use docstore::LruCache;
/// use core::num::NonZeroUsize;
///
/// let mut cache = LruCache::new(NonZeroUsize::new(2).unwrap());
///
/// cache.put("apple", 1);
/// cache.put("banana", 2);
///
/// // Accessing items updates their recency
/// assert_eq!(cache.get(&"apple"), Some(&1));
///
/// // Adding beyond capacity evicts the least recently used item
/// cache.put("cherry", 3);
/// assert_eq!(cache.get(&"banana"), None);
/// assert_eq!(cache.get(&"apple"), Some(&1));
/// assert_eq!(cache.get(&"cherry"), Some(&3));
/// ```
pub struct LruCache<K, V, S = DefaultHashBuilder> {
    config: LruCacheConfig,
    list: List<(K, V)>,
    map: HashMap<K, NodeIndex, S>,
    metrics: LruCacheMetrics,
}

impl<K: Hash + Eq, V> LruCache<K, V> {
    /// Creates a new LRU cache with the specified capacity.
    pub fn new(cap: NonZeroUsize) -> LruCache<K, V, DefaultHashBuilder> {
        LruCache::with_hasher(cap, DefaultHashBuilder::default())
    }

    /// Creates a new LRU cache from a configuration with an optional hasher.
    ///
    /// If `hasher` is `None` the default hash builder is used.
    pub fn init(
        config: LruCacheConfig,
        hasher: Option<DefaultHashBuilder>,
    ) -> LruCache<K, V, DefaultHashBuilder> {
        LruCache::with_hasher(config.capacity, hasher.unwrap_or_default())
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> LruCache<K, V, S> {
    /// Creates a new LRU cache with the specified capacity and hash builder.
    pub fn with_hasher(cap: NonZeroUsize, hash_builder: S) -> Self {
        let map_capacity = cap.get().next_power_of_two();
        LruCache {
            config: LruCacheConfig { capacity: cap },
            list: List::new(cap),
            map: HashMap::with_capacity_and_hasher(map_capacity, hash_builder),
            metrics: LruCacheMetrics::new(cap.get() as u64),
        }
    }

    /// Returns the maximum number of entries.
    #[inline]
    pub fn cap(&self) -> NonZeroUsize {
        self.config.capacity
    }

    /// Returns the number of resident entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns `true` if no entries are resident.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Returns the cache's counters.
    #[inline]
    pub fn lru_metrics(&self) -> &LruCacheMetrics {
        &self.metrics
    }

    /// Returns the value for `key` and marks it most recently used.
    ///
    /// A miss is counted in the metrics but leaves recency untouched.
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let Some(node) = self.map.get(key).copied() else {
            self.metrics.core.record_miss();
            return None;
        };
        self.touch(node);
        self.metrics.core.record_hit();
        self.list.get(node).map(|(_, v)| v)
    }

    /// Like [`get`](Self::get) but returns a mutable reference.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let Some(node) = self.map.get(key).copied() else {
            self.metrics.core.record_miss();
            return None;
        };
        self.touch(node);
        self.metrics.core.record_hit();
        self.list.get_mut(node).map(|(_, v)| v)
    }

    /// Returns the value for `key` without updating recency or metrics.
    pub fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let node = self.map.get(key)?;
        self.list.get(*node).map(|(_, v)| v)
    }

    /// Returns `true` if `key` is resident. Does not update recency.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.map.contains_key(key)
    }

    /// Returns the least recently used entry without updating recency.
    pub fn peek_lru(&self) -> Option<(&K, &V)> {
        self.list.back().map(|(k, v)| (k, v))
    }

    fn touch(&mut self, node: NodeIndex) {
        if self.list.is_front(node) {
            self.metrics.front_hits += 1;
            return;
        }
        self.list.move_to_front(node);
    }

    /// Removes `key` from the cache, returning its value.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let node = self.map.remove(key)?;
        let (_, v) = self.list.remove(node)?;
        self.metrics.core.record_removal();
        Some(v)
    }

    /// Removes every entry. Counters other than residency are kept.
    pub fn clear(&mut self) {
        self.map.clear();
        self.list.clear();
        self.metrics.core.resident = 0;
    }

    /// Iterates over resident entries from most to least recently used.
    ///
    /// Iteration does not count as an access.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            inner: self.list.iter(),
        }
    }
}

impl<K: Hash + Eq + Clone, V, S: BuildHasher> LruCache<K, V, S> {
    /// Inserts or overwrites `key` and marks it most recently used.
    ///
    /// Returns:
    /// - `Some((key, old_value))` when an existing entry was overwritten,
    /// - `Some((evicted_key, evicted_value))` when inserting a new key pushed
    ///   out the least recently used entry,
    /// - `None` otherwise.
    pub fn put(&mut self, key: K, value: V) -> Option<(K, V)> {
        if let Some(node) = self.map.get(&key).copied() {
            self.list.move_to_front(node);
            let previous = self.list.update(node, (key, value));
            self.metrics.core.record_update();
            return previous;
        }

        let mut evicted = None;
        if self.list.is_full() {
            if let Some((old_key, old_value)) = self.list.remove_last() {
                self.map.remove(&old_key);
                self.metrics.core.record_eviction();
                evicted = Some((old_key, old_value));
            }
        }

        if let Some(node) = self.list.add((key.clone(), value)) {
            self.map.insert(key, node);
            self.metrics.core.record_insertion();
        }

        evicted
    }
}

impl<K, V, S> core::fmt::Debug for LruCache<K, V, S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("LruCache")
            .field("capacity", &self.config.capacity)
            .field("len", &self.list.len())
            .finish()
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> CacheMetrics for LruCache<K, V, S> {
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.metrics.metrics()
    }

    fn component_name(&self) -> &'static str {
        self.metrics.component_name()
    }
}

/// Iterator over an [`LruCache`] from most to least recently used.
#[derive(Debug)]
pub struct Iter<'a, K, V> {
    inner: crate::list::Iter<'a, (K, V)>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, v)| (k, v))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}
