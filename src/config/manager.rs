//! Configuration for the document manager.

use core::fmt;
use core::num::NonZeroUsize;

/// Cache size used when no configuration is supplied.
pub const DEFAULT_CACHE_SIZE: NonZeroUsize = match NonZeroUsize::new(100) {
    Some(size) => size,
    None => unreachable!(),
};

/// Configuration for a [`DocumentManager`](crate::DocumentManager).
///
/// # Fields
///
/// - `cache_size`: maximum number of documents resident in the lookup cache
///   before eviction begins. Recognized as `cacheSize` when deserialized.
#[derive(Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
pub struct DocumentManagerConfig {
    /// Maximum resident entries before eviction begins.
    pub cache_size: NonZeroUsize,
}

impl Default for DocumentManagerConfig {
    fn default() -> Self {
        Self {
            cache_size: DEFAULT_CACHE_SIZE,
        }
    }
}

impl DocumentManagerConfig {
    /// Returns the configuration for the manager's LRU cache.
    pub fn cache_config(&self) -> super::LruCacheConfig {
        super::LruCacheConfig {
            capacity: self.cache_size,
        }
    }
}

impl fmt::Debug for DocumentManagerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DocumentManagerConfig")
            .field("cache_size", &self.cache_size)
            .finish()
    }
}
