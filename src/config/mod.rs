//! Configuration Module
//!
//! Configuration structures for the LRU cache and the document manager.
//! Config structs have public fields so they can be built with a struct
//! literal; each also implements `Default`.
//!
//! | Config | Used by | Description |
//! |--------|---------|-------------|
//! | `LruCacheConfig` | [`LruCache`](crate::LruCache) | Entry capacity of a standalone cache |
//! | `DocumentManagerConfig` | [`DocumentManager`](crate::DocumentManager) | Cache size of a manager |
//!
//! With the `serde` feature both structs can be deserialized. Field names are
//! camelCase, so a manager is configured with the `cacheSize` option:
//!
//! ```ignore
//! let config: DocumentManagerConfig = serde_json::from_str(r#"{ "cacheSize": 250 }"#)?;
//! ```
//!
//! # Examples
//!
//! ```
//! use docstore::config::DocumentManagerConfig;
//! use docstore::{DocumentManager, UuidGenerator};
//! use core::num::NonZeroUsize;
//!
//! let config = DocumentManagerConfig {
//!     cache_size: NonZeroUsize::new(500).unwrap(),
//! };
//! let manager = DocumentManager::init(config, UuidGenerator);
//! assert_eq!(manager.capacity().get(), 500);
//! ```

pub mod lru;
pub mod manager;

pub use lru::LruCacheConfig;
pub use manager::{DocumentManagerConfig, DEFAULT_CACHE_SIZE};
