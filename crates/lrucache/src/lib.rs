//! # lrucache
//!
//! Fixed-capacity in-memory key/value cache with LRU eviction.
//!
//! ## Architecture
//! - **HashMap**: AHash map from key to arena slot (O(1))
//! - **Recency list**: Index-linked doubly-linked list over the arena (O(1))
//! - **Eviction callback**: Optional `FnMut(V)` fired when capacity forces an eviction
//!
//! ## Example
//! ```
//! use lrucache::LruCache;
//!
//! let mut cache = LruCache::new(2).unwrap();
//! cache.put("a", 1);
//! cache.put("b", 2);
//! cache.get(&"a");
//! cache.put("c", 3); // evicts "b"
//!
//! assert_eq!(cache.peek(&"b"), None);
//! assert_eq!(cache.len(), 2);
//! ```
//!
//! The cache is single-threaded. The eviction callback runs inside `put` and
//! must not call back into the cache.

#![warn(missing_docs)]

mod cache;
mod config;
mod error;
mod lru;
mod stats;

pub use cache::LruCache;
pub use config::{CacheBuilder, CacheConfig, DEFAULT_CAPACITY};
pub use error::{Error, Result};
pub use lru::Iter;
pub use stats::CacheStats;
