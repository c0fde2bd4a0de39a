//! LruCache: key map over an arena-backed recency list

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use ahash::RandomState;
use tracing::{debug, trace};

use crate::config::{CacheBuilder, CacheConfig};
use crate::error::Result;
use crate::lru::{Iter, RecencyList};
use crate::stats::CacheStats;

/// Callback fired with the value of each entry evicted for capacity
pub(crate) type EvictionCallback<V> = Box<dyn FnMut(V)>;

// Upper bound on up-front allocation; larger caches grow on demand.
const MAX_PREALLOC: usize = 4096;

/// Fixed-capacity key/value cache with least-recently-used eviction
///
/// `get`, `put` and `remove` are O(1) on average. Reads through [`get`]
/// promote the entry to most recently used; [`peek`] does not.
///
/// When inserting a new key into a full cache, the least recently used entry
/// is evicted first and its value handed to the eviction callback, if one was
/// configured. The callback runs inside [`put`]. It is owned by the cache and
/// must not try to reach the cache again (for example through a shared
/// `RefCell`); re-entrant use is not supported.
///
/// [`get`]: LruCache::get
/// [`peek`]: LruCache::peek
/// [`put`]: LruCache::put
pub struct LruCache<K, V> {
    /// Key to arena slot
    map: HashMap<K, usize, RandomState>,

    /// Recency order, most recent first
    list: RecencyList<K, V>,

    /// Maximum number of entries
    capacity: usize,

    /// Called with evicted values
    on_evict: Option<EvictionCallback<V>>,

    /// Activity counters
    stats: CacheStats,
}

impl<K, V> LruCache<K, V>
where
    K: Hash + Eq + Clone,
{
    /// Create a new LRU cache with the given capacity
    ///
    /// # Errors
    /// * `Error::InvalidConfiguration` if `capacity` is 0
    pub fn new(capacity: usize) -> Result<Self> {
        Self::from_parts(CacheConfig::new(capacity), None)
    }

    /// Create a new LRU cache that hands every evicted value to `callback`
    ///
    /// # Errors
    /// * `Error::InvalidConfiguration` if `capacity` is 0
    pub fn with_eviction_callback<F>(capacity: usize, callback: F) -> Result<Self>
    where
        F: FnMut(V) + 'static,
    {
        Self::from_parts(CacheConfig::new(capacity), Some(Box::new(callback)))
    }

    /// Create a new LRU cache from a config
    pub fn from_config(config: CacheConfig) -> Result<Self> {
        Self::from_parts(config, None)
    }

    /// Start building a cache
    pub fn builder() -> CacheBuilder<K, V> {
        CacheBuilder::new()
    }

    pub(crate) fn from_parts(
        config: CacheConfig,
        on_evict: Option<EvictionCallback<V>>,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config.capacity, on_evict))
    }

    fn build(capacity: usize, on_evict: Option<EvictionCallback<V>>) -> Self {
        debug!(
            capacity,
            on_evict = on_evict.is_some(),
            "creating LRU cache"
        );

        let prealloc = capacity.min(MAX_PREALLOC);
        Self {
            map: HashMap::with_capacity_and_hasher(prealloc, RandomState::new()),
            list: RecencyList::with_capacity(prealloc),
            capacity,
            on_evict,
            stats: CacheStats::new(),
        }
    }

    /// Get a value and mark it most recently used
    pub fn get(&mut self, key: &K) -> Option<&V> {
        let idx = self.touch(key)?;
        self.list.node(idx).map(|node| &node.value)
    }

    /// Get a mutable value and mark it most recently used
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let idx = self.touch(key)?;
        self.list.node_mut(idx).map(|node| &mut node.value)
    }

    /// Get a value without changing its recency
    pub fn peek(&self, key: &K) -> Option<&V> {
        let &idx = self.map.get(key)?;
        self.list.node(idx).map(|node| &node.value)
    }

    /// Get the least recently used entry, the next one to be evicted
    pub fn peek_lru(&self) -> Option<(&K, &V)> {
        let node = self.list.node(self.list.tail()?)?;
        Some((&node.key, &node.value))
    }

    /// Check for a key without changing its recency
    pub fn contains(&self, key: &K) -> bool {
        self.map.contains_key(key)
    }

    /// Insert or update a key-value pair and mark it most recently used
    ///
    /// Returns the previous value when the key was already present. A new key
    /// in a full cache evicts the least recently used entry first.
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        if let Some(&idx) = self.map.get(&key) {
            // Update existing
            let previous = self
                .list
                .node_mut(idx)
                .map(|node| std::mem::replace(&mut node.value, value));
            self.list.move_to_front(idx);
            self.stats.record_update();
            return previous;
        }

        if self.map.len() >= self.capacity {
            self.evict();
        }

        let idx = self.list.alloc(key.clone(), value);
        self.map.insert(key, idx);
        self.list.push_front(idx);
        self.stats.record_insert();

        None
    }

    /// Remove a key from the cache
    ///
    /// Explicit removal never fires the eviction callback.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let idx = self.map.remove(key)?;
        self.list.detach(idx);
        self.stats.record_removal();
        self.list.free(idx).map(|node| node.value)
    }

    /// Get the current size of the cache
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Get the maximum number of entries
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Drop every entry without firing the eviction callback
    pub fn clear(&mut self) {
        debug!(dropped = self.map.len(), "clearing LRU cache");
        self.map.clear();
        self.list.clear();
    }

    /// Iterate entries from most to least recently used, without promotion
    pub fn iter(&self) -> Iter<'_, K, V> {
        self.list.iter()
    }

    /// Get cache statistics
    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// Zero all statistics
    pub fn reset_stats(&mut self) {
        self.stats.reset();
    }

    fn touch(&mut self, key: &K) -> Option<usize> {
        match self.map.get(key) {
            Some(&idx) => {
                self.list.move_to_front(idx);
                self.stats.record_hit();
                Some(idx)
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    fn evict(&mut self) {
        let Some(tail_idx) = self.list.tail() else {
            return;
        };

        self.list.detach(tail_idx);
        let Some(node) = self.list.free(tail_idx) else {
            return;
        };
        self.map.remove(&node.key);
        self.stats.record_eviction();

        trace!(
            slot = tail_idx,
            remaining = self.map.len(),
            "evicted least recently used entry"
        );

        if let Some(callback) = self.on_evict.as_mut() {
            callback(node.value);
        }
    }

    #[cfg(test)]
    fn assert_invariants(&self) {
        let linked = self.list.assert_consistent();
        assert_eq!(linked, self.map.len(), "list length differs from map");
        assert!(self.map.len() <= self.capacity, "capacity exceeded");

        for (key, &idx) in &self.map {
            let node = self.list.node(idx).expect("mapped slot must be occupied");
            assert!(node.key == *key, "slot {} holds a different key", idx);
        }

        match self.map.len() {
            0 => assert!(self.list.head().is_none() && self.list.tail().is_none()),
            1 => assert_eq!(self.list.head(), self.list.tail()),
            _ => assert_ne!(self.list.head(), self.list.tail()),
        }
    }
}

impl<K, V> Default for LruCache<K, V>
where
    K: Hash + Eq + Clone,
{
    fn default() -> Self {
        Self::build(CacheConfig::default().capacity, None)
    }
}

impl<K, V> fmt::Debug for LruCache<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCache")
            .field("len", &self.map.len())
            .field("capacity", &self.capacity)
            .field("on_evict", &self.on_evict.is_some())
            .finish()
    }
}

impl<'a, K, V> IntoIterator for &'a LruCache<K, V>
where
    K: Hash + Eq + Clone,
{
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
