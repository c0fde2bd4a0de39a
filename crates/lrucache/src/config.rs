//! Cache configuration and builder

use std::fmt;
use std::hash::Hash;
use std::marker::PhantomData;

use crate::cache::{EvictionCallback, LruCache};
use crate::error::{Error, Result};

/// Capacity used when none is given
pub const DEFAULT_CAPACITY: usize = 1000;

/// Settings for an [`LruCache`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheConfig {
    /// Maximum number of entries held at once
    pub capacity: usize,
}

impl CacheConfig {
    /// Create a config with the given capacity
    pub fn new(capacity: usize) -> Self {
        Self { capacity }
    }

    /// Check the config can back a cache
    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            return Err(Error::InvalidConfiguration(
                "capacity must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
        }
    }
}

/// Builder for an [`LruCache`]
///
/// ```
/// use lrucache::LruCache;
///
/// let cache = LruCache::<u32, String>::builder()
///     .capacity(64)
///     .on_evict(|value| println!("evicted {}", value))
///     .build()
///     .unwrap();
///
/// assert_eq!(cache.capacity(), 64);
/// ```
pub struct CacheBuilder<K, V> {
    config: CacheConfig,
    on_evict: Option<EvictionCallback<V>>,
    _key: PhantomData<K>,
}

impl<K, V> CacheBuilder<K, V>
where
    K: Hash + Eq + Clone,
{
    /// Start from the default config
    pub fn new() -> Self {
        Self::from_config(CacheConfig::default())
    }

    /// Start from an existing config
    pub fn from_config(config: CacheConfig) -> Self {
        Self {
            config,
            on_evict: None,
            _key: PhantomData,
        }
    }

    /// Set the maximum number of entries
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.config.capacity = capacity;
        self
    }

    /// Set the callback invoked with each value evicted for capacity
    pub fn on_evict<F>(mut self, callback: F) -> Self
    where
        F: FnMut(V) + 'static,
    {
        self.on_evict = Some(Box::new(callback));
        self
    }

    /// Validate the config and create the cache
    pub fn build(self) -> Result<LruCache<K, V>> {
        LruCache::from_parts(self.config, self.on_evict)
    }
}

impl<K, V> Default for CacheBuilder<K, V>
where
    K: Hash + Eq + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> fmt::Debug for CacheBuilder<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheBuilder")
            .field("config", &self.config)
            .field("on_evict", &self.on_evict.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_capacity() {
        assert_eq!(CacheConfig::default().capacity, DEFAULT_CAPACITY);
        assert_eq!(DEFAULT_CAPACITY, 1000);
    }

    #[test]
    fn test_validate_rejects_zero() {
        let err = CacheConfig::new(0).validate().unwrap_err();
        assert!(matches!(err, Error::InvalidConfiguration(_)));
        assert!(CacheConfig::new(1).validate().is_ok());
    }

    #[test]
    fn test_builder_defaults() {
        let cache = CacheBuilder::<u32, u32>::new().build().unwrap();
        assert_eq!(cache.capacity(), DEFAULT_CAPACITY);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_builder_zero_capacity() {
        let result = CacheBuilder::<u32, u32>::new().capacity(0).build();
        assert!(result.is_err());
    }

    #[test]
    fn test_builder_with_callback() {
        use std::cell::RefCell;
        use std::rc::Rc;

        let evicted = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&evicted);

        let mut cache = CacheBuilder::from_config(CacheConfig::new(1))
            .on_evict(move |v| sink.borrow_mut().push(v))
            .build()
            .unwrap();

        cache.put("a", 1);
        cache.put("b", 2);

        assert_eq!(*evicted.borrow(), vec![1]);
    }
}
