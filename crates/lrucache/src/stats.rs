//! Cache statistics tracking

/// Counters for cache activity
///
/// `peek`, `contains` and iteration are not counted; only operations that
/// change recency or membership are.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    hits: u64,
    misses: u64,
    inserts: u64,
    updates: u64,
    evictions: u64,
    removals: u64,
}

impl CacheStats {
    /// Create new stats tracker
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub(crate) fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub(crate) fn record_insert(&mut self) {
        self.inserts += 1;
    }

    pub(crate) fn record_update(&mut self) {
        self.updates += 1;
    }

    pub(crate) fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    pub(crate) fn record_removal(&mut self) {
        self.removals += 1;
    }

    /// Get total hits
    pub fn hits(&self) -> u64 {
        self.hits
    }

    /// Get total misses
    pub fn misses(&self) -> u64 {
        self.misses
    }

    /// Get total inserts of new keys
    pub fn inserts(&self) -> u64 {
        self.inserts
    }

    /// Get total value replacements on existing keys
    pub fn updates(&self) -> u64 {
        self.updates
    }

    /// Get total capacity-driven evictions
    pub fn evictions(&self) -> u64 {
        self.evictions
    }

    /// Get total explicit removals
    pub fn removals(&self) -> u64 {
        self.removals
    }

    /// Calculate hit ratio (0.0 to 1.0)
    pub fn hit_ratio(&self) -> f64 {
        let hits = self.hits();
        let total = hits + self.misses();
        if total == 0 {
            0.0
        } else {
            hits as f64 / total as f64
        }
    }

    /// Reset all statistics
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
