//! Cache Statistics Module
//!
//! Tracks cache hits, misses, and expired entries removed.

use serde::Serialize;

// == Cache Stats ==
/// Tracks cache effectiveness counters.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CacheStats {
    /// Number of reads that returned a live value
    pub hits: u64,
    /// Number of reads that found nothing or a stale entry
    pub misses: u64,
    /// Number of stale entries removed, lazily or by the sweep
    pub expired: u64,
    /// Current number of stored entries
    pub total_entries: usize,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Returns hits / (hits + misses), or 0.0 if nothing has been read.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    /// Adds `count` removed stale entries.
    pub fn record_expired(&mut self, count: usize) {
        self.expired += count as u64;
    }

    pub fn set_total_entries(&mut self, count: usize) {
        self.total_entries = count;
    }
}
