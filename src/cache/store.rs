//! Cache Store Module
//!
//! TTL-keyed HashMap of JSON payloads with lazy eviction on read and a bulk
//! sweep for keys nobody reads again.

use std::collections::HashMap;
use std::time::Duration;

use serde_json::Value;
use tokio::time::Instant;

use crate::cache::{CacheEntry, CacheStats};

// == Cache Store ==
/// Process-local response cache with per-entry expiration.
///
/// Keys are opaque strings; values are never inspected.
#[derive(Debug)]
pub struct CacheStore {
    entries: HashMap<String, CacheEntry>,
    stats: CacheStats,
    /// TTL applied by [`set_default`](Self::set_default)
    default_ttl: Duration,
}

impl CacheStore {
    // == Constructor ==
    /// Creates an empty store whose `set_default` uses `default_ttl`.
    pub fn new(default_ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            stats: CacheStats::new(),
            default_ttl,
        }
    }

    // == Set ==
    /// Stores `value` under `key`, expiring `ttl` from now.
    ///
    /// An existing entry is overwritten and its expiration reset.
    pub fn set(&mut self, key: impl Into<String>, value: Value, ttl: Duration) {
        self.entries.insert(key.into(), CacheEntry::new(value, ttl));
        self.stats.set_total_entries(self.entries.len());
    }

    /// Stores `value` under `key` with the store's default TTL.
    pub fn set_default(&mut self, key: impl Into<String>, value: Value) {
        let ttl = self.default_ttl;
        self.set(key, value, ttl);
    }

    // == Get ==
    /// Returns the live value for `key`, or `None`.
    ///
    /// A stale entry is removed before reporting the miss.
    pub fn get(&mut self, key: &str) -> Option<Value> {
        self.get_with_ttl(key).map(|(value, _)| value)
    }

    /// Like [`get`](Self::get), also returning how long the value stays live.
    pub fn get_with_ttl(&mut self, key: &str) -> Option<(Value, Duration)> {
        let expired = match self.entries.get(key) {
            Some(entry) if !entry.is_expired() => {
                self.stats.record_hit();
                return Some((entry.value.clone(), entry.ttl_remaining()));
            }
            Some(_) => true,
            None => false,
        };

        if expired {
            self.entries.remove(key);
            self.stats.record_expired(1);
            self.stats.set_total_entries(self.entries.len());
        }
        self.stats.record_miss();
        None
    }

    // == Clear ==
    /// Removes `key`, or every entry when `key` is `None`.
    ///
    /// Returns how many entries were removed.
    pub fn clear(&mut self, key: Option<&str>) -> usize {
        let removed = match key {
            Some(key) => usize::from(self.entries.remove(key).is_some()),
            None => {
                let count = self.entries.len();
                self.entries.clear();
                count
            }
        };
        self.stats.set_total_entries(self.entries.len());
        removed
    }

    // == Sweep ==
    /// Removes every expired entry and returns the number removed.
    pub fn sweep(&mut self) -> usize {
        let now = Instant::now();
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired_at(now));
        let removed = before - self.entries.len();

        self.stats.record_expired(removed);
        self.stats.set_total_entries(self.entries.len());
        removed
    }

    // == Stats ==
    /// Returns a snapshot of the current statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    /// Number of stored entries, including expired ones not yet removed.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
