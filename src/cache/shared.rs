//! Shared Cache Handle
//!
//! A cloneable handle over one [`CacheStore`], created at startup and handed to
//! every consumer that needs cached responses.

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tokio::sync::RwLock;

use crate::cache::{CacheStats, CacheStore};

/// Thread-safe handle to the process-wide response cache.
///
/// Cloning is cheap and every clone sees the same entries. The lock is only
/// held for in-memory work.
#[derive(Debug, Clone)]
pub struct ResponseCache {
    inner: Arc<RwLock<CacheStore>>,
}

impl ResponseCache {
    pub fn new(default_ttl: Duration) -> Self {
        Self::from_store(CacheStore::new(default_ttl))
    }

    pub fn from_store(store: CacheStore) -> Self {
        Self {
            inner: Arc::new(RwLock::new(store)),
        }
    }

    /// Returns the live value for `key`, purging it if stale.
    pub async fn get(&self, key: &str) -> Option<Value> {
        self.inner.write().await.get(key)
    }

    /// Returns the live value for `key` and its remaining lifetime.
    pub async fn get_with_ttl(&self, key: &str) -> Option<(Value, Duration)> {
        self.inner.write().await.get_with_ttl(key)
    }

    /// Stores `value` for `ttl`, or for the default TTL when `ttl` is `None`.
    pub async fn set(&self, key: impl Into<String>, value: Value, ttl: Option<Duration>) {
        let mut store = self.inner.write().await;
        match ttl {
            Some(ttl) => store.set(key, value, ttl),
            None => store.set_default(key, value),
        }
    }

    /// Removes one key, or everything when `key` is `None`.
    pub async fn clear(&self, key: Option<&str>) -> usize {
        self.inner.write().await.clear(key)
    }

    /// Removes all expired entries.
    pub async fn sweep(&self) -> usize {
        self.inner.write().await.sweep()
    }

    pub async fn stats(&self) -> CacheStats {
        self.inner.read().await.stats()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_clones_share_entries() {
        let cache = ResponseCache::new(Duration::from_secs(60));
        let other = cache.clone();

        cache.set("gitlab:events", json!([1, 2, 3]), None).await;

        assert_eq!(other.get("gitlab:events").await, Some(json!([1, 2, 3])));
        assert_eq!(other.len().await, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_default_ttl_applies_when_none() {
        let cache = ResponseCache::new(Duration::from_secs(10));

        cache.set("k", json!(1), None).await;
        tokio::time::advance(Duration::from_secs(9)).await;
        assert!(cache.get("k").await.is_some());

        tokio::time::advance(Duration::from_secs(1)).await;
        assert!(cache.get("k").await.is_none());
        assert!(cache.is_empty().await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_get_with_ttl_reports_remaining_lifetime() {
        let cache = ResponseCache::new(Duration::from_secs(60));
        cache.set("jira:boards", json!([7]), Some(Duration::from_secs(120))).await;

        tokio::time::advance(Duration::from_secs(20)).await;

        assert_eq!(
            cache.get_with_ttl("jira:boards").await,
            Some((json!([7]), Duration::from_secs(100)))
        );
        assert_eq!(cache.stats().await.hits, 1);
    }

    #[tokio::test]
    async fn test_clear_all_through_handle() {
        let cache = ResponseCache::new(Duration::from_secs(60));
        cache.set("a", json!(1), None).await;
        cache.set("b", json!(2), Some(Duration::from_secs(5))).await;

        assert_eq!(cache.clear(None).await, 2);
        assert_eq!(cache.stats().await.total_entries, 0);
    }
}
