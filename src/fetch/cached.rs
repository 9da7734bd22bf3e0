//! Cached fetch
//!
//! "Check the cache, call the API on a miss, store the result": the pattern
//! every integration wraps around its remote calls. Concurrent misses for one
//! key share a single fetch and rate limits are retried per [`RetryPolicy`].

use std::future::Future;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::cache::ResponseCache;
use crate::error::{FetchError, FetchResult};
use crate::inflight::InFlight;
use crate::retry::{with_backoff, RetryPolicy};

/// Memoizing front for remote calls.
#[derive(Clone)]
pub struct CachedFetcher {
    cache: ResponseCache,
    inflight: InFlight<Value>,
    retry: RetryPolicy,
}

impl CachedFetcher {
    pub fn new(cache: ResponseCache, retry: RetryPolicy) -> Self {
        Self {
            cache,
            inflight: InFlight::new(),
            retry,
        }
    }

    pub fn cache(&self) -> &ResponseCache {
        &self.cache
    }

    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }

    /// Returns the cached value for `key`, or runs `op` and caches its result
    /// for `ttl` (the cache default when `None`).
    ///
    /// `op` may run several times when rate limited. Failures are returned to
    /// every waiting caller and are never cached.
    pub async fn get_or_fetch<F, Fut>(&self, key: &str, ttl: Option<Duration>, op: F) -> FetchResult<Value>
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = FetchResult<Value>> + Send + 'static,
    {
        if let Some(value) = self.cache.get(key).await {
            debug!(key = key, "Cache hit");
            return Ok(value);
        }
        debug!(key = key, "Cache miss");

        let cache = self.cache.clone();
        let retry = self.retry.clone();
        let owned_key = key.to_string();

        self.inflight
            .run(key, move || load(cache, retry, owned_key, ttl, op))
            .await
    }

    /// Typed form of [`get_or_fetch`](Self::get_or_fetch); values are stored
    /// as JSON and decoded on the way out.
    pub async fn get_or_fetch_as<T, F, Fut>(&self, key: &str, ttl: Option<Duration>, mut op: F) -> FetchResult<T>
    where
        T: Serialize + DeserializeOwned + Send + 'static,
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = FetchResult<T>> + Send + 'static,
    {
        let value = self
            .get_or_fetch(key, ttl, move || {
                let fut = op();
                async move { serde_json::to_value(fut.await?).map_err(FetchError::from) }
            })
            .await?;

        Ok(serde_json::from_value(value)?)
    }
}

/// Fetches and stores one key; runs inside the in-flight slot.
///
/// A fetch that settled between the caller's miss and this slot opening has
/// already filled the cache, so that value is returned without a second call.
async fn load<F, Fut>(
    cache: ResponseCache,
    retry: RetryPolicy,
    key: String,
    ttl: Option<Duration>,
    op: F,
) -> FetchResult<Value>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = FetchResult<Value>>,
{
    if let Some(value) = cache.get(&key).await {
        debug!(key = %key, "Filled by an earlier fetch");
        return Ok(value);
    }

    let value = with_backoff(&retry, &key, op).await?;
    cache.set(key, value.clone(), ttl).await;
    Ok(value)
}
