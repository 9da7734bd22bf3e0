//! In-flight request deduplication
//!
//! At most one computation per key runs at a time. Callers arriving while it
//! is pending await the same shared future; the slot is dropped as soon as the
//! computation settles so the next caller starts fresh.

use std::any::Any;
use std::collections::HashMap;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::future::{BoxFuture, FutureExt, Shared};
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::error::{FetchError, FetchResult};

type SharedFetch<T> = Shared<BoxFuture<'static, FetchResult<T>>>;

/// Map of keys to pending computations.
///
/// The computation runs on its own task, so it completes even if every caller
/// waiting on it is dropped.
pub struct InFlight<T> {
    slots: Arc<Mutex<HashMap<String, SharedFetch<T>>>>,
}

impl<T> Clone for InFlight<T> {
    fn clone(&self) -> Self {
        Self {
            slots: Arc::clone(&self.slots),
        }
    }
}

impl<T> Default for InFlight<T> {
    fn default() -> Self {
        Self {
            slots: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

impl<T> InFlight<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `make()` for `key` unless a computation for it is already pending,
    /// in which case the pending result is awaited instead.
    ///
    /// `make` is only called by the caller that starts the computation.
    pub async fn run<F, Fut>(&self, key: &str, make: F) -> FetchResult<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = FetchResult<T>> + Send + 'static,
    {
        let shared = {
            let mut slots = self.slots.lock().await;
            match slots.get(key) {
                Some(pending) => {
                    debug!(key = key, "Joining in-flight request");
                    pending.clone()
                }
                None => {
                    let shared = self.start(key.to_string(), make());
                    slots.insert(key.to_string(), shared.clone());
                    shared
                }
            }
        };

        shared.await
    }

    /// Spawns `work` and returns a shareable handle to its result. The task
    /// removes its own slot once `work` settles, panics included; it cannot
    /// observe the map before the caller's insert because the caller still
    /// holds the lock.
    fn start<Fut>(&self, key: String, work: Fut) -> SharedFetch<T>
    where
        Fut: Future<Output = FetchResult<T>> + Send + 'static,
    {
        let slots = Arc::clone(&self.slots);
        let handle = tokio::spawn(async move {
            let result = AssertUnwindSafe(work)
                .catch_unwind()
                .await
                .unwrap_or_else(|panic| {
                    warn!(key = %key, "In-flight request panicked");
                    Err(FetchError::Internal(format!(
                        "fetch task panicked: {}",
                        panic_message(panic.as_ref())
                    )))
                });
            slots.lock().await.remove(&key);
            result
        });

        async move {
            handle
                .await
                .unwrap_or_else(|e| Err(FetchError::Internal(format!("fetch task failed: {}", e))))
        }
        .boxed()
        .shared()
    }

    /// Number of keys with a pending computation.
    pub async fn pending(&self) -> usize {
        self.slots.lock().await.len()
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> &str {
    if let Some(msg) = panic.downcast_ref::<&'static str>() {
        msg
    } else if let Some(msg) = panic.downcast_ref::<String>() {
        msg
    } else {
        "unknown panic"
    }
}
