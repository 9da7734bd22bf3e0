//! Metrics Cache - backend core of an engineering-metrics dashboard
//!
//! Provides the TTL response cache, rate-limit retry and request
//! deduplication that sit in front of the Adobe Analytics, Jira, GitLab and
//! GitHub APIs.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod inflight;
pub mod models;
pub mod retry;
pub mod tasks;

pub use api::AppState;
pub use cache::{cache_key, ResponseCache};
pub use config::Config;
pub use error::{FetchError, FetchResult};
pub use fetch::{soften, ApiClient, CachedFetcher};
pub use retry::{with_backoff, RetryPolicy};
pub use tasks::spawn_sweep_task;
