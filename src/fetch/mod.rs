//! Fetch Module
//!
//! Vendor HTTP client, the cached/deduplicated/retried fetch path built on
//! top of it, and conversion of failures into soft error payloads.

mod cached;
mod client;
mod soft;

pub use cached::CachedFetcher;
pub use client::{parse_retry_after, ApiClient};
pub use soft::soften;
