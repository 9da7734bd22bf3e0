//! Cache Module
//!
//! Process-local response cache with per-entry TTL, lazy eviction on read and
//! a periodic sweep.

mod entry;
mod key;
mod shared;
mod stats;
mod store;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use entry::{CacheEntry, MAX_TTL};
pub use key::cache_key;
pub use shared::ResponseCache;
pub use stats::CacheStats;
pub use store::CacheStore;
