//! Cache Entry Module
//!
//! Defines a single cached response with its absolute expiration instant.

use std::time::Duration;

use serde_json::Value;
use tokio::time::Instant;

/// Longest lifetime an entry can be given; longer TTLs are cut to this.
pub const MAX_TTL: Duration = Duration::from_secs(365 * 24 * 60 * 60);

// == Cache Entry ==
/// A cached JSON payload and the instant after which it is treated as absent.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The stored payload
    pub value: Value,
    /// Instant at which the entry becomes stale
    pub expires_at: Instant,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates an entry that expires `ttl` from now, capped at [`MAX_TTL`].
    pub fn new(value: Value, ttl: Duration) -> Self {
        let now = Instant::now();
        Self {
            value,
            expires_at: now + ttl.min(MAX_TTL),
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// Boundary condition: an entry is expired once the current time is
    /// greater than or equal to its expiration instant, so a TTL of N seconds
    /// is readable for strictly less than N seconds.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }

    /// Same as [`is_expired`](Self::is_expired) against a caller-supplied instant.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        now >= self.expires_at
    }

    // == Time To Live ==
    /// Returns the remaining lifetime, zero once expired.
    pub fn ttl_remaining(&self) -> Duration {
        self.expires_at.saturating_duration_since(Instant::now())
    }
}
