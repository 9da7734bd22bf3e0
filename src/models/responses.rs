//! Response DTOs for the admin API
//!
//! Defines the structure of outgoing HTTP response bodies.

use std::time::Duration;

use serde::Serialize;
use serde_json::Value;

use crate::cache::CacheStats;

/// Response body for `GET /api/cache/:key`
#[derive(Debug, Clone, Serialize)]
pub struct CachedValueResponse {
    pub key: String,
    pub value: Value,
    /// Whole seconds until the entry expires
    pub expires_in: u64,
}

impl CachedValueResponse {
    pub fn new(key: impl Into<String>, value: Value, expires_in: Duration) -> Self {
        Self {
            key: key.into(),
            value,
            expires_in: expires_in.as_secs(),
        }
    }
}

/// Response body for both cache clear endpoints
#[derive(Debug, Clone, Serialize)]
pub struct ClearResponse {
    /// Human-readable summary
    pub message: String,
    /// Number of entries removed
    pub removed: usize,
}

impl ClearResponse {
    /// Creates a response for clearing a single key
    pub fn key(key: &str, removed: usize) -> Self {
        Self {
            message: format!("Key '{}' cleared", key),
            removed,
        }
    }

    /// Creates a response for clearing the whole cache
    pub fn all(removed: usize) -> Self {
        Self {
            message: "Cache cleared".to_string(),
            removed,
        }
    }
}

/// Response body for `GET /api/cache/stats`
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    pub hits: u64,
    pub misses: u64,
    /// Stale entries removed on read or by the sweep
    pub expired: u64,
    pub total_entries: usize,
    /// hits / (hits + misses)
    pub hit_rate: f64,
}

impl From<CacheStats> for StatsResponse {
    fn from(stats: CacheStats) -> Self {
        Self {
            hit_rate: stats.hit_rate(),
            hits: stats.hits,
            misses: stats.misses,
            expired: stats.expired,
            total_entries: stats.total_entries,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// `{ "error": message }`, used by failing admin requests and by soft errors
/// embedded in dashboard payloads.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
