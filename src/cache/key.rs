//! Cache key construction.

use serde::Serialize;

/// Builds a `"<namespace>:<serialized-params>"` key.
///
/// Params are serialized with `serde_json`, so struct field order determines
/// the key. Params that fail to serialize fall back to the bare namespace.
pub fn cache_key<P: Serialize + ?Sized>(namespace: &str, params: &P) -> String {
    match serde_json::to_string(params) {
        Ok(serialized) => format!("{}:{}", namespace, serialized),
        Err(_) => namespace.to_string(),
    }
}
