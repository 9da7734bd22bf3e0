//! Soft errors
//!
//! Dashboard sections render independently, so a failing data source is
//! reported inside the JSON payload instead of failing the whole response.

use serde::Serialize;
use serde_json::Value;
use tracing::warn;

use crate::error::FetchResult;
use crate::models::ErrorResponse;

/// Converts a fetch result into the payload sent to the frontend: the value
/// itself on success, `{ "error": message }` on failure.
pub fn soften<T: Serialize>(source: &str, result: FetchResult<T>) -> Value {
    let outcome = result.and_then(|value| Ok(serde_json::to_value(value)?));

    match outcome {
        Ok(value) => value,
        Err(err) => {
            warn!(source = source, "Data source failed: {}", err);
            error_payload(err.to_string())
        }
    }
}

fn error_payload(message: String) -> Value {
    serde_json::to_value(ErrorResponse::new(message.clone()))
        .unwrap_or_else(|_| Value::String(message))
}
