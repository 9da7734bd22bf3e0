//! API Module
//!
//! Admin HTTP surface for the response cache.
//!
//! # Endpoints
//! - `GET /health` - Health check endpoint
//! - `GET /api/cache/stats` - Cache statistics
//! - `GET /api/cache/:key` - Inspect one cached value
//! - `DELETE /api/cache/:key` - Clear one key
//! - `DELETE /api/cache` - Clear everything

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
