//! Background Tasks Module
//!
//! Tasks that run for the lifetime of the process.
//!
//! # Tasks
//! - Cache sweep: removes expired cache entries at a fixed interval

mod sweep;

pub use sweep::spawn_sweep_task;
