//! Background Tasks Module
//!
//! Contains background tasks that run periodically during server operation.
//!
//! # Tasks
//! - Cache cleanup: sweeps expired deduplication-cache entries at configured
//!   intervals

mod cleanup;

pub use cleanup::spawn_cleanup_task;
