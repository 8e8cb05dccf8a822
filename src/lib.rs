//! QR Station - a QR-code generation web service
//!
//! Deduplicates identical QR-generation requests through a TTL/hit-count
//! cache and issues collision-checked short slugs for dynamic codes.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod service;
pub mod slug;
pub mod storage;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
pub use tasks::spawn_cleanup_task;
