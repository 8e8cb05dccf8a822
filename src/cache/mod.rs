//! Cache Module
//!
//! Request-deduplication cache for QR generation: fingerprint keying, TTL
//! expiration and least-hit-count eviction.

mod entry;
mod fingerprint;
mod stats;
mod store;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use entry::CacheEntry;
pub use fingerprint::Fingerprint;
pub use stats::{CacheStats, EntrySnapshot, KEY_PREVIEW_LEN};
pub use store::{InvalidCacheConfig, QrCodeCache, DEFAULT_MAX_SIZE, DEFAULT_TTL_MS};
