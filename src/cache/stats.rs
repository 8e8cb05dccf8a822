//! Cache Statistics Module
//!
//! Diagnostic snapshot types reported by the stats endpoint.

use serde::Serialize;

/// How many characters of a cache key survive into diagnostics output.
/// Keys embed the full request payload, so they are truncated to avoid
/// leaking content into logs and metrics.
pub const KEY_PREVIEW_LEN: usize = 50;

// == Entry Snapshot ==
/// Diagnostic view of one cache entry.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntrySnapshot {
    /// Truncated key preview
    pub key: String,
    /// Lookup count for this entry
    pub hits: u64,
    /// Entry age in milliseconds
    pub age_ms: u64,
}

impl EntrySnapshot {
    /// Builds a snapshot, truncating the key to its preview length.
    pub fn new(key: &str, hits: u64, age_ms: u64) -> Self {
        Self {
            key: format!("{}...", key.chars().take(KEY_PREVIEW_LEN).collect::<String>()),
            hits,
            age_ms,
        }
    }
}

// == Cache Stats ==
/// Aggregate cache diagnostics.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStats {
    /// Number of live (unexpired) entries
    pub size: usize,
    /// Total hits divided by entry count (average hits per resident entry),
    /// 0 when the cache is empty
    pub hit_rate: f64,
    /// Per-entry diagnostics
    pub entries: Vec<EntrySnapshot>,
}
