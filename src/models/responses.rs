//! Response DTOs for the QR station API
//!
//! Defines the structure of outgoing HTTP response bodies that are not plain
//! records.

use serde::Serialize;

use crate::cache::CacheStats;

// == Cache Stats Response ==
/// Response body for `GET /api/cache/stats`.
///
/// Combines the live cache diagnostics with the static cache configuration.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStatsResponse {
    #[serde(flatten)]
    pub stats: CacheStats,
    /// Configured entry ceiling
    pub max_size: usize,
    /// Configured TTL, human readable (e.g. "10m")
    pub ttl: String,
}

impl CacheStatsResponse {
    /// Creates a response from live stats and the cache configuration.
    pub fn new(stats: CacheStats, max_size: usize, ttl_ms: u64) -> Self {
        Self {
            stats,
            max_size,
            ttl: human_duration(ttl_ms),
        }
    }
}

/// Formats a millisecond duration for display: whole minutes as "Nm",
/// whole seconds as "Ns", anything else as "Nms".
fn human_duration(ms: u64) -> String {
    if ms > 0 && ms % 60_000 == 0 {
        format!("{}m", ms / 60_000)
    } else if ms > 0 && ms % 1000 == 0 {
        format!("{}s", ms / 1000)
    } else {
        format!("{}ms", ms)
    }
}

// == Message Response ==
/// Generic acknowledgement body (e.g. `POST /api/cache/clear`).
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

// == Health Response ==
/// Response body for the health endpoint (GET /health).
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp.
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
