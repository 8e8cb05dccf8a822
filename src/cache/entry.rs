//! Cache Entry Module
//!
//! Defines the structure of individual deduplication cache entries.

use std::time::{SystemTime, UNIX_EPOCH};

use crate::models::QrCode;

// == Cache Entry ==
/// A single cached QR-code result with its bookkeeping metadata.
///
/// The entry owns a snapshot of the record; callers of the cache always
/// receive clones, so mutating a returned record never corrupts the cache.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The cached record snapshot
    pub value: QrCode,
    /// Creation timestamp (Unix milliseconds)
    pub created_at: u64,
    /// Number of lookups that returned this entry; eviction ranks by this
    pub hits: u64,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new entry with a zero hit count, stamped with the current time.
    pub fn new(value: QrCode) -> Self {
        Self {
            value,
            created_at: current_timestamp_ms(),
            hits: 0,
        }
    }

    // == Is Expired ==
    /// Checks whether the entry has outlived `ttl_ms` at time `now`.
    ///
    /// An entry is expired strictly after its TTL elapses: at age exactly
    /// `ttl_ms` it is still fresh, one millisecond later it is gone.
    pub fn is_expired(&self, ttl_ms: u64, now: u64) -> bool {
        self.age_ms(now) > ttl_ms
    }

    // == Age ==
    /// Entry age in milliseconds at time `now`.
    pub fn age_ms(&self, now: u64) -> u64 {
        now.saturating_sub(self.created_at)
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
pub fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("Time went backwards")
        .as_millis() as u64
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn sample_record() -> QrCode {
        let now = Utc::now();
        QrCode {
            id: "qr-1".to_string(),
            user_id: "user-1".to_string(),
            title: "Test".to_string(),
            data: "https://example.com".to_string(),
            payload: "https://example.com".to_string(),
            content_type: "url".to_string(),
            size: 300,
            fg_color: "#000000".to_string(),
            bg_color: "#ffffff".to_string(),
            include_image: false,
            is_dynamic: false,
            short_slug: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_entry_starts_with_zero_hits() {
        let entry = CacheEntry::new(sample_record());
        assert_eq!(entry.hits, 0);
    }

    #[test]
    fn test_expiry_boundary() {
        let entry = CacheEntry {
            value: sample_record(),
            created_at: 1_000,
            hits: 0,
        };

        // Fresh one millisecond before the TTL elapses
        assert!(!entry.is_expired(100, 1_099));
        // Still fresh at exactly TTL (strict comparison)
        assert!(!entry.is_expired(100, 1_100));
        // Expired one millisecond past the TTL
        assert!(entry.is_expired(100, 1_101));
    }

    #[test]
    fn test_age_saturates_for_clock_skew() {
        let entry = CacheEntry {
            value: sample_record(),
            created_at: 5_000,
            hits: 0,
        };
        assert_eq!(entry.age_ms(4_000), 0);
    }

    #[test]
    fn test_age_ms() {
        let entry = CacheEntry {
            value: sample_record(),
            created_at: 1_000,
            hits: 0,
        };
        assert_eq!(entry.age_ms(3_500), 2_500);
    }
}
