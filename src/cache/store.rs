//! Deduplication Cache Store
//!
//! In-memory cache that deduplicates identical QR-generation requests within
//! a bounded entry count and time window. Entries are ranked for eviction by
//! hit count: a frequently reused artifact survives, a never-reused one is
//! the first to go.

use std::collections::BTreeMap;

use thiserror::Error;
use tracing::debug;

use crate::cache::entry::{current_timestamp_ms, CacheEntry};
use crate::cache::stats::{CacheStats, EntrySnapshot};
use crate::cache::Fingerprint;
use crate::models::QrCode;

// == Defaults ==
/// Default entry ceiling when no configuration is supplied.
pub const DEFAULT_MAX_SIZE: usize = 100;
/// Default TTL (5 minutes) when no configuration is supplied.
pub const DEFAULT_TTL_MS: u64 = 300_000;

// == Configuration Error ==
/// Rejected cache bounds. Raised only at construction; the cache itself
/// never fails at runtime.
#[derive(Error, Debug)]
#[error("cache bounds must be positive (max_size={max_size}, ttl_ms={ttl_ms})")]
pub struct InvalidCacheConfig {
    pub max_size: usize,
    pub ttl_ms: u64,
}

// == QR Code Cache ==
/// TTL/capacity-bounded deduplication cache keyed by request fingerprint.
///
/// Expired entries are reconciled lazily: every accessor that reports
/// counts (`len`, `stats`) and every `set` first purges entries past their
/// TTL, so reported sizes only ever count live entries. A `BTreeMap` keeps
/// iteration order deterministic, which makes eviction tie-breaking
/// reproducible (lowest key among equal hit counts).
#[derive(Debug)]
pub struct QrCodeCache {
    /// Canonical fingerprint key to entry
    entries: BTreeMap<String, CacheEntry>,
    /// Maximum number of entries admitted
    max_size: usize,
    /// Entry time-to-live in milliseconds
    ttl_ms: u64,
}

impl QrCodeCache {
    // == Constructors ==
    /// Creates a cache with explicit bounds.
    ///
    /// Fails fast on zero bounds rather than silently accepting a cache
    /// that can never hold or retain anything.
    pub fn new(max_size: usize, ttl_ms: u64) -> Result<Self, InvalidCacheConfig> {
        if max_size == 0 || ttl_ms == 0 {
            return Err(InvalidCacheConfig { max_size, ttl_ms });
        }
        Ok(Self {
            entries: BTreeMap::new(),
            max_size,
            ttl_ms,
        })
    }

    /// Creates a cache with the generic-layer defaults (100 entries, 5 minutes).
    pub fn with_defaults() -> Self {
        Self {
            entries: BTreeMap::new(),
            max_size: DEFAULT_MAX_SIZE,
            ttl_ms: DEFAULT_TTL_MS,
        }
    }

    // == Get ==
    /// Looks up a previously cached result for this request shape.
    ///
    /// A fresh hit increments the entry's hit count and returns a clone of
    /// the stored record; the cache keeps its own snapshot. An expired entry
    /// is removed on access and reported as a miss.
    pub fn get(&mut self, fp: &Fingerprint) -> Option<QrCode> {
        let key = fp.canonical_key();
        let now = current_timestamp_ms();

        let entry = self.entries.get_mut(&key)?;
        if entry.is_expired(self.ttl_ms, now) {
            self.entries.remove(&key);
            return None;
        }

        entry.hits += 1;
        Some(entry.value.clone())
    }

    // == Has ==
    /// Existence probe with `get`'s expiry semantics but without the hit
    /// increment, so probing never affects eviction ranking.
    pub fn has(&mut self, fp: &Fingerprint) -> bool {
        let key = fp.canonical_key();
        let now = current_timestamp_ms();

        match self.entries.get(&key) {
            Some(entry) if entry.is_expired(self.ttl_ms, now) => {
                self.entries.remove(&key);
                false
            }
            Some(_) => true,
            None => false,
        }
    }

    // == Set ==
    /// Stores a result under this request shape.
    ///
    /// Sweeps all expired entries first, then frees exactly one slot by
    /// least-hit-count eviction if the cache is still at capacity. Only one
    /// entry is evicted per insertion. The new entry starts with zero hits.
    pub fn set(&mut self, fp: &Fingerprint, value: QrCode) {
        let key = fp.canonical_key();

        self.purge_expired();

        if self.entries.len() >= self.max_size {
            self.evict_least_used();
        }

        self.entries.insert(key, CacheEntry::new(value));
    }

    // == Clear ==
    /// Removes all entries unconditionally.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    // == Length ==
    /// Number of live entries.
    ///
    /// Not a pure read: expired entries are purged first so the count only
    /// reflects entries a `get` could still return.
    pub fn len(&mut self) -> usize {
        self.purge_expired();
        self.entries.len()
    }

    /// True when no live entries remain. Purges expired entries like `len`.
    pub fn is_empty(&mut self) -> bool {
        self.len() == 0
    }

    // == Accessors ==
    /// Configured entry ceiling.
    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// Configured TTL in milliseconds.
    pub fn ttl_ms(&self) -> u64 {
        self.ttl_ms
    }

    // == Stats ==
    /// Diagnostic snapshot of the live entries.
    ///
    /// Purges expired entries first. The hit rate is total hits divided by
    /// entry count (average hits per resident entry), 0 when empty. Keys are
    /// truncated in the per-entry listing to avoid leaking payload content.
    pub fn stats(&mut self) -> CacheStats {
        self.purge_expired();
        let now = current_timestamp_ms();

        let entries: Vec<EntrySnapshot> = self
            .entries
            .iter()
            .map(|(key, entry)| EntrySnapshot::new(key, entry.hits, entry.age_ms(now)))
            .collect();

        let total_hits: u64 = entries.iter().map(|e| e.hits).sum();
        let hit_rate = if entries.is_empty() {
            0.0
        } else {
            total_hits as f64 / entries.len() as f64
        };

        CacheStats {
            size: self.entries.len(),
            hit_rate,
            entries,
        }
    }

    // == Purge Expired ==
    /// Removes every entry past its TTL. Returns the number removed.
    ///
    /// O(n) in the current entry count, which is bounded by `max_size`.
    pub fn purge_expired(&mut self) -> usize {
        let now = current_timestamp_ms();
        let before = self.entries.len();
        self.entries
            .retain(|_, entry| !entry.is_expired(self.ttl_ms, now));
        before - self.entries.len()
    }

    // == Evict Least Used ==
    /// Removes the single entry with the lowest hit count.
    ///
    /// Ties resolve to the first entry in key order. Entries that were never
    /// re-requested (zero hits) are the prime candidates, biasing the cache
    /// toward keeping frequently reused artifacts.
    fn evict_least_used(&mut self) {
        let victim = self
            .entries
            .iter()
            .min_by_key(|(_, entry)| entry.hits)
            .map(|(key, _)| key.clone());

        if let Some(key) = victim {
            let key_prefix: String = key.chars().take(16).collect();
            debug!(%key_prefix, "evicting least-used cache entry");
            self.entries.remove(&key);
        }
    }
}
