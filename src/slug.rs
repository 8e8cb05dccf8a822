//! Short Slug Allocator
//!
//! Produces the 8-character random identifiers used in dynamic QR redirect
//! URLs. Allocation is optimistic: each candidate is checked against the
//! store with a single read, and a concurrent allocator could read "free"
//! for the same candidate before either write lands. A real backend's
//! uniqueness constraint is the safety net for that race; this module only
//! bounds the probe count.

use async_trait::async_trait;
use rand::{distributions::Alphanumeric, Rng};

use crate::error::{ApiError, StorageError};
use crate::storage::QrStorage;

// == Constants ==
/// Slug length in characters, drawn from `[A-Za-z0-9]`.
pub const SLUG_LEN: usize = 8;

/// Probe budget before allocation fails. Prevents unbounded loops against a
/// pathological or adversarial store.
pub const MAX_ATTEMPTS: u32 = 10;

// == Slug Probe ==
/// Uniqueness probe against the store. Narrower than `QrStorage` so tests
/// can stub collision behavior without a full backend; any `dyn QrStorage`
/// acts as a probe through its slug lookup.
#[async_trait]
pub trait SlugProbe: Send + Sync {
    /// Whether any live record already uses this slug.
    async fn is_taken(&self, slug: &str) -> Result<bool, StorageError>;
}

#[async_trait]
impl SlugProbe for dyn QrStorage {
    async fn is_taken(&self, slug: &str) -> Result<bool, StorageError> {
        Ok(self.qr_code_by_slug(slug).await?.is_some())
    }
}

// == Allocation ==
/// Allocates a slug no live record uses.
///
/// Draws up to `MAX_ATTEMPTS` random candidates, probing the store once per
/// candidate and returning the first free one. All attempts colliding is a
/// hard failure of the enclosing create operation; the allocator never
/// retries beyond its budget. Stateless and reentrant.
pub async fn allocate_slug<S: SlugProbe + ?Sized>(store: &S) -> Result<String, ApiError> {
    for _ in 0..MAX_ATTEMPTS {
        let candidate = random_slug();
        if !store.is_taken(&candidate).await? {
            return Ok(candidate);
        }
    }
    Err(ApiError::SlugExhausted(MAX_ATTEMPTS))
}

/// Draws `SLUG_LEN` characters uniformly from the 62-symbol alphabet.
fn random_slug() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(SLUG_LEN)
        .map(char::from)
        .collect()
}
