//! QR-Code Creation Flow
//!
//! Orchestrates the deduplication cache, the slug allocator and the storage
//! backend for `POST /api/qr-codes`. The cache deduplicates only the
//! rendering work: every create, hit or miss, persists exactly one record.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::cache::{Fingerprint, QrCodeCache};
use crate::error::Result;
use crate::models::{new_record_id, CreateQrCodeRequest, QrCode};
use crate::slug::allocate_slug;
use crate::storage::QrStorage;

/// Creates a QR code, reusing a cached artifact when an identical one was
/// produced recently.
///
/// On a cache hit the cached record is reissued: cloned with a fresh id,
/// fresh timestamps and the caller's own title, then persisted as a new
/// record. On a miss the artifact is built (allocating a redirect slug for
/// dynamic codes), persisted, and only then admitted to the cache, so cached
/// values always correspond to something that was successfully persisted.
pub async fn create_qr_code(
    cache: &RwLock<QrCodeCache>,
    storage: &Arc<dyn QrStorage>,
    public_base_url: &str,
    user_id: &str,
    req: CreateQrCodeRequest,
) -> Result<QrCode> {
    let fingerprint = Fingerprint::of(&req);

    // The cache lock never spans a storage await.
    let cached = cache.write().await.get(&fingerprint);
    if let Some(mut record) = cached {
        debug!(user_id, "cache hit, reissuing cached artifact");
        let now = Utc::now();
        record.id = new_record_id();
        record.user_id = user_id.to_string();
        record.title = req.title;
        record.content_type = req.content_type;
        record.created_at = now;
        record.updated_at = now;
        return Ok(storage.insert_qr_code(record).await?);
    }

    let (payload, short_slug) = if req.is_dynamic {
        let slug = allocate_slug(storage.as_ref()).await?;
        let payload = format!("{}/r/{}", public_base_url.trim_end_matches('/'), slug);
        (payload, Some(slug))
    } else {
        (req.data.clone(), None)
    };

    let now = Utc::now();
    let record = QrCode {
        id: new_record_id(),
        user_id: user_id.to_string(),
        title: req.title.clone(),
        data: req.data.clone(),
        payload,
        content_type: req.content_type.clone(),
        size: req.size,
        fg_color: req.fg_color.clone(),
        bg_color: req.bg_color.clone(),
        include_image: req.include_image,
        is_dynamic: req.is_dynamic,
        short_slug,
        created_at: now,
        updated_at: now,
    };

    let persisted = storage.insert_qr_code(record).await?;
    info!(id = %persisted.id, dynamic = persisted.is_dynamic, "created QR code");

    cache.write().await.set(&fingerprint, persisted.clone());
    Ok(persisted)
}
