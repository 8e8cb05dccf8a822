//! API Handlers
//!
//! HTTP request handlers for the QR station endpoints. Handlers validate
//! payloads, then delegate to the creation flow, the cache or the storage
//! backend.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Redirect,
    Json,
};
use serde::Deserialize;
use tokio::sync::RwLock;

use crate::cache::QrCodeCache;
use crate::config::Config;
use crate::error::{ApiError, Result};
use crate::models::{
    new_record_id, CacheStatsResponse, CreatePreferencesRequest, CreateQrCodeRequest,
    CreateTemplateRequest, HealthResponse, MessageResponse, QrCode, Template,
    UpdatePreferencesRequest, UpdateQrCodeRequest, UpdateTemplateRequest, UserPreferences,
};
use crate::service;
use crate::storage::{MemoryStorage, QrStorage};

// TODO: Replace with real authentication once implemented
const DEMO_USER_ID: &str = "demo-user-id";

/// Application state shared across all handlers.
///
/// The cache is the single process-wide deduplication cache, owned here and
/// handed to the request path by reference; the storage backend sits behind
/// its trait so tests can substitute stubs.
#[derive(Clone)]
pub struct AppState {
    pub cache: Arc<RwLock<QrCodeCache>>,
    pub storage: Arc<dyn QrStorage>,
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates a new AppState from explicit components.
    pub fn new(cache: QrCodeCache, storage: Arc<dyn QrStorage>, config: Config) -> Self {
        Self {
            cache: Arc::new(RwLock::new(cache)),
            storage,
            config: Arc::new(config),
        }
    }

    /// Creates a new AppState from configuration, backed by in-memory storage.
    ///
    /// Fails on invalid cache bounds.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let cache = QrCodeCache::new(config.cache_max_entries, config.cache_ttl_ms)?;
        Ok(Self::new(
            cache,
            Arc::new(MemoryStorage::new()),
            config.clone(),
        ))
    }
}

// == QR Code Handlers ==

/// Handler for POST /api/qr-codes
///
/// Runs the creation flow: cache probe, optional slug allocation, persist.
pub async fn create_qr_code_handler(
    State(state): State<AppState>,
    Json(req): Json<CreateQrCodeRequest>,
) -> Result<(StatusCode, Json<QrCode>)> {
    if let Some(error_msg) = req.validate() {
        return Err(ApiError::Validation(error_msg));
    }

    let record = service::create_qr_code(
        &state.cache,
        &state.storage,
        &state.config.public_base_url,
        DEMO_USER_ID,
        req,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(record)))
}

/// Handler for GET /api/qr-codes
pub async fn list_qr_codes_handler(State(state): State<AppState>) -> Result<Json<Vec<QrCode>>> {
    let records = state.storage.qr_codes_by_user(DEMO_USER_ID).await?;
    Ok(Json(records))
}

/// Handler for GET /api/qr-codes/:id
pub async fn get_qr_code_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<QrCode>> {
    let record = state
        .storage
        .qr_code(&id, DEMO_USER_ID)
        .await?
        .ok_or(ApiError::NotFound("QR code"))?;
    Ok(Json(record))
}

/// Handler for PUT /api/qr-codes/:id
pub async fn update_qr_code_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(updates): Json<UpdateQrCodeRequest>,
) -> Result<Json<QrCode>> {
    if let Some(error_msg) = updates.validate() {
        return Err(ApiError::Validation(error_msg));
    }

    let record = state
        .storage
        .update_qr_code(&id, DEMO_USER_ID, updates)
        .await?
        .ok_or(ApiError::NotFound("QR code"))?;
    Ok(Json(record))
}

/// Handler for DELETE /api/qr-codes/:id
pub async fn delete_qr_code_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    if state.storage.delete_qr_code(&id, DEMO_USER_ID).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound("QR code"))
    }
}

// == Redirect Handler ==

/// Handler for GET /r/:slug
///
/// Resolves a dynamic QR slug straight from storage (slugs are not cache
/// keys) and redirects to the record's current destination.
pub async fn redirect_handler(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Redirect> {
    match state.storage.qr_code_by_slug(&slug).await? {
        Some(record) if record.is_dynamic => Ok(Redirect::temporary(&record.data)),
        _ => Err(ApiError::NotFound("Short link")),
    }
}

// == Cache Handlers ==

/// Handler for GET /api/cache/stats
///
/// Reports live cache diagnostics plus the static cache configuration.
/// Reading stats reconciles expired entries as a side effect.
pub async fn cache_stats_handler(State(state): State<AppState>) -> Json<CacheStatsResponse> {
    let mut cache = state.cache.write().await;
    let stats = cache.stats();
    Json(CacheStatsResponse::new(
        stats,
        cache.max_size(),
        cache.ttl_ms(),
    ))
}

/// Handler for POST /api/cache/clear
pub async fn cache_clear_handler(State(state): State<AppState>) -> Json<MessageResponse> {
    state.cache.write().await.clear();
    Json(MessageResponse::new("Cache cleared"))
}

// == Template Handlers ==

#[derive(Debug, Deserialize)]
pub struct TemplateListParams {
    /// `?public=true` lists the public gallery instead of the user's own
    #[serde(default)]
    pub public: bool,
}

/// Handler for GET /api/templates
pub async fn list_templates_handler(
    State(state): State<AppState>,
    Query(params): Query<TemplateListParams>,
) -> Result<Json<Vec<Template>>> {
    let templates = if params.public {
        state.storage.public_templates().await?
    } else {
        state.storage.templates_by_user(DEMO_USER_ID).await?
    };
    Ok(Json(templates))
}

/// Handler for POST /api/templates
pub async fn create_template_handler(
    State(state): State<AppState>,
    Json(req): Json<CreateTemplateRequest>,
) -> Result<(StatusCode, Json<Template>)> {
    if let Some(error_msg) = req.validate() {
        return Err(ApiError::Validation(error_msg));
    }

    let now = chrono::Utc::now();
    let record = state
        .storage
        .insert_template(Template {
            id: new_record_id(),
            user_id: DEMO_USER_ID.to_string(),
            name: req.name,
            description: req.description,
            options: req.options,
            is_public: req.is_public,
            usage_count: 0,
            created_at: now,
            updated_at: now,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(record)))
}

/// Handler for GET /api/templates/:id
pub async fn get_template_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Template>> {
    let record = state
        .storage
        .template_for_user(&id, DEMO_USER_ID)
        .await?
        .ok_or(ApiError::NotFound("Template"))?;
    Ok(Json(record))
}

/// Handler for POST /api/templates/:id/use
///
/// Bumps the usage counter for templates visible to the caller.
pub async fn use_template_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    state
        .storage
        .template_for_user(&id, DEMO_USER_ID)
        .await?
        .ok_or(ApiError::NotFound("Template"))?;

    state.storage.increment_template_usage(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Handler for PUT /api/templates/:id
pub async fn update_template_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(updates): Json<UpdateTemplateRequest>,
) -> Result<Json<Template>> {
    if let Some(error_msg) = updates.validate() {
        return Err(ApiError::Validation(error_msg));
    }

    let record = state
        .storage
        .update_template(&id, DEMO_USER_ID, updates)
        .await?
        .ok_or(ApiError::NotFound("Template"))?;
    Ok(Json(record))
}

/// Handler for DELETE /api/templates/:id
pub async fn delete_template_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    if state.storage.delete_template(&id, DEMO_USER_ID).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound("Template"))
    }
}

// == Preferences Handlers ==

/// Handler for GET /api/preferences
pub async fn get_preferences_handler(
    State(state): State<AppState>,
) -> Result<Json<UserPreferences>> {
    let prefs = state
        .storage
        .preferences(DEMO_USER_ID)
        .await?
        .ok_or(ApiError::NotFound("User preferences"))?;
    Ok(Json(prefs))
}

/// Handler for POST /api/preferences
pub async fn create_preferences_handler(
    State(state): State<AppState>,
    Json(req): Json<CreatePreferencesRequest>,
) -> Result<(StatusCode, Json<UserPreferences>)> {
    if let Some(error_msg) = req.validate() {
        return Err(ApiError::Validation(error_msg));
    }

    let prefs = state.storage.insert_preferences(DEMO_USER_ID, req).await?;
    Ok((StatusCode::CREATED, Json(prefs)))
}

/// Handler for PUT /api/preferences
pub async fn update_preferences_handler(
    State(state): State<AppState>,
    Json(updates): Json<UpdatePreferencesRequest>,
) -> Result<Json<UserPreferences>> {
    if let Some(error_msg) = updates.validate() {
        return Err(ApiError::Validation(error_msg));
    }

    let prefs = state
        .storage
        .update_preferences(DEMO_USER_ID, updates)
        .await?
        .ok_or(ApiError::NotFound("User preferences"))?;
    Ok(Json(prefs))
}

// == Health Handler ==

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
