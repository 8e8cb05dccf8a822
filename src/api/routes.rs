//! API Routes
//!
//! Configures the Axum router with all QR station endpoints.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    cache_clear_handler, cache_stats_handler, create_preferences_handler,
    create_qr_code_handler, create_template_handler, delete_qr_code_handler,
    delete_template_handler, get_preferences_handler, get_qr_code_handler, get_template_handler,
    health_handler, list_qr_codes_handler, list_templates_handler, redirect_handler,
    update_preferences_handler, update_qr_code_handler, update_template_handler,
    use_template_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `POST /api/qr-codes` - Create a QR code (deduplicated by the cache)
/// - `GET /api/qr-codes` - List the user's QR codes
/// - `GET/PUT/DELETE /api/qr-codes/:id` - Fetch, update, delete one code
/// - `GET /r/:slug` - Dynamic QR redirect
/// - `GET /api/cache/stats`, `POST /api/cache/clear` - Cache administration
/// - Template and preferences CRUD under `/api/templates`, `/api/preferences`
/// - `GET /health` - Health check
///
/// # Middleware
/// - CORS: Allows any origin (configurable for production)
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(
            "/api/qr-codes",
            get(list_qr_codes_handler).post(create_qr_code_handler),
        )
        .route(
            "/api/qr-codes/:id",
            get(get_qr_code_handler)
                .put(update_qr_code_handler)
                .delete(delete_qr_code_handler),
        )
        .route("/r/:slug", get(redirect_handler))
        .route("/api/cache/stats", get(cache_stats_handler))
        .route("/api/cache/clear", post(cache_clear_handler))
        .route(
            "/api/templates",
            get(list_templates_handler).post(create_template_handler),
        )
        .route(
            "/api/templates/:id",
            get(get_template_handler)
                .put(update_template_handler)
                .delete(delete_template_handler),
        )
        .route("/api/templates/:id/use", post(use_template_handler))
        .route(
            "/api/preferences",
            get(get_preferences_handler)
                .post(create_preferences_handler)
                .put(update_preferences_handler),
        )
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
