//! API Module
//!
//! HTTP handlers and routing for the QR station REST API.
//!
//! # Endpoints
//! - `POST /api/qr-codes` - Create a QR code through the deduplication cache
//! - `GET /api/qr-codes`, `GET/PUT/DELETE /api/qr-codes/:id` - QR code CRUD
//! - `GET /r/:slug` - Dynamic QR redirect
//! - `GET /api/cache/stats`, `POST /api/cache/clear` - Cache administration
//! - `/api/templates`, `/api/preferences` - Template and preferences CRUD
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::AppState;
pub use routes::create_router;
