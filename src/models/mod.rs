//! Request/response models and persisted records
//!
//! This module defines the DTOs used for serializing/deserializing HTTP
//! bodies, plus the domain records the storage backend persists.

pub mod records;
pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use records::{new_record_id, QrCode, Template, UserPreferences};
pub use requests::{
    CreatePreferencesRequest, CreateQrCodeRequest, CreateTemplateRequest, UpdatePreferencesRequest,
    UpdateQrCodeRequest, UpdateTemplateRequest,
};
pub use responses::{CacheStatsResponse, HealthResponse, MessageResponse};
