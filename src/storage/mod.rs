//! Storage Module
//!
//! The persistence seam. `QrStorage` is the contract the HTTP layer, the
//! creation flow and the slug allocator program against; `MemoryStorage` is
//! the in-process implementation used by the stand-alone binary and tests.

mod memory;

use async_trait::async_trait;

use crate::error::StorageError;
use crate::models::{
    CreatePreferencesRequest, QrCode, Template, UpdatePreferencesRequest, UpdateQrCodeRequest,
    UpdateTemplateRequest, UserPreferences,
};

pub use memory::MemoryStorage;

// == Storage Trait ==
/// Persistent store for QR codes, templates and user preferences.
///
/// Records are keyed by opaque string ids and scoped by owner id. Slug
/// uniqueness for dynamic codes is probed through `qr_code_by_slug`; a real
/// backend is expected to additionally enforce it with a write-path
/// constraint, since the optimistic allocator only trusts a single read.
#[async_trait]
pub trait QrStorage: Send + Sync {
    // == QR Codes ==
    /// Persists a fully constructed record and returns it.
    async fn insert_qr_code(&self, record: QrCode) -> Result<QrCode, StorageError>;

    /// All codes owned by a user, most recently updated first.
    async fn qr_codes_by_user(&self, user_id: &str) -> Result<Vec<QrCode>, StorageError>;

    /// One code by id, scoped to its owner.
    async fn qr_code(&self, id: &str, user_id: &str) -> Result<Option<QrCode>, StorageError>;

    /// One code by redirect slug, unscoped (redirects are public).
    async fn qr_code_by_slug(&self, slug: &str) -> Result<Option<QrCode>, StorageError>;

    /// Applies partial updates; returns the updated record or None if absent.
    async fn update_qr_code(
        &self,
        id: &str,
        user_id: &str,
        updates: UpdateQrCodeRequest,
    ) -> Result<Option<QrCode>, StorageError>;

    /// Deletes a code; returns whether a record was removed.
    async fn delete_qr_code(&self, id: &str, user_id: &str) -> Result<bool, StorageError>;

    // == Templates ==
    async fn insert_template(&self, record: Template) -> Result<Template, StorageError>;

    /// Templates owned by a user, most recently updated first.
    async fn templates_by_user(&self, user_id: &str) -> Result<Vec<Template>, StorageError>;

    /// Public templates, most used first.
    async fn public_templates(&self) -> Result<Vec<Template>, StorageError>;

    /// A template visible to this user: owned by them or public.
    async fn template_for_user(
        &self,
        id: &str,
        user_id: &str,
    ) -> Result<Option<Template>, StorageError>;

    async fn update_template(
        &self,
        id: &str,
        user_id: &str,
        updates: UpdateTemplateRequest,
    ) -> Result<Option<Template>, StorageError>;

    async fn delete_template(&self, id: &str, user_id: &str) -> Result<bool, StorageError>;

    async fn increment_template_usage(&self, id: &str) -> Result<(), StorageError>;

    // == Preferences ==
    async fn preferences(&self, user_id: &str) -> Result<Option<UserPreferences>, StorageError>;

    async fn insert_preferences(
        &self,
        user_id: &str,
        prefs: CreatePreferencesRequest,
    ) -> Result<UserPreferences, StorageError>;

    async fn update_preferences(
        &self,
        user_id: &str,
        updates: UpdatePreferencesRequest,
    ) -> Result<Option<UserPreferences>, StorageError>;
}
