//! In-Memory Storage Backend
//!
//! HashMap-backed implementation of `QrStorage`. Serves the stand-alone
//! binary and tests; contents do not survive a restart.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::error::StorageError;
use crate::models::{
    new_record_id, CreatePreferencesRequest, QrCode, Template, UpdatePreferencesRequest,
    UpdateQrCodeRequest, UpdateTemplateRequest, UserPreferences,
};
use crate::storage::QrStorage;

// == Memory Storage ==
/// Thread-safe in-memory record store.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    qr_codes: RwLock<HashMap<String, QrCode>>,
    templates: RwLock<HashMap<String, Template>>,
    /// Keyed by user id; one preferences row per user
    preferences: RwLock<HashMap<String, UserPreferences>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl QrStorage for MemoryStorage {
    // == QR Codes ==
    async fn insert_qr_code(&self, record: QrCode) -> Result<QrCode, StorageError> {
        let mut qr_codes = self.qr_codes.write().await;
        qr_codes.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    async fn qr_codes_by_user(&self, user_id: &str) -> Result<Vec<QrCode>, StorageError> {
        let qr_codes = self.qr_codes.read().await;
        let mut records: Vec<QrCode> = qr_codes
            .values()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect();
        records.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(records)
    }

    async fn qr_code(&self, id: &str, user_id: &str) -> Result<Option<QrCode>, StorageError> {
        let qr_codes = self.qr_codes.read().await;
        Ok(qr_codes
            .get(id)
            .filter(|r| r.user_id == user_id)
            .cloned())
    }

    async fn qr_code_by_slug(&self, slug: &str) -> Result<Option<QrCode>, StorageError> {
        let qr_codes = self.qr_codes.read().await;
        Ok(qr_codes
            .values()
            .find(|r| r.short_slug.as_deref() == Some(slug))
            .cloned())
    }

    async fn update_qr_code(
        &self,
        id: &str,
        user_id: &str,
        updates: UpdateQrCodeRequest,
    ) -> Result<Option<QrCode>, StorageError> {
        let mut qr_codes = self.qr_codes.write().await;
        let Some(record) = qr_codes.get_mut(id).filter(|r| r.user_id == user_id) else {
            return Ok(None);
        };

        if let Some(title) = updates.title {
            record.title = title;
        }
        if let Some(data) = updates.data {
            // Static codes encode the data literally, so their payload moves
            // with it. Dynamic payloads are redirect URLs and stay fixed;
            // changing the destination is the whole point of a dynamic code.
            if !record.is_dynamic {
                record.payload = data.clone();
            }
            record.data = data;
        }
        if let Some(size) = updates.size {
            record.size = size;
        }
        if let Some(fg_color) = updates.fg_color {
            record.fg_color = fg_color;
        }
        if let Some(bg_color) = updates.bg_color {
            record.bg_color = bg_color;
        }
        if let Some(include_image) = updates.include_image {
            record.include_image = include_image;
        }
        record.updated_at = Utc::now();

        Ok(Some(record.clone()))
    }

    async fn delete_qr_code(&self, id: &str, user_id: &str) -> Result<bool, StorageError> {
        let mut qr_codes = self.qr_codes.write().await;
        match qr_codes.get(id) {
            Some(record) if record.user_id == user_id => {
                qr_codes.remove(id);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    // == Templates ==
    async fn insert_template(&self, record: Template) -> Result<Template, StorageError> {
        let mut templates = self.templates.write().await;
        templates.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    async fn templates_by_user(&self, user_id: &str) -> Result<Vec<Template>, StorageError> {
        let templates = self.templates.read().await;
        let mut records: Vec<Template> = templates
            .values()
            .filter(|t| t.user_id == user_id)
            .cloned()
            .collect();
        records.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(records)
    }

    async fn public_templates(&self) -> Result<Vec<Template>, StorageError> {
        let templates = self.templates.read().await;
        let mut records: Vec<Template> = templates
            .values()
            .filter(|t| t.is_public)
            .cloned()
            .collect();
        records.sort_by(|a, b| b.usage_count.cmp(&a.usage_count));
        Ok(records)
    }

    async fn template_for_user(
        &self,
        id: &str,
        user_id: &str,
    ) -> Result<Option<Template>, StorageError> {
        let templates = self.templates.read().await;
        Ok(templates
            .get(id)
            .filter(|t| t.is_public || t.user_id == user_id)
            .cloned())
    }

    async fn update_template(
        &self,
        id: &str,
        user_id: &str,
        updates: UpdateTemplateRequest,
    ) -> Result<Option<Template>, StorageError> {
        let mut templates = self.templates.write().await;
        let Some(record) = templates.get_mut(id).filter(|t| t.user_id == user_id) else {
            return Ok(None);
        };

        if let Some(name) = updates.name {
            record.name = name;
        }
        if let Some(description) = updates.description {
            record.description = Some(description);
        }
        if let Some(options) = updates.options {
            record.options = options;
        }
        if let Some(is_public) = updates.is_public {
            record.is_public = is_public;
        }
        record.updated_at = Utc::now();

        Ok(Some(record.clone()))
    }

    async fn delete_template(&self, id: &str, user_id: &str) -> Result<bool, StorageError> {
        let mut templates = self.templates.write().await;
        match templates.get(id) {
            Some(record) if record.user_id == user_id => {
                templates.remove(id);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn increment_template_usage(&self, id: &str) -> Result<(), StorageError> {
        let mut templates = self.templates.write().await;
        if let Some(record) = templates.get_mut(id) {
            record.usage_count += 1;
            record.updated_at = Utc::now();
        }
        Ok(())
    }

    // == Preferences ==
    async fn preferences(&self, user_id: &str) -> Result<Option<UserPreferences>, StorageError> {
        let preferences = self.preferences.read().await;
        Ok(preferences.get(user_id).cloned())
    }

    async fn insert_preferences(
        &self,
        user_id: &str,
        prefs: CreatePreferencesRequest,
    ) -> Result<UserPreferences, StorageError> {
        let now = Utc::now();
        let record = UserPreferences {
            id: new_record_id(),
            user_id: user_id.to_string(),
            default_template: prefs.default_template,
            theme: prefs.theme,
            auto_save: prefs.auto_save,
            default_download_format: prefs.default_download_format,
            created_at: now,
            updated_at: now,
        };

        let mut preferences = self.preferences.write().await;
        preferences.insert(user_id.to_string(), record.clone());
        Ok(record)
    }

    async fn update_preferences(
        &self,
        user_id: &str,
        updates: UpdatePreferencesRequest,
    ) -> Result<Option<UserPreferences>, StorageError> {
        let mut preferences = self.preferences.write().await;
        let Some(record) = preferences.get_mut(user_id) else {
            return Ok(None);
        };

        if let Some(default_template) = updates.default_template {
            record.default_template = Some(default_template);
        }
        if let Some(theme) = updates.theme {
            record.theme = theme;
        }
        if let Some(auto_save) = updates.auto_save {
            record.auto_save = auto_save;
        }
        if let Some(format) = updates.default_download_format {
            record.default_download_format = format;
        }
        record.updated_at = Utc::now();

        Ok(Some(record.clone()))
    }
}
