//! Domain records persisted by the storage backend
//!
//! These mirror the rows of the relational store: QR codes, styling
//! templates and per-user preferences. All records serialize to camelCase
//! JSON at the API boundary.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// == QR Code Record ==
/// A persisted QR code.
///
/// `data` is the user-supplied content (for dynamic codes, the current
/// redirect destination). `payload` is the string actually encoded into the
/// QR artifact: the literal data for static codes, or a `/r/:slug` redirect
/// URL for dynamic ones.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QrCode {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub data: String,
    pub payload: String,
    /// One of: url, text, wifi, vcard, email
    pub content_type: String,
    pub size: u32,
    pub fg_color: String,
    pub bg_color: String,
    pub include_image: bool,
    pub is_dynamic: bool,
    /// Redirect slug, present only on dynamic codes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_slug: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// == Template Record ==
/// A reusable styling template.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub id: String,
    pub user_id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// QR styling options, stored as opaque JSON
    pub options: serde_json::Value,
    pub is_public: bool,
    pub usage_count: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// == User Preferences Record ==
/// Per-user editor preferences.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPreferences {
    pub id: String,
    pub user_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_template: Option<String>,
    /// 'light' or 'dark'
    pub theme: String,
    pub auto_save: bool,
    /// 'png', 'jpeg' or 'svg'
    pub default_download_format: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// == Utility Functions ==
/// Generates a fresh opaque record id.
pub fn new_record_id() -> String {
    Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_qr_code() -> QrCode {
        let now = Utc::now();
        QrCode {
            id: new_record_id(),
            user_id: "user-1".to_string(),
            title: "Homepage".to_string(),
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
    fn test_qr_code_serializes_camel_case() {
        let json = serde_json::to_string(&sample_qr_code()).unwrap();
        assert!(json.contains("\"userId\""));
        assert!(json.contains("\"fgColor\""));
        assert!(json.contains("\"isDynamic\""));
        // Absent slug is omitted entirely
        assert!(!json.contains("shortSlug"));
    }

    #[test]
    fn test_qr_code_slug_serialized_when_present() {
        let mut record = sample_qr_code();
        record.is_dynamic = true;
        record.short_slug = Some("aB3xY9Qz".to_string());
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"shortSlug\":\"aB3xY9Qz\""));
    }

    #[test]
    fn test_record_ids_are_unique() {
        assert_ne!(new_record_id(), new_record_id());
    }
}
