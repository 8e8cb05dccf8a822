//! Request DTOs for the QR station API
//!
//! Defines the structure of incoming HTTP request bodies. Validation runs in
//! the HTTP layer before the creation flow or storage is touched.

use serde::Deserialize;

/// Accepted content type discriminators.
const CONTENT_TYPES: [&str; 5] = ["url", "text", "wifi", "vcard", "email"];

/// Rendered size bounds in pixels.
const MIN_SIZE: u32 = 64;
const MAX_SIZE: u32 = 2048;

fn default_size() -> u32 {
    300
}

fn default_fg_color() -> String {
    "#000000".to_string()
}

fn default_bg_color() -> String {
    "#ffffff".to_string()
}

/// Checks a `#RGB` or `#RRGGBB` hex color string.
fn is_hex_color(value: &str) -> bool {
    let Some(digits) = value.strip_prefix('#') else {
        return false;
    };
    matches!(digits.len(), 3 | 6) && digits.chars().all(|c| c.is_ascii_hexdigit())
}

// == Create QR Code Request ==
/// Request body for `POST /api/qr-codes`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateQrCodeRequest {
    /// Display name, not part of the rendered artifact
    pub title: String,
    /// Content to encode (destination URL for dynamic codes)
    pub data: String,
    pub content_type: String,
    #[serde(default = "default_size")]
    pub size: u32,
    #[serde(default = "default_fg_color")]
    pub fg_color: String,
    #[serde(default = "default_bg_color")]
    pub bg_color: String,
    #[serde(default)]
    pub include_image: bool,
    #[serde(default)]
    pub is_dynamic: bool,
}

impl CreateQrCodeRequest {
    /// Validates the request data.
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.title.trim().is_empty() {
            return Some("Title cannot be empty".to_string());
        }
        if self.data.is_empty() {
            return Some("Data cannot be empty".to_string());
        }
        if !CONTENT_TYPES.contains(&self.content_type.as_str()) {
            return Some(format!(
                "Content type must be one of: {}",
                CONTENT_TYPES.join(", ")
            ));
        }
        if !(MIN_SIZE..=MAX_SIZE).contains(&self.size) {
            return Some(format!(
                "Size must be between {} and {} pixels",
                MIN_SIZE, MAX_SIZE
            ));
        }
        if !is_hex_color(&self.fg_color) {
            return Some("Foreground color must be a hex color".to_string());
        }
        if !is_hex_color(&self.bg_color) {
            return Some("Background color must be a hex color".to_string());
        }
        if self.is_dynamic && !(self.data.starts_with("http://") || self.data.starts_with("https://"))
        {
            return Some("Dynamic QR codes require an http(s) destination URL".to_string());
        }
        None
    }
}

// == Update QR Code Request ==
/// Request body for `PUT /api/qr-codes/:id`. All fields optional.
///
/// The dynamic flag and slug are fixed at creation and cannot be updated.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateQrCodeRequest {
    pub title: Option<String>,
    pub data: Option<String>,
    pub size: Option<u32>,
    pub fg_color: Option<String>,
    pub bg_color: Option<String>,
    pub include_image: Option<bool>,
}

impl UpdateQrCodeRequest {
    /// Validates the fields that are present.
    pub fn validate(&self) -> Option<String> {
        if let Some(title) = &self.title {
            if title.trim().is_empty() {
                return Some("Title cannot be empty".to_string());
            }
        }
        if let Some(data) = &self.data {
            if data.is_empty() {
                return Some("Data cannot be empty".to_string());
            }
        }
        if let Some(size) = self.size {
            if !(MIN_SIZE..=MAX_SIZE).contains(&size) {
                return Some(format!(
                    "Size must be between {} and {} pixels",
                    MIN_SIZE, MAX_SIZE
                ));
            }
        }
        if let Some(color) = &self.fg_color {
            if !is_hex_color(color) {
                return Some("Foreground color must be a hex color".to_string());
            }
        }
        if let Some(color) = &self.bg_color {
            if !is_hex_color(color) {
                return Some("Background color must be a hex color".to_string());
            }
        }
        None
    }
}

// == Template Requests ==
/// Request body for `POST /api/templates`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTemplateRequest {
    pub name: String,
    pub description: Option<String>,
    pub options: serde_json::Value,
    #[serde(default)]
    pub is_public: bool,
}

impl CreateTemplateRequest {
    pub fn validate(&self) -> Option<String> {
        if self.name.trim().is_empty() {
            return Some("Name cannot be empty".to_string());
        }
        if !self.options.is_object() {
            return Some("Options must be a JSON object".to_string());
        }
        None
    }
}

/// Request body for `PUT /api/templates/:id`. All fields optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTemplateRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub options: Option<serde_json::Value>,
    pub is_public: Option<bool>,
}

impl UpdateTemplateRequest {
    pub fn validate(&self) -> Option<String> {
        if let Some(name) = &self.name {
            if name.trim().is_empty() {
                return Some("Name cannot be empty".to_string());
            }
        }
        if let Some(options) = &self.options {
            if !options.is_object() {
                return Some("Options must be a JSON object".to_string());
            }
        }
        None
    }
}

// == Preferences Requests ==
/// Request body for `POST /api/preferences`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePreferencesRequest {
    pub default_template: Option<String>,
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default = "default_auto_save")]
    pub auto_save: bool,
    #[serde(default = "default_download_format")]
    pub default_download_format: String,
}

fn default_theme() -> String {
    "light".to_string()
}

fn default_auto_save() -> bool {
    true
}

fn default_download_format() -> String {
    "png".to_string()
}

impl CreatePreferencesRequest {
    pub fn validate(&self) -> Option<String> {
        validate_theme(&self.theme).or_else(|| validate_format(&self.default_download_format))
    }
}

/// Request body for `PUT /api/preferences`. All fields optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePreferencesRequest {
    pub default_template: Option<String>,
    pub theme: Option<String>,
    pub auto_save: Option<bool>,
    pub default_download_format: Option<String>,
}

impl UpdatePreferencesRequest {
    pub fn validate(&self) -> Option<String> {
        if let Some(theme) = &self.theme {
            if let Some(err) = validate_theme(theme) {
                return Some(err);
            }
        }
        if let Some(format) = &self.default_download_format {
            if let Some(err) = validate_format(format) {
                return Some(err);
            }
        }
        None
    }
}

fn validate_theme(theme: &str) -> Option<String> {
    if matches!(theme, "light" | "dark") {
        None
    } else {
        Some("Theme must be 'light' or 'dark'".to_string())
    }
}

fn validate_format(format: &str) -> Option<String> {
    if matches!(format, "png" | "jpeg" | "svg") {
        None
    } else {
        Some("Download format must be 'png', 'jpeg' or 'svg'".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> CreateQrCodeRequest {
        CreateQrCodeRequest {
            title: "Homepage".to_string(),
            data: "https://example.com".to_string(),
            content_type: "url".to_string(),
            size: 300,
            fg_color: "#000000".to_string(),
            bg_color: "#ffffff".to_string(),
            include_image: false,
            is_dynamic: false,
        }
    }

    #[test]
    fn test_create_request_deserialize_defaults() {
        let json = r#"{"title":"T","data":"hello","contentType":"text"}"#;
        let req: CreateQrCodeRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.size, 300);
        assert_eq!(req.fg_color, "#000000");
        assert_eq!(req.bg_color, "#ffffff");
        assert!(!req.include_image);
        assert!(!req.is_dynamic);
    }

    #[test]
    fn test_create_request_camel_case_fields() {
        let json = r##"{"title":"T","data":"https://x.com","contentType":"url",
            "fgColor":"#111","bgColor":"#eee","includeImage":true,"isDynamic":true}"##;
        let req: CreateQrCodeRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.fg_color, "#111");
        assert!(req.include_image);
        assert!(req.is_dynamic);
    }

    #[test]
    fn test_validate_valid_request() {
        assert!(valid_request().validate().is_none());
    }

    #[test]
    fn test_validate_empty_data() {
        let mut req = valid_request();
        req.data = String::new();
        assert!(req.validate().is_some());
    }

    #[test]
    fn test_validate_bad_content_type() {
        let mut req = valid_request();
        req.content_type = "barcode".to_string();
        assert!(req.validate().is_some());
    }

    #[test]
    fn test_validate_size_out_of_bounds() {
        let mut req = valid_request();
        req.size = 10_000;
        assert!(req.validate().is_some());
    }

    #[test]
    fn test_validate_bad_color() {
        let mut req = valid_request();
        req.fg_color = "black".to_string();
        assert!(req.validate().is_some());
    }

    #[test]
    fn test_validate_short_hex_color_accepted() {
        let mut req = valid_request();
        req.fg_color = "#abc".to_string();
        assert!(req.validate().is_none());
    }

    #[test]
    fn test_validate_dynamic_requires_url_data() {
        let mut req = valid_request();
        req.is_dynamic = true;
        req.data = "just some text".to_string();
        assert!(req.validate().is_some());

        req.data = "https://example.com/landing".to_string();
        assert!(req.validate().is_none());
    }

    #[test]
    fn test_update_request_partial_validation() {
        let updates = UpdateQrCodeRequest {
            size: Some(16),
            ..Default::default()
        };
        assert!(updates.validate().is_some());

        let updates = UpdateQrCodeRequest {
            title: Some("Renamed".to_string()),
            ..Default::default()
        };
        assert!(updates.validate().is_none());
    }

    #[test]
    fn test_preferences_theme_validation() {
        let req = CreatePreferencesRequest {
            default_template: None,
            theme: "solarized".to_string(),
            auto_save: true,
            default_download_format: "png".to_string(),
        };
        assert!(req.validate().is_some());
    }
}
