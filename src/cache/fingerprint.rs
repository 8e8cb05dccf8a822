//! Request Fingerprint Module
//!
//! Derives the canonical cache key from the subset of a creation request
//! that actually affects the rendered QR artifact. Fields like the display
//! title never enter the key, so renaming a code cannot cause a cache miss.

use crate::models::CreateQrCodeRequest;

// == Fingerprint ==
/// The cache-relevant subset of a QR creation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fingerprint {
    pub data: String,
    pub size: u32,
    pub fg_color: String,
    pub bg_color: String,
    pub include_image: bool,
    pub is_dynamic: bool,
}

impl Fingerprint {
    // == Derivation ==
    /// Extracts the fingerprint from a creation request.
    pub fn of(req: &CreateQrCodeRequest) -> Self {
        Self {
            data: req.data.clone(),
            size: req.size,
            fg_color: req.fg_color.clone(),
            bg_color: req.bg_color.clone(),
            include_image: req.include_image,
            is_dynamic: req.is_dynamic,
        }
    }

    // == Canonical Key ==
    /// Serializes the fingerprint into a deterministic map key.
    ///
    /// Fields are joined in a fixed order; free-form strings are
    /// length-prefixed so field boundaries stay unambiguous no matter what
    /// characters the payload contains.
    pub fn canonical_key(&self) -> String {
        format!(
            "{}:{}|{}|{}:{}|{}:{}|{}|{}",
            self.data.len(),
            self.data,
            self.size,
            self.fg_color.len(),
            self.fg_color,
            self.bg_color.len(),
            self.bg_color,
            self.include_image,
            self.is_dynamic,
        )
    }
}
