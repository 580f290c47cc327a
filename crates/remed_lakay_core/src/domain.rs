//! crates/remed_lakay_core/src/domain.rs
//!
//! Defines the pure, core data structures for the application.
//! These structs are independent of any transport or serialization format.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::{DateTime, Utc};

/// A medicinal plant from the reference catalogue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plant {
    pub id: String,
    /// Creole name, used for display and search.
    pub name: String,
    pub french_name: String,
    pub scientific_name: String,
    pub family: String,
    pub description: String,
    pub properties: Vec<String>,
    pub contraindications: Vec<String>,
    pub side_effects: Vec<String>,
    pub image_url: String,
    pub region: String,
    pub preparation: String,
    pub dosage: String,
}

impl Plant {
    /// The warning shown on top of a plant's detail view.
    pub fn caution_notice(&self) -> String {
        if self.contraindications.is_empty() {
            "Pa gen gwo kontendikasyon espesyal.".to_string()
        } else {
            format!("Pa pou: {}", self.contraindications.join(", "))
        }
    }
}

/// How urgent a disease is. Gates whether home remedies are offered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Mild,
    Moderate,
    Severe,
}

impl Severity {
    /// The Creole label shown next to a disease.
    pub fn label(self) -> &'static str {
        match self {
            Severity::Mild => "lejè",
            Severity::Moderate => "modere",
            Severity::Severe => "grav",
        }
    }

    pub fn is_emergency(self) -> bool {
        matches!(self, Severity::Severe)
    }
}

/// An illness from the reference catalogue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Disease {
    pub id: String,
    pub name: String,
    pub category: String,
    pub symptoms: Vec<String>,
    pub causes: String,
    pub prevention: String,
    pub severity: Severity,
    /// Weak references into `Plant::id`. May dangle.
    pub remedy_ids: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatRole {
    User,
    Bot,
}

/// A single entry of the advisory chat log.
#[derive(Debug, Clone)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub text: String,
    pub sent_at: DateTime<Utc>,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            text: text.into(),
            sent_at: Utc::now(),
        }
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Bot,
            text: text.into(),
            sent_at: Utc::now(),
        }
    }
}

/// Reasons a captured image cannot be sent for identification.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CaptureError {
    #[error("The captured image is empty")]
    EmptyImage,
    #[error("Unsupported image type: {0}")]
    UnsupportedMimeType(String),
}

/// A captured photo in its transportable (base64) form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    pub mime_type: String,
    /// Standard, padded base64 of the raw bytes.
    pub data: String,
}

impl EncodedImage {
    /// Encodes raw image bytes. Only `image/*` types are accepted.
    pub fn encode(raw: &[u8], mime_type: &str) -> Result<Self, CaptureError> {
        let mime_type = mime_type.trim().to_ascii_lowercase();
        if !mime_type.starts_with("image/") || mime_type.len() == "image/".len() {
            return Err(CaptureError::UnsupportedMimeType(mime_type));
        }
        if raw.is_empty() {
            return Err(CaptureError::EmptyImage);
        }

        Ok(Self {
            mime_type,
            data: STANDARD.encode(raw),
        })
    }

    /// A `data:` URL, usable as a preview source and as an inline model input.
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data)
    }
}
