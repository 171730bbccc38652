//! Result of evaluating a stylesheet request

use std::collections::HashMap;

use crate::domain::catalog::{FontId, Stylesheet};

/// Query parameter carrying the API key
pub const KEY_PARAM: &str = "key";

/// Query parameter naming the font
pub const FONT_PARAM: &str = "font";

/// Accepted alias for [`FONT_PARAM`]
pub const RESOURCE_PARAM: &str = "resource";

/// The caller-supplied inputs of a stylesheet request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LicenseRequest {
    pub key: Option<String>,
    pub font: Option<String>,
}

impl LicenseRequest {
    pub fn new(key: Option<&str>, font: Option<&str>) -> Self {
        Self {
            key: key.map(str::to_string),
            font: font.map(str::to_string),
        }
    }

    /// Build from decoded query parameters
    ///
    /// Empty values count as absent. `font` wins over `resource` when both are given.
    pub fn from_query(params: &HashMap<String, String>) -> Self {
        let key = params
            .get(KEY_PARAM)
            .filter(|k| !k.is_empty())
            .cloned();

        let font = params
            .get(FONT_PARAM)
            .filter(|f| !f.trim().is_empty())
            .or_else(|| params.get(RESOURCE_PARAM).filter(|f| !f.trim().is_empty()))
            .cloned();

        Self { key, font }
    }
}

/// Outcome of a validation pass. Transient, never persisted.
#[derive(Debug, Clone, PartialEq)]
pub enum LicenseOutcome {
    /// No key was presented
    MissingKey,
    /// The requested font is not in the catalog
    UnknownResource { requested: String },
    /// No credential matches the presented key
    InvalidKey,
    /// The credential exists but has been disabled
    DisabledKey,
    /// The credential is active but holds no grant for the font
    NotEntitled { font_id: FontId },
    /// Access granted
    Success(Stylesheet),
}

impl LicenseOutcome {
    /// Stable label for logs and metrics
    pub fn label(&self) -> &'static str {
        match self {
            Self::MissingKey => "missing_key",
            Self::UnknownResource { .. } => "unknown_resource",
            Self::InvalidKey => "invalid_key",
            Self::DisabledKey => "disabled_key",
            Self::NotEntitled { .. } => "not_entitled",
            Self::Success(_) => "success",
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Human-readable diagnostic for the caller
    pub fn message(&self) -> String {
        match self {
            Self::MissingKey => {
                "Missing API key. Add ?key=YOUR_API_KEY to the stylesheet URL.".to_string()
            }
            Self::UnknownResource { requested } => {
                format!("Unknown font '{}'.", comment_safe(requested))
            }
            Self::InvalidKey => "Invalid API key.".to_string(),
            Self::DisabledKey => {
                "This API key has been disabled. Contact support to reactivate it.".to_string()
            }
            Self::NotEntitled { font_id } => format!(
                "This API key is not licensed for font '{}'. Contact support to add it to your license.",
                font_id
            ),
            Self::Success(stylesheet) => format!("Serving font '{}'.", stylesheet.id()),
        }
    }
}

const MAX_ECHOED_LEN: usize = 64;

/// Reduce caller input to characters that cannot terminate a CSS comment
fn comment_safe(input: &str) -> String {
    input
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | ' '))
        .take(MAX_ECHOED_LEN)
        .collect()
}
