//! Frozen font catalog

use std::collections::HashMap;

use bytes::Bytes;

use super::entity::{FontId, Stylesheet};
use crate::domain::DomainError;

/// Identifier of the font bundled with the gateway
pub const BUILTIN_FONT_ID: &str = "july";

const BUILTIN_JULY_CSS: &str = include_str!("../../../assets/fonts/july.css");

/// Immutable mapping from font identifier to stylesheet
///
/// Built once at startup through [`FontCatalogBuilder`] and shared behind an `Arc`.
/// There is no way to mutate a catalog after `build`.
#[derive(Debug, Clone)]
pub struct FontCatalog {
    fonts: HashMap<FontId, Stylesheet>,
    default_font: FontId,
}

impl FontCatalog {
    pub fn builder() -> FontCatalogBuilder {
        FontCatalogBuilder::default()
    }

    /// Catalog containing only the bundled fonts, defaulting to `july`
    pub fn builtin() -> Self {
        Self {
            fonts: builtin_fonts(),
            default_font: FontId(BUILTIN_FONT_ID.to_string()),
        }
    }

    /// Exact-match lookup; unknown identifiers yield `None`
    pub fn lookup(&self, id: &str) -> Option<&Stylesheet> {
        self.fonts.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.fonts.contains_key(id)
    }

    /// Font served when the request names none
    pub fn default_font(&self) -> &FontId {
        &self.default_font
    }

    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }

    /// Font identifiers in sorted order
    pub fn font_ids(&self) -> Vec<&FontId> {
        let mut ids: Vec<&FontId> = self.fonts.keys().collect();
        ids.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        ids
    }
}

fn builtin_fonts() -> HashMap<FontId, Stylesheet> {
    let id = FontId(BUILTIN_FONT_ID.to_string());
    let stylesheet = Stylesheet::new(id.clone(), Bytes::from_static(BUILTIN_JULY_CSS.as_bytes()));

    HashMap::from([(id, stylesheet)])
}

/// Builder for [`FontCatalog`]
#[derive(Debug, Default)]
pub struct FontCatalogBuilder {
    fonts: HashMap<FontId, Stylesheet>,
}

impl FontCatalogBuilder {
    /// Include the bundled fonts
    pub fn with_builtin(mut self) -> Self {
        self.fonts.extend(builtin_fonts());
        self
    }

    /// Add or replace a font
    pub fn insert(mut self, id: FontId, content: impl Into<Bytes>) -> Self {
        let stylesheet = Stylesheet::new(id.clone(), content);
        self.fonts.insert(id, stylesheet);
        self
    }

    /// Freeze the catalog. The default font must be one of the inserted fonts.
    pub fn build(self, default_font: &str) -> Result<FontCatalog, DomainError> {
        let default_font = FontId::new(default_font)
            .map_err(|e| DomainError::configuration(format!("Invalid default font: {}", e)))?;

        if !self.fonts.contains_key(default_font.as_str()) {
            return Err(DomainError::configuration(format!(
                "Default font '{}' is not in the catalog",
                default_font
            )));
        }

        Ok(FontCatalog {
            fonts: self.fonts,
            default_font,
        })
    }
}
