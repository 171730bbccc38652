//! Font identifiers and stylesheet payloads

use std::borrow::Borrow;

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;

/// Errors that can occur while parsing a font identifier
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FontIdError {
    #[error("Font ID cannot be empty")]
    Empty,

    #[error("Font ID exceeds maximum length of {0} characters")]
    TooLong(usize),

    #[error("Font ID contains invalid character: '{0}'. Only alphanumeric characters, hyphens and underscores are allowed")]
    InvalidCharacter(char),
}

const MAX_FONT_ID_LENGTH: usize = 64;

/// Font identifier, the key into the catalog
///
/// Surrounding whitespace is trimmed; everything else is matched exactly and
/// case-sensitively.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FontId(pub(super) String);

impl FontId {
    pub fn new(id: impl AsRef<str>) -> Result<Self, FontIdError> {
        let id = id.as_ref().trim();
        validate_font_id(id)?;
        Ok(Self(id.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn validate_font_id(id: &str) -> Result<(), FontIdError> {
    if id.is_empty() {
        return Err(FontIdError::Empty);
    }

    if id.chars().count() > MAX_FONT_ID_LENGTH {
        return Err(FontIdError::TooLong(MAX_FONT_ID_LENGTH));
    }

    if let Some(c) = id
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '_'))
    {
        return Err(FontIdError::InvalidCharacter(c));
    }

    Ok(())
}

impl TryFrom<String> for FontId {
    type Error = FontIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<FontId> for String {
    fn from(id: FontId) -> Self {
        id.0
    }
}

impl Borrow<str> for FontId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for FontId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A servable stylesheet
///
/// The content is held as [`Bytes`] so handing it to a response body never copies.
#[derive(Debug, Clone, PartialEq)]
pub struct Stylesheet {
    id: FontId,
    content: Bytes,
    etag: String,
}

impl Stylesheet {
    pub fn new(id: FontId, content: impl Into<Bytes>) -> Self {
        let content = content.into();
        let etag = compute_etag(&content);

        Self { id, content, etag }
    }

    pub fn id(&self) -> &FontId {
        &self.id
    }

    pub fn content(&self) -> &Bytes {
        &self.content
    }

    /// Strong entity tag, already quoted for use in an `ETag` header
    pub fn etag(&self) -> &str {
        &self.etag
    }
}

fn compute_etag(content: &[u8]) -> String {
    let digest = Sha256::digest(content);
    format!("\"{}\"", &hex::encode(digest)[..16])
}
