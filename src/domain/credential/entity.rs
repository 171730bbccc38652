//! Credential entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier of a stored credential
///
/// Distinct from the presented key string: entitlements and usage updates
/// reference credentials by this id, never by the secret.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CredentialId(String);

impl CredentialId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CredentialId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl std::fmt::Display for CredentialId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An issued API key
///
/// Issuance and the active toggle belong to administrative tooling; the gateway
/// only reads credentials and bumps `last_used_at`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Credential {
    id: CredentialId,
    key: String,
    is_active: bool,
    owner_id: String,
    last_used_at: Option<DateTime<Utc>>,
}

impl Credential {
    /// Create an active credential that has never been used
    pub fn new(id: CredentialId, key: impl Into<String>, owner_id: impl Into<String>) -> Self {
        Self {
            id,
            key: key.into(),
            is_active: true,
            owner_id: owner_id.into(),
            last_used_at: None,
        }
    }

    pub fn with_active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }

    pub fn with_last_used_at(mut self, last_used_at: Option<DateTime<Utc>>) -> Self {
        self.last_used_at = last_used_at;
        self
    }

    pub fn id(&self) -> &CredentialId {
        &self.id
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn owner_id(&self) -> &str {
        &self.owner_id
    }

    pub fn last_used_at(&self) -> Option<DateTime<Utc>> {
        self.last_used_at
    }

    /// Set the last-used timestamp unconditionally (last writer wins)
    pub fn mark_used(&mut self, at: DateTime<Utc>) {
        self.last_used_at = Some(at);
    }
}
