//! Credential store trait

use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[cfg(test)]
use mockall::automock;

use super::entity::{Credential, CredentialId};
use crate::domain::DomainError;

/// Point lookups and the last-used update against persisted credentials
#[cfg_attr(test, automock)]
#[async_trait]
pub trait CredentialRepository: Send + Sync {
    /// Find a credential by exact match on the presented key
    async fn find_by_key(&self, key: &str) -> Result<Option<Credential>, DomainError>;

    /// Overwrite the credential's last-used timestamp
    ///
    /// Updating an id that no longer exists is not an error.
    async fn mark_used(&self, id: &CredentialId, at: DateTime<Utc>) -> Result<(), DomainError>;

    /// Verify the backing store is reachable
    async fn ping(&self) -> Result<(), DomainError>;
}
