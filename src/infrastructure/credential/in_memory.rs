//! In-memory credential repository implementation

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::domain::credential::{Credential, CredentialId, CredentialRepository};
use crate::domain::DomainError;

#[derive(Debug, Default)]
struct Tables {
    credentials: HashMap<CredentialId, Credential>,
    key_index: HashMap<String, CredentialId>,
}

/// In-memory implementation of CredentialRepository
#[derive(Debug, Clone, Default)]
pub struct InMemoryCredentialRepository {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryCredentialRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository with initial credentials
    ///
    /// Later entries replace earlier ones with the same id or key.
    pub fn with_credentials(credentials: Vec<Credential>) -> Self {
        let mut tables = Tables::default();

        for credential in credentials {
            Self::insert_into(&mut tables, credential);
        }

        Self {
            tables: Arc::new(RwLock::new(tables)),
        }
    }

    /// Insert or replace a credential
    pub async fn insert(&self, credential: Credential) {
        let mut tables = self.tables.write().await;
        Self::insert_into(&mut tables, credential);
    }

    /// Get a credential by id
    pub async fn get(&self, id: &CredentialId) -> Option<Credential> {
        self.tables.read().await.credentials.get(id).cloned()
    }

    pub async fn len(&self) -> usize {
        self.tables.read().await.credentials.len()
    }

    fn insert_into(tables: &mut Tables, credential: Credential) {
        if let Some(previous) = tables.credentials.get(credential.id()) {
            // Another credential may have taken over this key since
            if tables.key_index.get(previous.key()) == Some(credential.id()) {
                tables.key_index.remove(previous.key());
            }
        }

        tables
            .key_index
            .insert(credential.key().to_string(), credential.id().clone());
        tables
            .credentials
            .insert(credential.id().clone(), credential);
    }
}

#[async_trait]
impl CredentialRepository for InMemoryCredentialRepository {
    async fn find_by_key(&self, key: &str) -> Result<Option<Credential>, DomainError> {
        let tables = self.tables.read().await;

        Ok(tables
            .key_index
            .get(key)
            .and_then(|id| tables.credentials.get(id))
            .cloned())
    }

    async fn mark_used(&self, id: &CredentialId, at: DateTime<Utc>) -> Result<(), DomainError> {
        let mut tables = self.tables.write().await;

        if let Some(credential) = tables.credentials.get_mut(id) {
            credential.mark_used(at);
        }

        Ok(())
    }

    async fn ping(&self) -> Result<(), DomainError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn credential(id: &str, key: &str) -> Credential {
        Credential::new(id.into(), key, "owner-1")
    }

    #[tokio::test]
    async fn test_find_by_key() {
        let repo = InMemoryCredentialRepository::with_credentials(vec![
            credential("cred-1", "abc123"),
            credential("cred-2", "def456"),
        ]);

        let found = repo.find_by_key("abc123").await.unwrap().unwrap();
        assert_eq!(found.id().as_str(), "cred-1");

        let found = repo.find_by_key("def456").await.unwrap().unwrap();
        assert_eq!(found.id().as_str(), "cred-2");
    }

    #[tokio::test]
    async fn test_find_by_key_is_exact() {
        let repo = InMemoryCredentialRepository::with_credentials(vec![credential(
            "cred-1", "abc123",
        )]);

        assert!(repo.find_by_key("ABC123").await.unwrap().is_none());
        assert!(repo.find_by_key("abc12").await.unwrap().is_none());
        assert!(repo.find_by_key(" abc123").await.unwrap().is_none());
        assert!(repo.find_by_key("").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_find_returns_inactive_credentials() {
        let repo = InMemoryCredentialRepository::with_credentials(vec![
            credential("cred-1", "abc123").with_active(false),
        ]);

        let found = repo.find_by_key("abc123").await.unwrap().unwrap();
        assert!(!found.is_active());
    }

    #[tokio::test]
    async fn test_mark_used() {
        let repo = InMemoryCredentialRepository::with_credentials(vec![credential(
            "cred-1", "abc123",
        )]);
        let id = CredentialId::new("cred-1");
        let now = Utc::now();

        repo.mark_used(&id, now).await.unwrap();

        assert_eq!(repo.get(&id).await.unwrap().last_used_at(), Some(now));
    }

    #[tokio::test]
    async fn test_mark_used_last_writer_wins() {
        let repo = InMemoryCredentialRepository::with_credentials(vec![credential(
            "cred-1", "abc123",
        )]);
        let id = CredentialId::new("cred-1");
        let now = Utc::now();

        repo.mark_used(&id, now).await.unwrap();
        repo.mark_used(&id, now - Duration::minutes(5)).await.unwrap();

        assert_eq!(
            repo.get(&id).await.unwrap().last_used_at(),
            Some(now - Duration::minutes(5))
        );
    }

    #[tokio::test]
    async fn test_mark_used_unknown_id_is_ignored() {
        let repo = InMemoryCredentialRepository::new();

        let result = repo.mark_used(&CredentialId::new("missing"), Utc::now()).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_insert_replaces_key_index() {
        let repo = InMemoryCredentialRepository::new();
        repo.insert(credential("cred-1", "old-key")).await;
        repo.insert(credential("cred-1", "new-key")).await;

        assert!(repo.find_by_key("old-key").await.unwrap().is_none());
        assert!(repo.find_by_key("new-key").await.unwrap().is_some());
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn test_rekeying_keeps_index_of_credential_sharing_old_key() {
        let repo = InMemoryCredentialRepository::with_credentials(vec![
            credential("cred-1", "shared"),
            credential("cred-2", "shared"),
        ]);

        repo.insert(credential("cred-1", "fresh")).await;

        let found = repo.find_by_key("shared").await.unwrap().unwrap();
        assert_eq!(found.id().as_str(), "cred-2");
        let found = repo.find_by_key("fresh").await.unwrap().unwrap();
        assert_eq!(found.id().as_str(), "cred-1");
    }
}
