//! In-memory entitlement repository implementation

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::catalog::FontId;
use crate::domain::credential::CredentialId;
use crate::domain::entitlement::{Entitlement, EntitlementRepository};
use crate::domain::DomainError;

/// In-memory implementation of EntitlementRepository
#[derive(Debug, Clone, Default)]
pub struct InMemoryEntitlementRepository {
    grants: Arc<RwLock<HashSet<Entitlement>>>,
}

impl InMemoryEntitlementRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entitlements(entitlements: Vec<Entitlement>) -> Self {
        Self {
            grants: Arc::new(RwLock::new(entitlements.into_iter().collect())),
        }
    }

    pub async fn grant(&self, entitlement: Entitlement) {
        self.grants.write().await.insert(entitlement);
    }

    pub async fn len(&self) -> usize {
        self.grants.read().await.len()
    }
}

#[async_trait]
impl EntitlementRepository for InMemoryEntitlementRepository {
    async fn is_entitled(
        &self,
        credential_id: &CredentialId,
        font_id: &FontId,
    ) -> Result<bool, DomainError> {
        let probe = Entitlement::new(credential_id.clone(), font_id.clone());
        Ok(self.grants.read().await.contains(&probe))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grant(credential: &str, font: &str) -> Entitlement {
        Entitlement::new(CredentialId::new(credential), FontId::new(font).unwrap())
    }

    #[tokio::test]
    async fn test_is_entitled_exact_pair() {
        let repo = InMemoryEntitlementRepository::with_entitlements(vec![grant("cred-1", "july")]);

        let cred_1 = CredentialId::new("cred-1");
        let cred_2 = CredentialId::new("cred-2");
        let july = FontId::new("july").unwrap();
        let june = FontId::new("june").unwrap();

        assert!(repo.is_entitled(&cred_1, &july).await.unwrap());
        assert!(!repo.is_entitled(&cred_1, &june).await.unwrap());
        assert!(!repo.is_entitled(&cred_2, &july).await.unwrap());
    }

    #[tokio::test]
    async fn test_grant() {
        let repo = InMemoryEntitlementRepository::new();
        let cred = CredentialId::new("cred-1");
        let july = FontId::new("july").unwrap();

        assert!(!repo.is_entitled(&cred, &july).await.unwrap());

        repo.grant(grant("cred-1", "july")).await;
        repo.grant(grant("cred-1", "july")).await;

        assert!(repo.is_entitled(&cred, &july).await.unwrap());
        assert_eq!(repo.len().await, 1);
    }
}
