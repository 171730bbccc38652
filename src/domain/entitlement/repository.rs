//! Entitlement store trait

use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use crate::domain::catalog::FontId;
use crate::domain::credential::CredentialId;
use crate::domain::DomainError;

/// Existence check on the (credential, font) grant relation
#[cfg_attr(test, automock)]
#[async_trait]
pub trait EntitlementRepository: Send + Sync {
    /// True when a grant exists for exactly this pair
    async fn is_entitled(
        &self,
        credential_id: &CredentialId,
        font_id: &FontId,
    ) -> Result<bool, DomainError>;
}
