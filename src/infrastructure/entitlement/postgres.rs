//! PostgreSQL entitlement repository

use async_trait::async_trait;
use sqlx::postgres::PgPool;

use crate::domain::catalog::FontId;
use crate::domain::credential::CredentialId;
use crate::domain::entitlement::EntitlementRepository;
use crate::domain::DomainError;

/// Grants stored in the `api_key_entitlements` table
#[derive(Debug, Clone)]
pub struct PostgresEntitlementRepository {
    pool: PgPool,
}

impl PostgresEntitlementRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EntitlementRepository for PostgresEntitlementRepository {
    async fn is_entitled(
        &self,
        credential_id: &CredentialId,
        font_id: &FontId,
    ) -> Result<bool, DomainError> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM api_key_entitlements WHERE api_key_id = $1 AND font_id = $2)",
        )
        .bind(credential_id.as_str())
        .bind(font_id.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to check entitlement: {}", e)))?;

        Ok(exists)
    }
}
