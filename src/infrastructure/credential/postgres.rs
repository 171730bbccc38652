//! PostgreSQL credential repository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::{PgPool, PgRow};
use sqlx::Row;

use crate::domain::credential::{Credential, CredentialId, CredentialRepository};
use crate::domain::DomainError;

/// Credentials stored in the `api_keys` table
#[derive(Debug, Clone)]
pub struct PostgresCredentialRepository {
    pool: PgPool,
}

impl PostgresCredentialRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn row_to_credential(row: &PgRow) -> Result<Credential, sqlx::Error> {
    let id: String = row.try_get("id")?;
    let key: String = row.try_get("key")?;
    let is_active: bool = row.try_get("is_active")?;
    let owner_id: String = row.try_get("owner_id")?;
    let last_used_at: Option<DateTime<Utc>> = row.try_get("last_used_at")?;

    Ok(Credential::new(CredentialId::new(id), key, owner_id)
        .with_active(is_active)
        .with_last_used_at(last_used_at))
}

#[async_trait]
impl CredentialRepository for PostgresCredentialRepository {
    async fn find_by_key(&self, key: &str) -> Result<Option<Credential>, DomainError> {
        let row = sqlx::query(
            "SELECT id, key, is_active, owner_id, last_used_at FROM api_keys WHERE key = $1",
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to look up API key: {}", e)))?;

        row.as_ref()
            .map(row_to_credential)
            .transpose()
            .map_err(|e| DomainError::storage(format!("Malformed API key row: {}", e)))
    }

    async fn mark_used(&self, id: &CredentialId, at: DateTime<Utc>) -> Result<(), DomainError> {
        sqlx::query("UPDATE api_keys SET last_used_at = $2 WHERE id = $1")
            .bind(id.as_str())
            .bind(at)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                DomainError::storage(format!("Failed to update last_used_at for '{}': {}", id, e))
            })?;

        Ok(())
    }

    async fn ping(&self) -> Result<(), DomainError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Credential store unreachable: {}", e)))?;

        Ok(())
    }
}
