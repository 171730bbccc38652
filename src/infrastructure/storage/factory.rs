//! Storage factory for runtime backend selection

use std::sync::Arc;

use tracing::{info, warn};

use crate::config::{SeedConfig, StorageSettings};
use crate::domain::catalog::FontId;
use crate::domain::credential::{Credential, CredentialId, CredentialRepository};
use crate::domain::entitlement::{Entitlement, EntitlementRepository};
use crate::domain::DomainError;
use crate::infrastructure::credential::{
    InMemoryCredentialRepository, PostgresCredentialRepository,
};
use crate::infrastructure::entitlement::{
    InMemoryEntitlementRepository, PostgresEntitlementRepository,
};

use super::migrations::PostgresMigrator;
use super::postgres::PostgresConfig;

/// Supported storage types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageType {
    /// In-memory storage (for testing/development)
    InMemory,
    /// PostgreSQL storage
    Postgres,
}

impl StorageType {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "memory" | "inmemory" | "in-memory" | "in_memory" => Some(Self::InMemory),
            "postgres" | "postgresql" | "pg" => Some(Self::Postgres),
            _ => None,
        }
    }
}

/// The two lookups the gateway consumes
#[derive(Clone)]
pub struct Repositories {
    pub credentials: Arc<dyn CredentialRepository>,
    pub entitlements: Arc<dyn EntitlementRepository>,
}

/// Factory for creating the credential and entitlement stores
#[derive(Debug)]
pub struct StorageFactory;

impl StorageFactory {
    /// Create both stores for the configured backend
    pub async fn create(
        settings: &StorageSettings,
        seed: &SeedConfig,
    ) -> Result<Repositories, DomainError> {
        let storage_type = StorageType::parse(&settings.backend).ok_or_else(|| {
            DomainError::configuration(format!("Unknown storage backend '{}'", settings.backend))
        })?;

        info!("Storage backend: {:?}", storage_type);

        match storage_type {
            StorageType::InMemory => Self::create_in_memory(seed),
            StorageType::Postgres => {
                if !seed.credentials.is_empty() {
                    warn!(
                        count = seed.credentials.len(),
                        "Seed credentials are ignored by the postgres backend"
                    );
                }
                Self::create_postgres(settings).await
            }
        }
    }

    /// In-memory stores populated from the seed configuration
    pub fn create_in_memory(seed: &SeedConfig) -> Result<Repositories, DomainError> {
        let mut credentials = Vec::with_capacity(seed.credentials.len());
        let mut entitlements = Vec::new();

        for entry in &seed.credentials {
            let id = CredentialId::new(entry.id.as_str());

            for font in &entry.fonts {
                let font_id = FontId::new(font).map_err(|e| {
                    DomainError::configuration(format!(
                        "Seed credential '{}' has invalid font '{}': {}",
                        entry.id, font, e
                    ))
                })?;
                entitlements.push(Entitlement::new(id.clone(), font_id));
            }

            credentials.push(
                Credential::new(id, entry.key.as_str(), entry.owner_id.as_str())
                    .with_active(entry.active),
            );
        }

        info!(
            credentials = credentials.len(),
            entitlements = entitlements.len(),
            "Using in-memory credential store"
        );

        Ok(Repositories {
            credentials: Arc::new(InMemoryCredentialRepository::with_credentials(credentials)),
            entitlements: Arc::new(InMemoryEntitlementRepository::with_entitlements(entitlements)),
        })
    }

    /// PostgreSQL stores sharing one pool
    pub async fn create_postgres(settings: &StorageSettings) -> Result<Repositories, DomainError> {
        let config = PostgresConfig::from_settings(settings)?;

        info!("Connecting to PostgreSQL...");
        let pool = config.connect().await?;
        info!("PostgreSQL connection established");

        if settings.run_migrations {
            let migrator = PostgresMigrator::new(pool.clone());
            migrator.run_all().await?;
            info!(version = ?migrator.current_version().await?, "Schema up to date");
        }

        Ok(Repositories {
            credentials: Arc::new(PostgresCredentialRepository::new(pool.clone())),
            entitlements: Arc::new(PostgresEntitlementRepository::new(pool)),
        })
    }
}
