//! Check-config command - validates the configuration without serving

use anyhow::{bail, Context};

use crate::config::AppConfig;
use crate::infrastructure::catalog::load_catalog;
use crate::infrastructure::storage::{StorageFactory, StorageType};

const REDACTED: &str = "[REDACTED]";

/// Load, validate and print the effective configuration
pub fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;
    let report = validate(&config)?;

    println!("{}", serde_json::to_string_pretty(&redacted(&config))?);
    println!("{}", report);

    Ok(())
}

/// Everything that can be checked without network access
fn validate(config: &AppConfig) -> anyhow::Result<String> {
    let catalog = load_catalog(&config.catalog)?;

    let Some(storage_type) = StorageType::parse(&config.storage.backend) else {
        bail!("Unknown storage backend '{}'", config.storage.backend);
    };

    if storage_type == StorageType::InMemory {
        StorageFactory::create_in_memory(&config.seed)?;
    }

    let fonts: Vec<&str> = catalog.font_ids().into_iter().map(|id| id.as_str()).collect();

    Ok(format!(
        "Configuration OK: {} fonts [{}], default '{}', {:?} storage, {} seed credentials",
        catalog.len(),
        fonts.join(", "),
        catalog.default_font(),
        storage_type,
        config.seed.credentials.len()
    ))
}

/// Copy of the configuration safe to print
fn redacted(config: &AppConfig) -> AppConfig {
    let mut config = config.clone();

    if config.storage.database_url.is_some() {
        config.storage.database_url = Some(REDACTED.to_string());
    }

    for credential in &mut config.seed.credentials {
        credential.key = REDACTED.to_string();
    }

    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SeedCredential;

    fn seeded() -> AppConfig {
        let mut config = AppConfig::default();
        config.storage.database_url = Some("postgres://user:secret@db/fonts".to_string());
        config.seed.credentials.push(SeedCredential {
            id: "cred-1".to_string(),
            key: "abc123".to_string(),
            owner_id: "owner-1".to_string(),
            active: true,
            fonts: vec!["july".to_string()],
        });
        config
    }

    #[test]
    fn test_validate_defaults() {
        let report = validate(&AppConfig::default()).unwrap();

        assert!(report.contains("default 'july'"));
        assert!(report.contains("InMemory"));
    }

    #[test]
    fn test_validate_rejects_unknown_default_font() {
        let mut config = AppConfig::default();
        config.catalog.default_font = "arial".to_string();

        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_validate_rejects_unknown_backend() {
        let mut config = AppConfig::default();
        config.storage.backend = "redis".to_string();

        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_redacted_hides_secrets() {
        let printed = serde_json::to_string(&redacted(&seeded())).unwrap();

        assert!(!printed.contains("secret"));
        assert!(!printed.contains("abc123"));
        assert!(printed.contains("cred-1"));
    }
}
