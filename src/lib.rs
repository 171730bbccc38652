//! Font License Gateway
//!
//! Serves a font's stylesheet to callers presenting an API key that is
//! active and licensed for that font, with:
//! - An immutable catalog of bundled and configured fonts
//! - In-memory or PostgreSQL credential and entitlement stores
//! - CSS-comment diagnostics for every denial

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use anyhow::Context;
use tracing::info;

use api::state::AppState;
use infrastructure::catalog::load_catalog;
use infrastructure::license::LicenseService;
use infrastructure::storage::StorageFactory;

/// Create the application state from configuration
pub async fn create_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let catalog = load_catalog(&config.catalog).context("Failed to build font catalog")?;

    let repositories = StorageFactory::create(&config.storage, &config.seed)
        .await
        .context("Failed to initialize storage")?;

    let service = LicenseService::new(
        Arc::new(catalog),
        repositories.credentials,
        repositories.entitlements,
    );

    info!(
        fonts = service.catalog().len(),
        default_font = %service.catalog().default_font(),
        "License service ready"
    );

    Ok(AppState::new(service, config.catalog.cache_max_age_secs))
}
