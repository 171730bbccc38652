//! Layered application configuration
//!
//! Sources, later overriding earlier: `config/default.*`, `config/local.*`, then
//! `APP__SECTION__FIELD` environment variables.

mod app_config;

pub use app_config::{
    AppConfig, CatalogConfig, LogFormat, LoggingConfig, SeedConfig, SeedCredential, ServerConfig,
    StorageSettings,
};
