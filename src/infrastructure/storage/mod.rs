//! Storage infrastructure - backend selection, pooling and migrations

mod factory;
pub mod migrations;
mod postgres;

pub use factory::{Repositories, StorageFactory, StorageType};
pub use migrations::{license_migrations, Migration, PostgresMigrator};
pub use postgres::PostgresConfig;
