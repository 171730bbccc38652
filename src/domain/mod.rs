//! Domain layer - Core business logic and entities

pub mod catalog;
pub mod credential;
pub mod entitlement;
pub mod error;
pub mod license;

pub use catalog::{FontCatalog, FontCatalogBuilder, FontId, FontIdError, Stylesheet};
pub use credential::{Credential, CredentialId, CredentialRepository};
pub use entitlement::{Entitlement, EntitlementRepository};
pub use error::DomainError;
pub use license::{LicenseOutcome, LicenseRequest};
