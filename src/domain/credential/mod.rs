//! Credential domain
//!
//! Issued API keys with their active flag, owner and last-used timestamp.

mod entity;
mod repository;

pub use entity::{Credential, CredentialId};
pub use repository::CredentialRepository;

#[cfg(test)]
pub use repository::MockCredentialRepository;
