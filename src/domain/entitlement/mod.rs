//! Entitlement domain
//!
//! A grant of one credential to one font. The existence of a grant is the only
//! authorization signal; there is no wildcard grant.

mod entity;
mod repository;

pub use entity::Entitlement;
pub use repository::EntitlementRepository;

#[cfg(test)]
pub use repository::MockEntitlementRepository;
