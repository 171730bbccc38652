//! Entitlement store implementations

mod in_memory;
mod postgres;

pub use in_memory::InMemoryEntitlementRepository;
pub use postgres::PostgresEntitlementRepository;
