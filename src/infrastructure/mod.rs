//! Infrastructure layer - External service implementations

pub mod catalog;
pub mod credential;
pub mod entitlement;
pub mod license;
pub mod logging;
pub mod observability;
pub mod storage;
pub mod usage;
