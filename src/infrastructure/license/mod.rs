//! License validation

mod service;

pub use service::{key_fingerprint, LicenseService};
