//! Application state for shared services

use std::sync::Arc;

use crate::infrastructure::license::LicenseService;

/// Application state shared by every handler
#[derive(Clone)]
pub struct AppState {
    pub license_service: Arc<LicenseService>,
    /// `max-age` advertised on successful stylesheet responses
    pub cache_max_age: u64,
}

impl AppState {
    pub fn new(license_service: LicenseService, cache_max_age: u64) -> Self {
        Self {
            license_service: Arc::new(license_service),
            cache_max_age,
        }
    }
}
