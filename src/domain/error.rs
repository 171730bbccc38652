use thiserror::Error;

/// Core domain errors
///
/// Denials (missing key, unknown font, disabled key, ...) are not errors; they are
/// [`LicenseOutcome`](crate::domain::license::LicenseOutcome) variants. This type only
/// covers conditions the gateway cannot answer from its own state.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Storage error: {message}")]
    Storage { message: String },
}

impl DomainError {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }
}
