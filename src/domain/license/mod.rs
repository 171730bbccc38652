//! License validation domain

mod outcome;

pub use outcome::{LicenseOutcome, LicenseRequest, FONT_PARAM, KEY_PARAM, RESOURCE_PARAM};
