//! HTTP response types

pub mod stylesheet;

pub use stylesheet::{preflight_response, CacheDirective, StylesheetResponse, CSS_CONTENT_TYPE};
