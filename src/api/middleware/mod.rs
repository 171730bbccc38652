//! API middleware components

pub mod logging;
pub mod metrics;
pub mod security;

pub use logging::{logging_middleware, make_request_span, redact_query};
pub use metrics::metrics_middleware;
pub use security::security_headers_middleware;
