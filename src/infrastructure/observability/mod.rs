//! Observability infrastructure - Tracing export and Prometheus metrics

mod config;
mod metrics;
mod tracing_setup;

pub use config::{MetricsConfig, ObservabilityConfig, TracingConfig};
pub use metrics::{
    create_metrics_router, init_metrics, record_http_request, record_license_outcome,
    record_usage_failure, PrometheusMetrics,
};
pub use tracing_setup::{build_tracer_provider, shutdown_tracing};
