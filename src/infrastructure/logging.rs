use opentelemetry::trace::TracerProvider as _;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer,
};

use crate::config::{LogFormat, LoggingConfig};
use crate::infrastructure::observability::{build_tracer_provider, TracingConfig};

/// Install the global subscriber
///
/// `RUST_LOG` takes precedence over the configured level. When OpenTelemetry
/// export is enabled but cannot be set up, logging still starts and the failure
/// is reported as a warning.
pub fn init_logging(config: &LoggingConfig, tracing_config: &TracingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let fmt_layer = match config.format {
        LogFormat::Json => fmt::layer()
            .json()
            .with_span_events(FmtSpan::CLOSE)
            .with_target(true)
            .with_thread_ids(true)
            .boxed(),
        LogFormat::Pretty => fmt::layer()
            .pretty()
            .with_target(true)
            .with_span_events(FmtSpan::CLOSE)
            .boxed(),
    };

    let (otel_layer, otel_error) = if tracing_config.enabled {
        match build_tracer_provider(tracing_config) {
            Ok(provider) => {
                let tracer = provider.tracer(tracing_config.service_name.clone());
                opentelemetry::global::set_tracer_provider(provider);
                (Some(tracing_opentelemetry::layer().with_tracer(tracer)), None)
            }
            Err(e) => (None, Some(e)),
        }
    } else {
        (None, None)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .with(otel_layer)
        .init();

    match (tracing_config.enabled, otel_error) {
        (true, None) => tracing::info!(
            "Logging initialized with level {} and OpenTelemetry export to {}",
            config.level,
            tracing_config.otlp_endpoint
        ),
        (true, Some(e)) => tracing::warn!(
            "Failed to initialize OpenTelemetry: {}. Span export disabled.",
            e
        ),
        (false, _) => tracing::info!("Logging initialized with level: {}", config.level),
    }
}
