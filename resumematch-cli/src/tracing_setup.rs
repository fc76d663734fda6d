//! Logging for the resumematch binary
//!
//! Console output goes to stderr, filtered by `RUST_LOG` (default `info`,
//! or `debug` with `--debug`). Built with the `telemetry` feature, `--otel`
//! also exports spans over OTLP:
//!
//!   OTEL_EXPORTER_OTLP_ENDPOINT       # default: http://localhost:4317
//!   OTEL_SERVICE_NAME                 # default: resumematch

use anyhow::{anyhow, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Clone, Default)]
pub struct TracingConfig {
    pub debug: bool,
    pub otel: bool,
}

/// Install the global subscriber. Call once, before any command runs.
pub fn init(config: &TracingConfig) -> Result<()> {
    let default = if config.debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    let console = tracing_subscriber::fmt::layer()
        .with_target(config.debug)
        .with_writer(std::io::stderr)
        .compact();

    let registry = tracing_subscriber::registry().with(filter).with(console);

    #[cfg(feature = "telemetry")]
    let registry = registry.with(if config.otel {
        Some(otel::layer()?)
    } else {
        None
    });

    registry.try_init().map_err(|err| anyhow!(err))?;

    #[cfg(feature = "telemetry")]
    if config.otel {
        tracing::info!(endpoint = %otel::endpoint(), "OpenTelemetry export enabled");
    }
    #[cfg(not(feature = "telemetry"))]
    if config.otel {
        tracing::warn!("--otel ignored: built without the telemetry feature");
    }
    Ok(())
}

/// Flush pending spans before exit
#[cfg(feature = "telemetry")]
pub fn shutdown_otel() {
    opentelemetry::global::shutdown_tracer_provider();
}

#[cfg(not(feature = "telemetry"))]
pub fn shutdown_otel() {}

#[cfg(feature = "telemetry")]
mod otel {
    use anyhow::{anyhow, Result};
    use opentelemetry::trace::TracerProvider as _;
    use opentelemetry::KeyValue;
    use opentelemetry_otlp::WithExportConfig;
    use opentelemetry_sdk::trace::{Tracer, TracerProvider};
    use tracing_opentelemetry::OpenTelemetryLayer;
    use tracing_subscriber::registry::LookupSpan;

    pub fn endpoint() -> String {
        std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
            .unwrap_or_else(|_| "http://localhost:4317".to_string())
    }

    pub fn layer<S>() -> Result<OpenTelemetryLayer<S, Tracer>>
    where
        S: tracing::Subscriber + for<'span> LookupSpan<'span>,
    {
        let service_name =
            std::env::var("OTEL_SERVICE_NAME").unwrap_or_else(|_| "resumematch".to_string());

        let exporter = opentelemetry_otlp::SpanExporter::builder()
            .with_tonic()
            .with_endpoint(endpoint())
            .build()
            .map_err(|e| anyhow!("Failed to create OTLP exporter: {}", e))?;

        let provider = TracerProvider::builder()
            .with_batch_exporter(exporter, opentelemetry_sdk::runtime::Tokio)
            .with_resource(opentelemetry_sdk::Resource::new(vec![KeyValue::new(
                "service.name",
                service_name,
            )]))
            .build();

        let tracer = provider.tracer("resumematch");
        // The global provider keeps the exporter alive until shutdown_otel
        let _ = opentelemetry::global::set_tracer_provider(provider);

        Ok(tracing_opentelemetry::layer().with_tracer(tracer))
    }
}
