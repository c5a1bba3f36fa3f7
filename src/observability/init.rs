//! Tracing initialization and subscriber setup.

use super::exporter;
use crate::infrastructure::paths;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Service name attached to every exported span.
const SERVICE_NAME: &str = "KnowledgeLink";

/// Initializes the tracing subscriber with file-based OTLP export.
///
/// The filter comes from `trace_level` (default `info`) and accepts full
/// `EnvFilter` directives such as `knowledgelink::backend=debug`. Spans go to
/// `~/.local/share/zellij/knowledgelink/knowledgelink-otlp.json`.
///
/// Observability is optional: if the data directory cannot be created, tracing
/// stays off. Only the first call takes effect.
pub fn init_tracing(config: &Config) {
    let level = config.trace_level.as_deref().unwrap_or("info");

    if std::fs::create_dir_all(paths::data_dir()).is_err() {
        return;
    }

    let resource = Resource::new(vec![
        opentelemetry::KeyValue::new("service.name", SERVICE_NAME),
        opentelemetry::KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
    ]);

    let provider = exporter::tracer_provider(paths::trace_file(), resource);
    let tracer = provider.tracer(SERVICE_NAME);

    let subscriber = tracing_subscriber::registry()
        .with(EnvFilter::new(level))
        .with(OpenTelemetryLayer::new(tracer));

    let _ = subscriber.try_init();
}
