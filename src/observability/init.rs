//! Tracing subscriber setup.

use opentelemetry::trace::TracerProvider as _;
use opentelemetry::KeyValue;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use super::exporter;
use crate::infrastructure::get_data_dir;
use crate::Config;

/// Trace file name inside the data directory.
pub const TRACE_FILE_NAME: &str = "zapprove-otlp.json";

const SERVICE_NAME: &str = "zapprove";

/// Installs the global subscriber: an `EnvFilter` from `trace_level`
/// (default `"info"`) feeding an OpenTelemetry layer that exports to
/// `<data_dir>/zapprove-otlp.json`.
///
/// Best effort. If the data directory cannot be created or a subscriber is
/// already installed, the call does nothing.
///
/// # Example
///
/// ```rust,no_run
/// use zapprove::observability::init_tracing;
/// use zapprove::Config;
///
/// let config = Config {
///     trace_level: Some("zapprove=debug".to_string()),
///     ..Default::default()
/// };
/// init_tracing(&config);
/// tracing::debug!("tracing is now active");
/// ```
pub fn init_tracing(config: &Config) {
    let level = config.trace_level.as_deref().unwrap_or("info");

    let data_dir = get_data_dir();
    if std::fs::create_dir_all(&data_dir).is_err() {
        return;
    }

    let resource = Resource::new(vec![KeyValue::new("service.name", SERVICE_NAME)]);
    let provider = exporter::tracer_provider(data_dir.join(TRACE_FILE_NAME), resource);
    let tracer = provider.tracer(SERVICE_NAME);

    let _ = tracing_subscriber::registry()
        .with(EnvFilter::new(level))
        .with(OpenTelemetryLayer::new(tracer))
        .try_init();
}
