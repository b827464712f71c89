//! Logging setup for Recite
//!
//! Installs a `tracing-subscriber` registry with an `EnvFilter` and a
//! fmt layer in either human-readable or JSON form.

use recite_config::{LogFormat, TelemetryConfig};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the global tracing subscriber
///
/// Filter precedence: `telemetry.filter` from the config file, then the
/// `RUST_LOG` environment variable, then `default_filter`.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed
pub fn init(config: Option<&TelemetryConfig>, default_filter: &str) -> anyhow::Result<()> {
    let filter = resolve_filter(config.and_then(|c| c.filter.as_deref()), default_filter);
    let format = config.map(|c| c.format).unwrap_or_default();

    let registry = tracing_subscriber::registry().with(filter);

    let result = match format {
        LogFormat::Text => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_line_number(false),
            )
            .try_init(),
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_span_list(false)
                    .with_target(true),
            )
            .try_init(),
    };

    result.map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {e}"))
}

fn resolve_filter(configured: Option<&str>, default_filter: &str) -> EnvFilter {
    if let Some(directives) = configured {
        if let Ok(filter) = EnvFilter::try_new(directives) {
            return filter;
        }
        eprintln!("invalid telemetry.filter `{directives}`, falling back to defaults");
    }

    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}
