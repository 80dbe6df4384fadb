//! Logging for Verdict
//!
//! Installs a `tracing-subscriber` registry with an `EnvFilter` and either
//! the text or the JSON formatter

use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;
use verdict_config::{LogFormat, TelemetryConfig};

/// Initialize the global subscriber from configuration
///
/// `RUST_LOG` overrides the configured filter. An unparsable filter falls
/// back to `info` rather than failing startup.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed
pub fn init(config: &TelemetryConfig) -> anyhow::Result<()> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let env = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = build_filter(&config.log_filter, env.as_deref());

    let registry = tracing_subscriber::registry().with(filter);

    let result = match config.format {
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
                    .with_target(true)
                    .with_current_span(true),
            )
            .try_init(),
    };

    result.map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {e}"))
}

/// Resolve the effective filter, preferring the environment override
fn build_filter(configured: &str, env: Option<&str>) -> EnvFilter {
    env.and_then(|directives| EnvFilter::try_new(directives).ok())
        .or_else(|| EnvFilter::try_new(configured).ok())
        .unwrap_or_else(|| EnvFilter::default().add_directive(LevelFilter::INFO.into()))
}
