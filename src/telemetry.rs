//! Logging and metrics bootstrap

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};
use tracing::info;

use crate::config::{AppConfig, LoggingConfig};
use crate::shared::ConfigError;

/// Install the global tracing subscriber. `RUST_LOG` takes precedence over
/// the configured level.
pub fn init_tracing(config: &LoggingConfig) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.level));

    match config.format.to_lowercase().as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum MetricsError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to install Prometheus exporter: {0}")]
    Install(#[from] BuildError),
}

/// Start the Prometheus scrape endpoint when enabled. Must run inside the
/// tokio runtime.
pub fn install_metrics(config: &AppConfig) -> Result<(), MetricsError> {
    if !config.metrics.enabled {
        return Ok(());
    }
    let addr = config.metrics_addr()?;
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    info!("Prometheus metrics exposed on http://{}/metrics", addr);
    Ok(())
}
