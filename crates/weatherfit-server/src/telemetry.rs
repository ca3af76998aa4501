//! Logging and metrics setup

use anyhow::Result;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tracing::info;

use crate::cli::LogFormat;

/// Initialize tracing/logging
pub fn init_tracing(verbose: bool, format: LogFormat) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("weatherfit=debug,tower_http=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("weatherfit=info"))
    };

    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).init(),
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
    }
}

/// Initialize metrics exporter and return handle for rendering
pub fn init_metrics() -> Result<PrometheusHandle> {
    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| anyhow::anyhow!("Failed to install metrics: {}", e))?;

    metrics::describe_counter!(
        "weatherfit_requests_total",
        "Total number of requests by endpoint"
    );
    metrics::describe_counter!(
        "weatherfit_predictions_total",
        "Total number of successful predictions by label"
    );
    metrics::describe_counter!(
        "weatherfit_errors_total",
        "Total number of failed requests by error kind"
    );
    metrics::describe_histogram!(
        "weatherfit_inference_latency_us",
        metrics::Unit::Microseconds,
        "Model inference latency in microseconds"
    );

    info!("Metrics exporter initialized");
    Ok(handle)
}
