use std::{
    sync::{Mutex, OnceLock},
    time::{Duration, SystemTime, UNIX_EPOCH},
};

use anyhow::{Context, Result};
use metrics::{histogram, increment_counter};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_FILTER: &str = "info,tower_http=info";

static TRACING_INIT: OnceLock<()> = OnceLock::new();
static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();
static METRICS_GUARD: Mutex<()> = Mutex::new(());

/// Configures global tracing subscribers using `tracing-subscriber`.
///
/// `RUST_LOG` overrides the default filter.
pub fn init_tracing() -> Result<()> {
    if TRACING_INIT.get().is_some() {
        return Ok(());
    }

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    if let Err(err) = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true).with_level(true).compact())
        .try_init()
    {
        // Tests share one process; a subscriber installed elsewhere is fine.
        if TRACING_INIT.get().is_none() {
            return Err(anyhow::Error::from(err));
        }
    }

    let _ = TRACING_INIT.set(());
    Ok(())
}

/// Installs the global Prometheus recorder and returns a handle for scraping metrics.
pub fn init_metrics() -> Result<PrometheusHandle> {
    if let Some(handle) = METRICS_HANDLE.get() {
        return Ok(handle.clone());
    }

    let _lock = METRICS_GUARD
        .lock()
        .map_err(|_| anyhow::anyhow!("metrics init mutex poisoned"))?;
    if let Some(handle) = METRICS_HANDLE.get() {
        return Ok(handle.clone());
    }

    let recorder = PrometheusBuilder::new()
        .set_quantiles(&[0.5, 0.9, 0.99])
        .context("invalid quantile configuration")?
        .install_recorder()
        .context("failed to install Prometheus recorder")?;

    metrics::describe_histogram!(
        "http_request_duration_seconds",
        "Latency distribution for HTTP requests handled by the server"
    );
    metrics::describe_counter!(
        "http_requests_total",
        "Total number of HTTP requests processed by the server"
    );
    metrics::describe_counter!(
        "content_loads_total",
        "Menu and page loads from the content API, labelled by outcome"
    );
    metrics::describe_histogram!(
        "content_load_duration_seconds",
        "Time spent fetching the menu and page for a request"
    );
    metrics::describe_gauge!(
        "process_start_time_seconds",
        "Unix timestamp for the process start time"
    );

    let _ = METRICS_HANDLE.set(recorder.clone());
    Ok(recorder)
}

/// Records one content load. `outcome` is `ok` or the fetch error kind.
pub fn record_content_load(outcome: &'static str, elapsed: Duration) {
    increment_counter!("content_loads_total", "outcome" => outcome);
    histogram!("content_load_duration_seconds", elapsed.as_secs_f64(), "outcome" => outcome);
}

pub fn register_process_metrics() {
    if let Ok(epoch) = SystemTime::now().duration_since(UNIX_EPOCH) {
        metrics::gauge!(
            "process_start_time_seconds",
            epoch.as_secs_f64(),
            "service" => "content_server",
        );
    }
}
