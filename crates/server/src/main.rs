use std::{net::SocketAddr, time::Duration, time::Instant};

use anyhow::{Context, Result};
use clap::Parser;
use content::{ContentConfig, ContentLoader};
use server::{app::AppState, build_router, telemetry};

#[derive(Parser, Debug)]
#[command(author, version, about = "Serves pages backed by a remote JSON content API")]
struct Cli {
    /// Base URL of the content API, e.g. `https://cms.example.com/api`.
    #[arg(long, env = "CONTENT_API_URL", value_name = "URL")]
    api_url: String,

    /// Path prefix the content routes are mounted under.
    #[arg(long, env = "CONTENT_ROUTE_ROOT", default_value = "/")]
    route_root: String,

    /// Upper bound for each request to the content API. Unbounded when omitted.
    #[arg(long, env = "CONTENT_UPSTREAM_TIMEOUT_SECS", value_name = "SECONDS")]
    upstream_timeout_secs: Option<u64>,

    /// Port to listen on.
    #[arg(long, env = "PORT", default_value_t = 3000)]
    port: u16,
}

impl Cli {
    fn content_config(&self) -> ContentConfig {
        let config = ContentConfig::new(&self.api_url, &self.route_root);
        match self.upstream_timeout_secs {
            Some(secs) => config.with_timeout(Duration::from_secs(secs)),
            None => config,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    telemetry::init_tracing().context("failed to initialise tracing")?;
    let metrics = telemetry::init_metrics().context("failed to initialise metrics")?;

    let loader = ContentLoader::try_new(cli.content_config())
        .with_context(|| format!("invalid content API url '{}'", cli.api_url))?;
    telemetry::register_process_metrics();

    tracing::info!(
        api_url = %loader.source().base_url(),
        route_root = %loader.route_root(),
        "content loader ready",
    );

    let state = AppState::new(loader, metrics, Instant::now());
    let router = build_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], cli.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind to {addr}"))?;

    tracing::info!("server listening on http://{addr}");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server terminated unexpectedly")?;

    Ok(())
}

#[cfg(unix)]
async fn shutdown_signal() {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigterm = match signal(SignalKind::terminate()) {
        Ok(sigterm) => sigterm,
        Err(err) => {
            tracing::warn!(error = %err, "SIGTERM handler unavailable, waiting for Ctrl+C only");
            let _ = tokio::signal::ctrl_c().await;
            return;
        }
    };

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("received Ctrl+C, initiating shutdown");
        }
        _ = sigterm.recv() => {
            tracing::info!("received SIGTERM, initiating shutdown");
        }
    }
}

#[cfg(not(unix))]
async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %err, "failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    tracing::info!("received Ctrl+C, initiating shutdown");
}
