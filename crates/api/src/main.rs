//! MedLink portal server binary.
//!
//! Wires configuration, storage, and the identity service into an HTTP
//! server. Configuration resolution order: environment variables, then the
//! config file, then built-in defaults.

use anyhow::Context as _;
use medlink_api::{build_router, AppContext};
use medlink_domain::Config;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Ok(path) = dotenvy::dotenv() {
        info!(path = %path.display(), "loaded environment file");
    }

    let config = medlink_infra::load().unwrap_or_else(|err| {
        warn!(error = %err, "no configuration source found, using defaults");
        Config::default()
    });

    let bind_addr = config.server.bind_addr.clone();
    let context = AppContext::new(config).context("failed to initialize the portal")?;
    let app = build_router(context)?;

    let listener = TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;
    info!(addr = %bind_addr, "portal listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("portal stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to install shutdown handler");
    }
}
