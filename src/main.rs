use anyhow::{Context, Result};
use docsum::{api, config, logging, processing::DocumentService};
use std::net::Ipv4Addr;
use std::sync::Arc;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    logging::init_tracing();
    let config = config::load_config().context("failed to load configuration")?;

    let service = DocumentService::from_config(&config)
        .context("failed to initialize document pipeline")?;
    let app = api::create_router(Arc::new(service), api::HttpSettings::from(&config));

    let listener = TcpListener::bind((Ipv4Addr::UNSPECIFIED, config.server_port))
        .await
        .with_context(|| format!("failed to bind port {}", config.server_port))?;
    tracing::info!(
        model = %config.gemini_model,
        "Listening on http://0.0.0.0:{}",
        config.server_port
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server terminated unexpectedly")
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::warn!(%error, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
