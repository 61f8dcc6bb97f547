pub mod config;
pub mod error;
pub mod guard;
pub mod routes;

use tokio::net::TcpListener;
use tracing::{info, warn};

pub use config::{ClientConfig, ServerConfig};
pub use error::ServerError;

pub async fn run() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = ServerConfig::load()?;
    let addr = config.socket_addr()?;
    let app = routes::create_router(&config);

    let listener = TcpListener::bind(addr).await?;
    info!(
        "Serving {} on {} (approval service: {})",
        config.dist_dir.display(),
        addr,
        config.client.api_base_url
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
    }
    info!("Shutting down");
}
