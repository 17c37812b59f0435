use std::sync::Arc;

use anyhow::Context;

use myshop_api::config::ServerConfig;
use myshop_infra::{MongoProductStore, StoreConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    myshop_observability::init();

    let server = ServerConfig::from_env()?;
    let store_config = StoreConfig::from_env()?;

    let store = MongoProductStore::connect(&store_config)
        .await
        .context("failed to connect to document store")?;

    let app = myshop_api::app::build_app(Arc::new(store));

    let listener = tokio::net::TcpListener::bind(server.bind_addr())
        .await
        .with_context(|| format!("failed to bind {}", server.bind_addr()))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        return;
    }
    tracing::info!("shutdown signal received");
}
