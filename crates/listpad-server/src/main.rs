//! Listpad server entry point.
//!
//! Connects the configured listing store, then starts the Axum HTTP server
//! with graceful shutdown. A background sweeper drops idle form views and
//! is cancelled on shutdown.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tracing::info;

use listpad_storage::{ListingStore, MemoryStore};

use listpad_server::config::{ServerConfig, StoreBackendType};
use listpad_server::routes;
use listpad_server::state::AppState;
use listpad_server::views;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::from_env();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level)),
        )
        .json()
        .init();

    info!(store = ?config.store, "Listpad starting");

    let store = connect_store(&config.store).await?;
    let state = Arc::new(AppState::new(store, &config));

    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let sweeper_handle = {
        let views = Arc::clone(&state.views);
        let rx = shutdown_rx.clone();
        tokio::spawn(views::sweep_worker(views, rx, config.view_sweep_interval))
    };

    let app = routes::app(Arc::clone(&state));

    let listener = TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind to {}", config.bind_addr))?;

    info!(addr = %config.bind_addr, "Listpad server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown_tx))
        .await
        .context("server error")?;

    info!("waiting for background workers to stop");
    let _ = tokio::time::timeout(Duration::from_secs(10), sweeper_handle).await;

    info!("Listpad server stopped");
    Ok(())
}

/// Open the listing store the configuration asks for.
async fn connect_store(backend: &StoreBackendType) -> anyhow::Result<Arc<dyn ListingStore>> {
    let store: Arc<dyn ListingStore> = match backend {
        StoreBackendType::Memory => {
            info!("using in-memory store (listings will not persist)");
            Arc::new(MemoryStore::new())
        }
        #[cfg(feature = "postgres-backend")]
        StoreBackendType::Postgres { url } => {
            info!(url = %"[redacted]", "using PostgreSQL store");
            Arc::new(
                listpad_storage::PostgresStore::connect(url)
                    .await
                    .context("failed to connect to PostgreSQL store")?,
            )
        }
        #[cfg(not(feature = "postgres-backend"))]
        StoreBackendType::Postgres { .. } => {
            anyhow::bail!(
                "PostgreSQL store requested but feature 'postgres-backend' is not enabled"
            );
        }
        #[cfg(feature = "rest-backend")]
        StoreBackendType::Rest { url, api_key } => {
            let store = listpad_storage::RestStore::new(url, api_key)
                .context("failed to build REST store client")?;
            info!(endpoint = %store.endpoint(), "using REST store");
            Arc::new(store)
        }
        #[cfg(not(feature = "rest-backend"))]
        StoreBackendType::Rest { .. } => {
            anyhow::bail!("REST store requested but feature 'rest-backend' is not enabled");
        }
    };
    Ok(store)
}

/// Wait for SIGINT or SIGTERM, then broadcast shutdown.
async fn shutdown_signal(shutdown_tx: watch::Sender<bool>) {
    let ctrl_c = async {
        tokio::signal::ctrl_c().await.ok();
    };

    #[cfg(unix)]
    let terminate = async {
        if let Ok(mut sig) =
            tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
        {
            sig.recv().await;
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("shutdown signal received, stopping server");
    let _ = shutdown_tx.send(true);
}
