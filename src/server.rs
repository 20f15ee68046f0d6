//! HTTP server initialization and runtime setup.
//!
//! Handles store connection, router construction, and Axum server lifecycle.

use crate::config::{Config, StoreBackend};
use crate::domain::repositories::KeyValueStore;
use crate::infrastructure::store::{MemoryStore, RedisStore};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio_retry::Retry;
use tokio_retry::strategy::{ExponentialBackoff, jitter};

/// Opens the configured store.
///
/// Redis connections are retried with exponential backoff (10ms, 100ms, 1s,
/// then capped at 5s) up to `STORE_CONNECT_RETRIES` times.
///
/// # Errors
///
/// Returns an error if Redis stays unreachable after every retry.
pub async fn connect_store(config: &Config) -> Result<Arc<dyn KeyValueStore>> {
    match config.store_backend {
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory store, mappings are lost on restart");
            Ok(Arc::new(MemoryStore::new()))
        }
        StoreBackend::Redis => {
            let redis_url = config.redis_url.as_str();
            let timeout = config.store_timeout();

            let strategy = ExponentialBackoff::from_millis(10)
                .max_delay(Duration::from_secs(5))
                .map(jitter)
                .take(config.store_connect_retries);

            let store = Retry::spawn(strategy, move || async move {
                RedisStore::connect(redis_url, timeout)
                    .await
                    .inspect_err(|e| tracing::warn!(error = %e, "Redis connection attempt failed"))
            })
            .await
            .context("Failed to connect to Redis")?;

            Ok(Arc::new(store))
        }
    }
}

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Key-value store (Redis or in-memory)
/// - Mapping and metrics services
/// - Axum HTTP server with graceful shutdown on Ctrl+C
///
/// # Errors
///
/// Returns an error if:
/// - Store connection fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let store = connect_store(&config).await?;

    let state = AppState::from_config(store, &config);
    let app = app_router(state, &config)?;

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid listen address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    tracing::info!("Shutdown signal received");
}
