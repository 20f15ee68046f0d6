//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `POST /shorten`  - Shorten a URL
//! - `GET  /metrics`  - Top domains
//! - `GET  /health`   - Store health check
//! - `GET  /{code}`   - Short link redirect
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::middleware::{rate_limit, tracing};
use crate::config::Config;
use crate::state::AppState;
use axum::Router;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
///
/// # Errors
///
/// Returns an error if the rate limit settings are rejected.
pub fn app_router(state: AppState, config: &Config) -> anyhow::Result<NormalizePath<Router>> {
    let router = api::routes::api_routes()
        .layer(rate_limit::layer(
            config.rate_limit_replenish_ms,
            config.rate_limit_burst,
        )?)
        .with_state(state)
        .layer(tracing::layer());

    Ok(NormalizePathLayer::trim_trailing_slash().layer(router))
}
