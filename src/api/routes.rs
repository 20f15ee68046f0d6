//! API route configuration.

use crate::api::handlers::{health_handler, metrics_handler, redirect_handler, shorten_handler};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// All service endpoints, without middleware.
///
/// # Endpoints
///
/// - `POST /shorten`  - Shorten a URL
/// - `GET  /metrics`  - Top domains by distinct links
/// - `GET  /health`   - Store health check
/// - `GET  /{code}`   - 301 redirect to the original URL
///
/// Static segments take precedence over `/{code}`, so `metrics` and
/// `health` are never looked up as codes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/shorten", post(shorten_handler))
        .route("/metrics", get(metrics_handler))
        .route("/health", get(health_handler))
        .route("/{code}", get(redirect_handler))
}
