//! Rate limiting middleware using token bucket algorithm.

use anyhow::Context;
use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer, governor::GovernorConfigBuilder, key_extractor::PeerIpKeyExtractor,
};

/// Per-IP rate limiter in front of every endpoint.
pub type RateLimitLayer =
    GovernorLayer<PeerIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body>;

/// Creates a rate limiter keyed on the client IP.
///
/// # Limits
///
/// - **Replenish**: one request every `replenish_ms` milliseconds
/// - **Burst**: `burst_size` requests
///
/// Requests exceeding the limit receive `429 Too Many Requests`.
///
/// # Key Extraction
///
/// Rate limits are applied per client IP address extracted from the
/// socket peer address, so the router must be served with
/// `into_make_service_with_connect_info::<SocketAddr>`.
///
/// # Errors
///
/// Returns an error if either value is zero.
///
/// # Example
///
/// ```rust,ignore
/// let app = Router::new()
///     .route("/shorten", post(shorten_handler))
///     .layer(rate_limit::layer(100, 100)?);
/// ```
pub fn layer(replenish_ms: u64, burst_size: u32) -> anyhow::Result<RateLimitLayer> {
    let governor_conf = GovernorConfigBuilder::default()
        .per_millisecond(replenish_ms)
        .burst_size(burst_size)
        .finish()
        .context("Rate limit interval and burst size must be greater than zero")?;

    Ok(GovernorLayer::new(Arc::new(governor_conf)))
}
