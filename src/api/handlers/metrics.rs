//! Handler for the top domains endpoint.

use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};
use serde_json::json;
use validator::Validate;

use crate::api::dto::metrics::{TopDomainsQuery, TopDomainsResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Reports the domains with the most distinct shortened links.
///
/// # Endpoint
///
/// `GET /metrics?limit=N`
///
/// # Query Parameters
///
/// - `limit` (optional): number of domains, 1-100 (default: `TOP_DOMAINS_LIMIT`, 3)
///
/// # Response
///
/// ```json
/// { "speedtest.net": 3, "github.com": 2, "wikipedia.org": 1 }
/// ```
///
/// An empty store yields `{}`.
///
/// # Errors
///
/// - **400 Bad Request**: `limit` is not a number or out of range
/// - **500 Internal Server Error**: store failure
pub async fn metrics_handler(
    State(state): State<AppState>,
    query: Result<Query<TopDomainsQuery>, QueryRejection>,
) -> Result<Json<TopDomainsResponse>, AppError> {
    let Query(query) = query.map_err(|rejection| {
        AppError::bad_request(
            "Invalid query parameters",
            json!({"reason": rejection.body_text()}),
        )
    })?;

    query.validate()?;

    let limit = query.limit.unwrap_or(state.top_domains_limit);
    let top = state.metrics_service.top_domains(limit).await?;

    Ok(Json(
        top.into_iter()
            .map(|entry| (entry.domain, entry.count))
            .collect(),
    ))
}
