//! Handler for link shortening endpoint.

use axum::{Json, extract::State, extract::rejection::JsonRejection};
use serde_json::json;
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Creates (or returns the existing) short URL for a long URL.
///
/// # Endpoint
///
/// `POST /shorten`
///
/// # Request Body
///
/// ```json
/// { "url": "https://www.github.com" }
/// ```
///
/// # Response
///
/// ```json
/// { "short_url": "d0409d29" }
/// ```
///
/// Shortening the same URL again returns the same short URL and does not
/// touch the domain counters.
///
/// # Errors
///
/// - **400 Bad Request**: body is not JSON, lacks `url`, or the URL is not
///   an absolute HTTP(S) URL
/// - **500 Internal Server Error**: store failure or code space exhausted
pub async fn shorten_handler(
    State(state): State<AppState>,
    payload: Result<Json<ShortenRequest>, JsonRejection>,
) -> Result<Json<ShortenResponse>, AppError> {
    let Json(payload) = payload.map_err(|rejection| {
        AppError::bad_request(
            "Invalid request body",
            json!({"reason": rejection.body_text()}),
        )
    })?;

    payload.validate()?;

    let outcome = state.mapping_service.shorten(&payload.url).await?;

    Ok(Json(ShortenResponse {
        short_url: outcome.mapping.short_url(state.base_url.as_deref()),
    }))
}
