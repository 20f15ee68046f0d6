//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use metrics::counter;
use tracing::debug;

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// # Response
///
/// **301 Moved Permanently** with the stored URL in `Location`, byte for
/// byte as it was submitted. `Redirect::permanent` answers 308, so the
/// status is set explicitly.
///
/// # Errors
///
/// Returns 404 Not Found if the code is unknown.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    let original_url = state.mapping_service.resolve(&code).await?;

    debug!(code = %code, "Redirecting");
    counter!("shortener_redirects_total").increment(1);

    Ok((
        StatusCode::MOVED_PERMANENTLY,
        [(header::LOCATION, original_url)],
    )
        .into_response())
}
