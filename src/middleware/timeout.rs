use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    BoxError,
};
use serde_json::json;

use crate::error::Error;

/// Converts errors raised by the `tower` timeout layer into JSON responses.
pub async fn handle_timeout_error(err: BoxError) -> Response {
    if err.is::<tower::timeout::error::Elapsed>() {
        tracing::warn!("request timed out");
        (
            StatusCode::REQUEST_TIMEOUT,
            Json(json!({ "error": "Request timed out" })),
        )
            .into_response()
    } else {
        Error::Internal(format!("unhandled middleware error: {}", err)).into_response()
    }
}
