use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::{dto::user_dto::HealthResponse, utils::time, AppState};

#[utoipa::path(
    get,
    path = "/api/health",
    responses(
        (status = 200, description = "Database reachable", body = HealthResponse),
        (status = 503, description = "Database unreachable", body = HealthResponse)
    )
)]
#[axum::debug_handler]
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    match state.health_service.check().await {
        Ok(checked_at) => (
            StatusCode::OK,
            Json(HealthResponse::healthy(time::to_iso8601(checked_at))),
        ),
        Err(message) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(HealthResponse::unhealthy(message)),
        ),
    }
}
