pub mod docs;
pub mod health;
pub mod users;

use axum::{
    error_handling::HandleErrorLayer,
    extract::DefaultBodyLimit,
    routing::{get, get_service},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{catch_panic::CatchPanicLayer, services::ServeFile, trace::TraceLayer};

use crate::{
    config::Config,
    error::Error,
    middleware::{cors::cors_layer, panic::handle_panic, timeout::handle_timeout_error},
    AppState,
};

pub const MAX_BODY_BYTES: usize = 64 * 1024;

/// Every path/method pair the service answers; anything else is a JSON 404.
pub fn build_router(state: AppState, config: &Config) -> Router {
    let api = Router::new()
        .route("/api/health", get(health::health).fallback(not_found))
        .route(
            "/api/users",
            get(users::list_users)
                .post(users::create_user)
                .fallback(not_found),
        )
        .route("/api/openapi.json", get(docs::openapi_json).fallback(not_found));

    let index = get_service(ServeFile::new(&config.static_index)).fallback(not_found);

    Router::new()
        .merge(api)
        .route("/", index)
        .fallback(not_found)
        .with_state(state)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(cors_layer(config.cors_allowed_origin.as_deref()))
        .layer(TraceLayer::new_for_http())
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(handle_timeout_error))
                .timeout(config.request_timeout),
        )
        .layer(CatchPanicLayer::custom(handle_panic))
}

pub async fn not_found() -> Error {
    Error::NotFound("Not Found".to_string())
}
