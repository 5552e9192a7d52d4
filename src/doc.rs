use utoipa::OpenApi;

use crate::dto::user_dto::{
    CreateUserPayload, ErrorResponse, FieldError, HealthResponse, HealthStatus, UserResponse,
    ValidationErrorResponse,
};
use crate::routes;

#[derive(OpenApi)]
#[openapi(
    paths(
        routes::health::health,
        routes::users::list_users,
        routes::users::create_user,
    ),
    components(schemas(
        CreateUserPayload,
        UserResponse,
        FieldError,
        ValidationErrorResponse,
        ErrorResponse,
        HealthStatus,
        HealthResponse,
    )),
    tags((name = "users", description = "User management"))
)]
pub struct ApiDoc;
