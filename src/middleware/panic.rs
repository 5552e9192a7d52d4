use std::any::Any;

use axum::response::{IntoResponse, Response};

use crate::error::Error;

/// Panic handler for `CatchPanicLayer`: logs the payload, returns a bare 500.
pub fn handle_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = payload.downcast_ref::<&str>() {
        *s
    } else {
        "unknown panic payload"
    };

    Error::Internal(format!("handler panicked: {}", detail)).into_response()
}
