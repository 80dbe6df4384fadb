use std::any::Any;

use axum::response::{IntoResponse, Response};
use http::{Method, Uri};
use verdict_core::RequestFailure;

use crate::error::ApiError;

/// Fallback for requests no route matches
pub async fn route_not_found(uri: Uri) -> ApiError {
    RequestFailure::RouteNotFound {
        path: uri.path().to_owned(),
    }
    .into()
}

/// Fallback for a matched path without a handler for the method
pub async fn method_not_allowed(method: Method, uri: Uri) -> ApiError {
    RequestFailure::MethodNotAllowed {
        method,
        path: uri.path().to_owned(),
    }
    .into()
}

/// Turn a handler panic into an uncaught failure
#[allow(clippy::needless_pass_by_value)]
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("non-string panic payload");

    ApiError::from(anyhow::anyhow!("handler panicked: {detail}")).into_response()
}
