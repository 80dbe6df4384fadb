use axum::Json;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use verdict_core::{BodyCause, Classification, RequestFailure, STANDARD};

/// Request failure on its way out as an HTTP response
///
/// Every extractor, fallback, and handler in the server rejects with this
/// type, so every failure is classified by the same rule table and
/// answered with a JSON envelope.
#[derive(Debug, Error)]
#[error(transparent)]
pub struct ApiError(#[from] pub RequestFailure);

impl From<BodyCause> for ApiError {
    fn from(cause: BodyCause) -> Self {
        Self(cause.into())
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(error: anyhow::Error) -> Self {
        Self(error.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let Classification { status, envelope, .. } = STANDARD.classify(&self.0);

        (status, Json(envelope)).into_response()
    }
}
