use axum::extract::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use http::header::ACCEPT;
use verdict_core::{RequestFailure, media};

use crate::error::ApiError;

/// Content negotiation for JSON-only routes
///
/// Refuses the request before any extractor runs when the client's
/// `Accept` header rules out `application/json`. The refusal itself is
/// still JSON.
pub async fn require_json(request: Request, next: Next) -> Response {
    if media::accepts_json(request.headers()) {
        return next.run(request).await;
    }

    let accept = media::header_text(request.headers(), ACCEPT);
    ApiError::from(RequestFailure::NotAcceptable { accept }).into_response()
}
