use axum::response::IntoResponse;
use http::StatusCode;

/// Liveness probe; not subject to content negotiation
pub async fn health_handler() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}
