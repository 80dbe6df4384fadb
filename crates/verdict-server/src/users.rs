//! Sample users resource
//!
//! Exercises every binding path the error layer classifies: a typed path
//! segment, a typed query parameter, and a validated JSON body.

use axum::{Json, Router, middleware, routing};
use serde::{Deserialize, Serialize};
use validator::Validate;
use verdict_core::{ConstraintCheck, Violations};

use crate::error::ApiError;
use crate::extract::{PathParam, QueryParams, ValidatedJson};
use crate::negotiate;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i32,
    pub include_address: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserQuery {
    pub include_address: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    Open,
    Closed,
}

/// Body of `POST /api/users`
#[derive(Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct CreateUserRequest {
    #[validate(required)]
    pub id: Option<i32>,
    #[validate(required)]
    pub name: Option<String>,
    pub status: Option<Status>,
    pub start_date: Option<jiff::civil::Date>,
}

impl ConstraintCheck for CreateUserRequest {
    fn check(&self) -> Violations {
        self.validate()
            .map_or_else(|errors| Violations::from(&errors), |()| Violations::default())
    }
}

/// Routes of the users resource, JSON only
pub fn users_router() -> Router {
    Router::new()
        .route("/api/users/{id}", routing::get(get_user))
        .route("/api/users", routing::post(create_user))
        .route_layer(middleware::from_fn(negotiate::require_json))
}

/// Handle `GET /api/users/{id}`
async fn get_user(PathParam(id): PathParam<i32>, QueryParams(query): QueryParams<UserQuery>) -> Json<User> {
    Json(User {
        id,
        include_address: query.include_address.unwrap_or(false),
    })
}

/// Handle `POST /api/users`
async fn create_user(ValidatedJson(request): ValidatedJson<CreateUserRequest>) -> Result<Json<User>, ApiError> {
    let id = request
        .id
        .ok_or_else(|| anyhow::anyhow!("validated user request is missing its id"))?;

    tracing::debug!(id, name = ?request.name, status = ?request.status, "user created");

    Ok(Json(User {
        id,
        include_address: false,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(body: &str) -> CreateUserRequest {
        serde_json::from_str(body).unwrap()
    }

    #[test]
    fn complete_request_passes() {
        let violations = request(r#"{"id": 1, "name": "name", "status": "OPEN", "startDate": "2025-01-01"}"#).check();

        assert!(violations.is_empty());
    }

    #[test]
    fn missing_required_fields_are_reported_by_name() {
        let violations = request(r#"{"status": "CLOSED"}"#).check();

        let fields: Vec<_> = violations
            .fields()
            .iter()
            .map(|v| (v.field.as_deref().unwrap(), v.code.as_str()))
            .collect();
        assert_eq!(fields, [("id", "required"), ("name", "required")]);
        assert!(violations.global().is_empty());
    }

    #[test]
    fn start_date_is_a_civil_date() {
        let parsed = request(r#"{"id": 1, "name": "n", "startDate": "2025-01-01"}"#);

        assert_eq!(parsed.start_date, Some(jiff::civil::date(2025, 1, 1)));
    }
}
