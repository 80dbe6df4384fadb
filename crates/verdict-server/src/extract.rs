//! Request extractors that reject with [`ApiError`]

use axum::body::Bytes;
use axum::extract::path::ErrorKind;
use axum::extract::rejection::PathRejection;
use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use http::header::CONTENT_TYPE;
use http::request::Parts;
use serde::de::DeserializeOwned;
use verdict_core::{BodyCause, ConstraintCheck, ParameterLocation, RequestFailure, decode, media};

use crate::error::ApiError;

/// JSON body that has been deserialized and passed its declarative constraints
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

/// Typed path parameters
#[derive(Debug, Clone, Copy, Default)]
pub struct PathParam<T>(pub T);

/// Typed query string
#[derive(Debug, Clone, Copy, Default)]
pub struct QueryParams<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + ConstraintCheck,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(request: Request, state: &S) -> Result<Self, Self::Rejection> {
        if !media::is_json_content_type(request.headers()) {
            let content_type = media::header_text(request.headers(), CONTENT_TYPE);
            return Err(RequestFailure::UnsupportedContentType { content_type }.into());
        }

        let body = Bytes::from_request(request, state)
            .await
            .map_err(|rejection| BodyCause::Other {
                detail: rejection.body_text(),
            })?;

        let value: T = decode::decode_json(&body)?;

        let violations = value.check();
        if !violations.is_empty() {
            return Err(RequestFailure::ValidationFailed { violations }.into());
        }

        Ok(Self(value))
    }
}

impl<T, S> FromRequestParts<S> for PathParam<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<T>::from_request_parts(parts, state).await {
            Ok(Path(value)) => Ok(Self(value)),
            Err(rejection) => Err(path_failure(rejection)),
        }
    }
}

impl<T, S> FromRequestParts<S> for QueryParams<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let query = parts.uri.query().unwrap_or_default();

        Ok(Self(decode::decode_query(query)?))
    }
}

/// Map axum's path rejection onto the failure taxonomy
///
/// Values that fail to parse are client errors. A handler whose parameter
/// type does not fit its route is a server defect and stays uncaught.
fn path_failure(rejection: PathRejection) -> ApiError {
    let error = match rejection {
        PathRejection::FailedToDeserializePathParams(error) => error,
        other => return anyhow::anyhow!("path parameters unavailable: {}", other.body_text()).into(),
    };

    let detail = error.body_text();
    let name = match error.into_kind() {
        ErrorKind::WrongNumberOfParameters { .. } | ErrorKind::UnsupportedType { .. } => {
            return anyhow::anyhow!("path parameters do not fit the handler: {detail}").into();
        }
        ErrorKind::ParseErrorAtKey { key, .. } | ErrorKind::InvalidUtf8InPathParam { key } => Some(key),
        _ => None,
    };

    RequestFailure::ParameterMismatch {
        location: ParameterLocation::Path,
        name,
        detail,
    }
    .into()
}
