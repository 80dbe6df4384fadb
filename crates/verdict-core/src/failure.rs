use http::Method;
use strum::{Display, IntoStaticStr};
use thiserror::Error;

use crate::validation::Violations;

/// Where a mistyped request parameter came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum ParameterLocation {
    /// Segment of the request path
    Path,
    /// Key of the query string
    Query,
}

/// Immediate cause of an unreadable request body
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BodyCause {
    /// Not syntactically valid JSON, including truncated documents
    #[error("malformed JSON: {detail}")]
    Syntax { detail: String },

    /// A property the target type does not define
    #[error("unrecognized property `{property}`")]
    UnrecognizedProperty { property: String },

    /// A known property holding a value of the wrong shape
    #[error("invalid value at `{}`: {detail}", .path.join("."))]
    InvalidFormat {
        /// Property names from the document root down to the failing leaf
        path: Vec<String>,
        detail: String,
    },

    /// No body at all, or only whitespace
    #[error("request body is missing")]
    Missing,

    /// Anything else that stopped the body from being read or bound
    #[error("{detail}")]
    Other { detail: String },
}

/// A failure raised while routing, binding, or validating a request
///
/// This is the single value handed to the classification chain. Each
/// variant is one failure category; the category decides which rule fires.
#[derive(Debug, Error)]
pub enum RequestFailure {
    /// None of the media types in `Accept` can be produced
    #[error("cannot produce any acceptable media type (accept: {accept:?})")]
    NotAcceptable { accept: Option<String> },

    /// The request `Content-Type` is not supported
    #[error("unsupported content type: {content_type:?}")]
    UnsupportedContentType { content_type: Option<String> },

    /// The body could not be read or deserialized
    #[error("request body is unreadable")]
    BodyUnreadable {
        #[source]
        cause: BodyCause,
    },

    /// The matched route does not accept this method
    #[error("method {method} not allowed for {path}")]
    MethodNotAllowed { method: Method, path: String },

    /// Declarative constraints rejected the bound value
    #[error("request failed validation with {} violation(s)", .violations.len())]
    ValidationFailed { violations: Violations },

    /// A path or query parameter could not be coerced to its type
    #[error("{location} parameter {name:?} could not be converted: {detail}")]
    ParameterMismatch {
        location: ParameterLocation,
        /// Parameter name, when it can be attributed
        name: Option<String>,
        detail: String,
    },

    /// No route matches the request path
    #[error("no route matches {path}")]
    RouteNotFound { path: String },

    /// Anything else; detail is logged but never shown to clients
    #[error(transparent)]
    Uncaught(#[from] anyhow::Error),
}

/// Category of a [`RequestFailure`], used in logs
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum FailureKind {
    NotAcceptable,
    UnsupportedContentType,
    BodyUnreadable,
    MethodNotAllowed,
    ValidationFailed,
    ParameterMismatch,
    RouteNotFound,
    Uncaught,
}

impl RequestFailure {
    /// Category of this failure
    pub const fn kind(&self) -> FailureKind {
        match self {
            Self::NotAcceptable { .. } => FailureKind::NotAcceptable,
            Self::UnsupportedContentType { .. } => FailureKind::UnsupportedContentType,
            Self::BodyUnreadable { .. } => FailureKind::BodyUnreadable,
            Self::MethodNotAllowed { .. } => FailureKind::MethodNotAllowed,
            Self::ValidationFailed { .. } => FailureKind::ValidationFailed,
            Self::ParameterMismatch { .. } => FailureKind::ParameterMismatch,
            Self::RouteNotFound { .. } => FailureKind::RouteNotFound,
            Self::Uncaught(_) => FailureKind::Uncaught,
        }
    }
}

impl From<BodyCause> for RequestFailure {
    fn from(cause: BodyCause) -> Self {
        Self::BodyUnreadable { cause }
    }
}
