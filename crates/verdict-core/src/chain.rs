//! Ordered classification of request failures
//!
//! A single table of rules, tried top to bottom. The first rule that
//! recognizes a failure decides its status and envelope; anything no rule
//! recognizes lands in the terminal catch-all.

use http::StatusCode;

use crate::codes;
use crate::envelope::{ErrorEnvelope, ErrorItem};
use crate::failure::{ParameterLocation, RequestFailure};
use crate::inspect::inspect_body_cause;

const CANNOT_PRODUCE: &str = "The resource cannot return the requested content type.";
const CANNOT_CONSUME: &str = "The resource does not accept the provided content type.";
const METHOD_REFUSED: &str = "This method is not allowed for the requested resource.";
const NO_SUCH_RESOURCE: &str = "The requested resource does not exist.";
const BAD_PARAMETER: &str = "The query parameter value is invalid.";

/// Outcome of classifying one failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    /// Response status
    pub status: StatusCode,
    /// Response body
    pub envelope: ErrorEnvelope,
    /// Name of the rule that fired
    pub rule: &'static str,
}

/// One entry of the classification table
#[derive(Clone, Copy)]
struct Rule {
    /// Name used in logs
    name: &'static str,
    apply: fn(&RequestFailure) -> Option<(StatusCode, ErrorEnvelope)>,
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule").field("name", &self.name).finish_non_exhaustive()
    }
}

/// Rules in priority order, most specific first
const STANDARD_RULES: &[Rule] = &[
    Rule {
        name: "not_acceptable",
        apply: not_acceptable,
    },
    Rule {
        name: "unsupported_content_type",
        apply: unsupported_content_type,
    },
    Rule {
        name: "body_unreadable",
        apply: body_unreadable,
    },
    Rule {
        name: "method_not_allowed",
        apply: method_not_allowed,
    },
    Rule {
        name: "validation_failed",
        apply: validation_failed,
    },
    Rule {
        name: "parameter_mismatch",
        apply: parameter_mismatch,
    },
    Rule {
        name: "route_not_found",
        apply: route_not_found,
    },
];

const UNCAUGHT_RULE: &str = "uncaught";

/// Immutable, ordered rule table
///
/// Holds no per-request state, so one instance can be shared by every
/// request without synchronization.
#[derive(Debug, Clone, Copy)]
pub struct ClassificationChain {
    rules: &'static [Rule],
}

/// The chain every server uses
pub static STANDARD: ClassificationChain = ClassificationChain::standard();

impl ClassificationChain {
    const fn standard() -> Self {
        Self { rules: STANDARD_RULES }
    }

    /// Map a failure to exactly one status and envelope
    ///
    /// Never fails: unrecognized failures become a bare
    /// `INTERNAL_SERVER_ERROR` whose detail only goes to the log.
    pub fn classify(&self, failure: &RequestFailure) -> Classification {
        let kind: &'static str = failure.kind().into();

        for rule in self.rules {
            if let Some((status, envelope)) = (rule.apply)(failure) {
                tracing::debug!(
                    rule = rule.name,
                    kind,
                    status = status.as_u16(),
                    error = %failure,
                    "classified request failure"
                );
                return Classification {
                    status,
                    envelope,
                    rule: rule.name,
                };
            }
        }

        tracing::error!(kind, error = ?failure, "uncaught failure while handling request");

        Classification {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            envelope: ErrorEnvelope::global(codes::INTERNAL_SERVER_ERROR, None),
            rule: UNCAUGHT_RULE,
        }
    }
}

fn not_acceptable(failure: &RequestFailure) -> Option<(StatusCode, ErrorEnvelope)> {
    matches!(failure, RequestFailure::NotAcceptable { .. }).then(|| {
        (
            StatusCode::NOT_ACCEPTABLE,
            ErrorEnvelope::global(codes::UNSUPPORTED_TYPE, Some(CANNOT_PRODUCE)),
        )
    })
}

fn unsupported_content_type(failure: &RequestFailure) -> Option<(StatusCode, ErrorEnvelope)> {
    matches!(failure, RequestFailure::UnsupportedContentType { .. }).then(|| {
        (
            StatusCode::BAD_REQUEST,
            ErrorEnvelope::global(codes::INVALID_CONTENT_TYPE, Some(CANNOT_CONSUME)),
        )
    })
}

fn body_unreadable(failure: &RequestFailure) -> Option<(StatusCode, ErrorEnvelope)> {
    let RequestFailure::BodyUnreadable { cause } = failure else {
        return None;
    };
    Some((StatusCode::BAD_REQUEST, ErrorEnvelope::single(inspect_body_cause(cause))))
}

fn method_not_allowed(failure: &RequestFailure) -> Option<(StatusCode, ErrorEnvelope)> {
    matches!(failure, RequestFailure::MethodNotAllowed { .. }).then(|| {
        (
            StatusCode::METHOD_NOT_ALLOWED,
            ErrorEnvelope::global(codes::METHOD_NOT_ALLOWED, Some(METHOD_REFUSED)),
        )
    })
}

// An empty violation set falls through to the catch-all.
fn validation_failed(failure: &RequestFailure) -> Option<(StatusCode, ErrorEnvelope)> {
    let RequestFailure::ValidationFailed { violations } = failure else {
        return None;
    };
    violations
        .to_envelope()
        .map(|envelope| (StatusCode::UNPROCESSABLE_ENTITY, envelope))
}

fn parameter_mismatch(failure: &RequestFailure) -> Option<(StatusCode, ErrorEnvelope)> {
    let RequestFailure::ParameterMismatch { location, name, .. } = failure else {
        return None;
    };
    let classified = match location {
        // A malformed path segment is indistinguishable from a missing resource
        ParameterLocation::Path => (
            StatusCode::NOT_FOUND,
            ErrorEnvelope::global(codes::INVALID_RESOURCE, Some(NO_SUCH_RESOURCE)),
        ),
        ParameterLocation::Query => {
            let item = ErrorItem {
                field: name.clone(),
                code: codes::BAD_QUERY_PARAMETER.to_owned(),
                message: Some(BAD_PARAMETER.to_owned()),
            };
            (StatusCode::BAD_REQUEST, ErrorEnvelope::single(item))
        }
    };
    Some(classified)
}

fn route_not_found(failure: &RequestFailure) -> Option<(StatusCode, ErrorEnvelope)> {
    matches!(failure, RequestFailure::RouteNotFound { .. }).then(|| {
        (
            StatusCode::NOT_FOUND,
            ErrorEnvelope::global(codes::INVALID_RESOURCE, Some(NO_SUCH_RESOURCE)),
        )
    })
}
