use crate::codes;
use crate::envelope::ErrorItem;
use crate::failure::BodyCause;

const NOT_JSON: &str = "The request body is not valid JSON.";
const INVALID_BODY: &str = "The request body is invalid.";

/// Pick the error item for an unreadable body from its immediate cause
///
/// Only the cause directly beneath the body failure is considered; deeper
/// sources are never consulted.
pub fn inspect_body_cause(cause: &BodyCause) -> ErrorItem {
    match cause {
        BodyCause::Syntax { .. } => ErrorItem::global(codes::INVALID_REQUEST_BODY, Some(NOT_JSON)),
        BodyCause::UnrecognizedProperty { property } => {
            ErrorItem::field(property.as_str(), codes::UNEXPECTED_PROPERTY, None)
        }
        BodyCause::InvalidFormat { path, .. } if !path.is_empty() => {
            ErrorItem::field(path.join("."), codes::INVALID_VALUE, None)
        }
        BodyCause::InvalidFormat { .. } | BodyCause::Missing | BodyCause::Other { .. } => {
            ErrorItem::global(codes::INVALID_REQUEST_BODY, Some(INVALID_BODY))
        }
    }
}
