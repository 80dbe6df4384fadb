//! Stable error codes
//!
//! Clients match on these values, so their meaning never changes once
//! published. Validation items carry the validation engine's own rule
//! identifiers instead.

/// The `Accept` header cannot be satisfied
pub const UNSUPPORTED_TYPE: &str = "UNSUPPORTED_TYPE";

/// The request `Content-Type` is not accepted
pub const INVALID_CONTENT_TYPE: &str = "INVALID_CONTENT_TYPE";

/// The body is missing, malformed, or otherwise unreadable
pub const INVALID_REQUEST_BODY: &str = "INVALID_REQUEST_BODY";

/// The body names a property the target schema does not define
pub const UNEXPECTED_PROPERTY: &str = "UNEXPECTED_PROPERTY";

/// A known body property holds a value of the wrong shape
pub const INVALID_VALUE: &str = "INVALID_VALUE";

/// The route exists but not for this HTTP method
pub const METHOD_NOT_ALLOWED: &str = "METHOD_NOT_ALLOWED";

/// The addressed resource does not exist
pub const INVALID_RESOURCE: &str = "INVALID_RESOURCE";

/// A query parameter could not be converted to its expected type
pub const BAD_QUERY_PARAMETER: &str = "BAD_QUERY_PARAMETER";

/// Anything the classification rules do not recognize
pub const INTERNAL_SERVER_ERROR: &str = "INTERNAL_SERVER_ERROR";
