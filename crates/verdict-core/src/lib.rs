//! Request-failure classification for JSON web APIs
//!
//! Every failure raised while routing, binding, or validating a request is
//! turned into one `(status, envelope)` pair by an ordered rule table. The
//! envelope is always `{"errors": [...]}` with at least one item.

#![allow(clippy::must_use_candidate)]

mod chain;
pub mod codes;
pub mod decode;
mod envelope;
mod failure;
mod inspect;
pub mod media;
mod validation;

pub use chain::{Classification, ClassificationChain, STANDARD};
pub use envelope::{ErrorEnvelope, ErrorItem};
pub use failure::{BodyCause, FailureKind, ParameterLocation, RequestFailure};
pub use inspect::inspect_body_cause;
pub use validation::{ConstraintCheck, Violation, Violations};
