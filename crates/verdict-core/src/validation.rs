//! Declarative validation boundary
//!
//! The validation engine is opaque: it hands over violation records split
//! into global (object-level) and field-level groups, and the aggregator
//! flattens them into envelope items without caring how they were derived.

use crate::envelope::{ErrorEnvelope, ErrorItem};

/// A single constraint violation reported by a validation engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Violated field, `None` for object-level violations
    pub field: Option<String>,
    /// Engine rule identifier (e.g. `required`)
    pub code: String,
    /// Engine-supplied explanation
    pub message: Option<String>,
}

/// Violations reported for one bound value
///
/// Both groups keep the order in which they were pushed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Violations {
    global: Vec<Violation>,
    fields: Vec<Violation>,
}

/// Source of declarative constraint violations for a bound request value
pub trait ConstraintCheck {
    /// Check all constraints, returning every violation found
    fn check(&self) -> Violations;
}

impl Violations {
    /// Record an object-level violation
    pub fn push_global(&mut self, code: impl Into<String>, message: Option<String>) {
        self.global.push(Violation {
            field: None,
            code: code.into(),
            message,
        });
    }

    /// Record a violation of one field
    pub fn push_field(&mut self, field: impl Into<String>, code: impl Into<String>, message: Option<String>) {
        self.fields.push(Violation {
            field: Some(field.into()),
            code: code.into(),
            message,
        });
    }

    /// Object-level violations in reported order
    pub fn global(&self) -> &[Violation] {
        &self.global
    }

    /// Field violations in reported order
    pub fn fields(&self) -> &[Violation] {
        &self.fields
    }

    /// Total number of violations
    pub const fn len(&self) -> usize {
        self.global.len() + self.fields.len()
    }

    pub const fn is_empty(&self) -> bool {
        self.global.is_empty() && self.fields.is_empty()
    }

    /// Flatten into an envelope, global violations first
    ///
    /// Returns `None` when there is nothing to report.
    pub fn to_envelope(&self) -> Option<ErrorEnvelope> {
        let items = self
            .global
            .iter()
            .chain(&self.fields)
            .map(|violation| ErrorItem {
                field: violation.field.clone(),
                code: violation.code.clone(),
                message: violation.message.clone(),
            })
            .collect();

        ErrorEnvelope::from_items(items)
    }
}

#[cfg(feature = "validator")]
mod engine {
    use std::collections::BTreeMap;

    use validator::{ValidationError, ValidationErrors, ValidationErrorsKind};

    use super::Violations;

    /// Key under which `validator` files struct-level (schema) errors
    const SCHEMA_KEY: &str = "__all__";

    impl From<&ValidationErrors> for Violations {
        /// Adapt `validator` output
        ///
        /// `validator` keeps errors in a hash map, so fields are ordered by
        /// name to keep responses stable. Nested structs and lists are
        /// flattened into dotted field paths.
        fn from(errors: &ValidationErrors) -> Self {
            let mut violations = Self::default();
            collect(&mut violations, None, errors);
            violations
        }
    }

    fn collect(violations: &mut Violations, prefix: Option<&str>, errors: &ValidationErrors) {
        let sorted: BTreeMap<String, &ValidationErrorsKind> =
            errors.errors().iter().map(|(key, kind)| (key.to_string(), kind)).collect();

        for (key, kind) in sorted {
            let path = match prefix {
                Some(prefix) if key == SCHEMA_KEY => prefix.to_owned(),
                Some(prefix) => format!("{prefix}.{key}"),
                None => key.clone(),
            };

            match kind {
                ValidationErrorsKind::Field(list) if key == SCHEMA_KEY && prefix.is_none() => {
                    for error in list {
                        violations.push_global(error.code.to_string(), message_of(error));
                    }
                }
                ValidationErrorsKind::Field(list) => {
                    for error in list {
                        violations.push_field(path.clone(), error.code.to_string(), message_of(error));
                    }
                }
                ValidationErrorsKind::Struct(nested) => collect(violations, Some(&path), nested),
                ValidationErrorsKind::List(items) => {
                    for (index, nested) in items {
                        collect(violations, Some(&format!("{path}.{index}")), nested);
                    }
                }
            }
        }
    }

    fn message_of(error: &ValidationError) -> Option<String> {
        error.message.as_ref().map(ToString::to_string)
    }
}
