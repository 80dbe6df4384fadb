use serde::{Deserialize, Serialize};

/// Error response body returned for every classified failure
///
/// Serializes as `{"errors": [...]}`. Items keep the order in which the
/// failures were discovered. Every constructor yields at least one item and
/// there is no way to mutate an envelope once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    errors: Vec<ErrorItem>,
}

/// A single error inside an [`ErrorEnvelope`]
///
/// `field` and `message` are omitted from the JSON when absent. Readers
/// should treat a missing key and an explicit `null` the same way.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorItem {
    /// Offending request field or query parameter, absent for global errors
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    /// Stable machine-readable code
    pub code: String,
    /// Human-readable explanation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ErrorItem {
    /// Item not attributable to any one field
    pub fn global(code: impl Into<String>, message: Option<&str>) -> Self {
        Self {
            field: None,
            code: code.into(),
            message: message.map(str::to_owned),
        }
    }

    /// Item naming the field that caused it
    pub fn field(field: impl Into<String>, code: impl Into<String>, message: Option<&str>) -> Self {
        Self {
            field: Some(field.into()),
            code: code.into(),
            message: message.map(str::to_owned),
        }
    }
}

impl ErrorEnvelope {
    /// Envelope holding exactly one item
    pub fn single(item: ErrorItem) -> Self {
        Self { errors: vec![item] }
    }

    /// Envelope holding one global error
    pub fn global(code: impl Into<String>, message: Option<&str>) -> Self {
        Self::single(ErrorItem::global(code, message))
    }

    /// Envelope holding one field error
    pub fn field(field: impl Into<String>, code: impl Into<String>, message: Option<&str>) -> Self {
        Self::single(ErrorItem::field(field, code, message))
    }

    /// Build an envelope from already ordered items
    ///
    /// Returns `None` for an empty list so an envelope can never reach a
    /// client without at least one item.
    pub fn from_items(items: Vec<ErrorItem>) -> Option<Self> {
        (!items.is_empty()).then_some(Self { errors: items })
    }

    /// Items in discovery order
    pub fn errors(&self) -> &[ErrorItem] {
        &self.errors
    }

    /// Number of items
    pub const fn len(&self) -> usize {
        self.errors.len()
    }

    /// Always false for envelopes built through the public constructors
    pub const fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Consume the envelope, yielding its items
    pub fn into_items(self) -> Vec<ErrorItem> {
        self.errors
    }
}
