//! Binding of request bodies and query strings
//!
//! Deserialization goes through `serde_path_to_error` so failures can name
//! the property or parameter at fault.

use serde::de::DeserializeOwned;
use serde_json::error::Category;
use serde_path_to_error::{Path, Segment};

use crate::failure::{BodyCause, ParameterLocation, RequestFailure};

/// Deserialize a JSON request body
///
/// # Errors
///
/// Returns the [`BodyCause`] describing why the body could not be bound
pub fn decode_json<T: DeserializeOwned>(body: &[u8]) -> Result<T, BodyCause> {
    if body.trim_ascii().is_empty() {
        return Err(BodyCause::Missing);
    }

    let mut deserializer = serde_json::Deserializer::from_slice(body);
    let value = serde_path_to_error::deserialize(&mut deserializer).map_err(json_cause)?;
    deserializer.end().map_err(|e| BodyCause::Syntax { detail: e.to_string() })?;

    Ok(value)
}

/// Deserialize a urlencoded query string
///
/// # Errors
///
/// Returns [`RequestFailure::ParameterMismatch`] naming the offending key
/// whenever one can be attributed
pub fn decode_query<T: DeserializeOwned>(query: &str) -> Result<T, RequestFailure> {
    let deserializer = serde_urlencoded::Deserializer::new(url::form_urlencoded::parse(query.as_bytes()));

    serde_path_to_error::deserialize(deserializer).map_err(|error| {
        let detail = error.inner().to_string();
        let name = dotted(error.path()).or_else(|| {
            ["missing field `", "unknown field `", "duplicate field `"]
                .into_iter()
                .find_map(|prefix| quoted_name(&detail, prefix))
        });

        RequestFailure::ParameterMismatch {
            location: ParameterLocation::Query,
            name,
            detail,
        }
    })
}

fn json_cause(error: serde_path_to_error::Error<serde_json::Error>) -> BodyCause {
    let path = segments(error.path());
    let inner = error.into_inner();
    let detail = inner.to_string();

    match inner.classify() {
        Category::Syntax | Category::Eof => BodyCause::Syntax { detail },
        Category::Data => {
            if let Some(property) = quoted_name(&detail, "unknown field `") {
                BodyCause::UnrecognizedProperty { property }
            } else if path.is_empty() {
                BodyCause::Other { detail }
            } else {
                BodyCause::InvalidFormat { path, detail }
            }
        }
        Category::Io => BodyCause::Other { detail },
    }
}

/// Property names from the root to the failing leaf
fn segments(path: &Path) -> Vec<String> {
    path.iter()
        .filter_map(|segment| match segment {
            Segment::Seq { index } => Some(index.to_string()),
            Segment::Map { key } => Some(key.clone()),
            Segment::Enum { variant } => Some(variant.clone()),
            _ => None,
        })
        .collect()
}

fn dotted(path: &Path) -> Option<String> {
    let segments = segments(path);
    (!segments.is_empty()).then(|| segments.join("."))
}

/// Extract `name` from serde messages shaped like ``prefix`name`...``
fn quoted_name(message: &str, prefix: &str) -> Option<String> {
    let rest = message.strip_prefix(prefix)?;
    let end = rest.find('`')?;
    Some(rest[..end].to_owned())
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;
    use crate::chain::STANDARD;

    #[derive(Debug, Deserialize)]
    #[serde(deny_unknown_fields, rename_all = "camelCase")]
    struct Order {
        id: Option<i32>,
        #[allow(dead_code)]
        kind: Option<Kind>,
        #[allow(dead_code)]
        lines: Option<Vec<Line>>,
    }

    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "SCREAMING_SNAKE_CASE")]
    enum Kind {
        Standard,
    }

    #[derive(Debug, Deserialize)]
    #[serde(deny_unknown_fields, rename_all = "camelCase")]
    struct Line {
        #[allow(dead_code)]
        unit_price: u32,
    }

    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct Filter {
        include_address: Option<bool>,
        page: u32,
    }

    fn body_error(body: &str) -> BodyCause {
        decode_json::<Order>(body.as_bytes()).unwrap_err()
    }

    #[test]
    fn decodes_valid_body() {
        let order: Order = decode_json(br#"{"id": 7, "kind": "STANDARD"}"#).unwrap();

        assert_eq!(order.id, Some(7));
    }

    #[test]
    fn empty_and_blank_bodies_are_missing() {
        assert_eq!(body_error(""), BodyCause::Missing);
        assert_eq!(body_error(" \n\t"), BodyCause::Missing);
    }

    #[test]
    fn malformed_json_is_syntax() {
        assert!(matches!(body_error("}{"), BodyCause::Syntax { .. }));
    }

    #[test]
    fn truncated_json_is_syntax() {
        assert!(matches!(body_error(r#"{"id": "#), BodyCause::Syntax { .. }));
    }

    #[test]
    fn trailing_garbage_is_syntax() {
        assert!(matches!(body_error(r#"{"id": 1} x"#), BodyCause::Syntax { .. }));
    }

    #[test]
    fn unknown_property_is_named() {
        assert_eq!(
            body_error(r#"{"id": 1, "extra": "blah"}"#),
            BodyCause::UnrecognizedProperty {
                property: "extra".to_owned()
            }
        );
    }

    #[test]
    fn wrong_type_reports_the_path() {
        let BodyCause::InvalidFormat { path, .. } = body_error(r#"{"id": "abc"}"#) else {
            panic!("expected an invalid format cause");
        };
        assert_eq!(path, ["id"]);
    }

    #[test]
    fn out_of_range_number_reports_the_path() {
        let BodyCause::InvalidFormat { path, .. } = body_error(r#"{"id": 92233720368547758070}"#) else {
            panic!("expected an invalid format cause");
        };
        assert_eq!(path, ["id"]);
    }

    #[test]
    fn unknown_enum_variant_is_invalid_format() {
        let BodyCause::InvalidFormat { path, .. } = body_error(r#"{"kind": "XXXX"}"#) else {
            panic!("expected an invalid format cause");
        };
        assert_eq!(path, ["kind"]);
    }

    #[test]
    fn nested_path_includes_indices() {
        let BodyCause::InvalidFormat { path, .. } = body_error(r#"{"lines": [{"unitPrice": 1}, {"unitPrice": -1}]}"#)
        else {
            panic!("expected an invalid format cause");
        };
        assert_eq!(path, ["lines", "1", "unitPrice"]);
    }

    #[test]
    fn top_level_shape_mismatch_is_other() {
        assert!(matches!(body_error("42"), BodyCause::Other { .. }));
    }

    #[test]
    fn query_decodes() {
        let filter: Filter = decode_query("includeAddress=true&page=2").unwrap();

        assert_eq!(filter.include_address, Some(true));
        assert_eq!(filter.page, 2);
    }

    #[test]
    fn query_type_mismatch_names_the_key() {
        let failure = decode_query::<Filter>("includeAddress=not-a-boolean&page=1").unwrap_err();

        let RequestFailure::ParameterMismatch { location, name, .. } = failure else {
            panic!("expected a parameter mismatch");
        };
        assert_eq!(location, ParameterLocation::Query);
        assert_eq!(name.as_deref(), Some("includeAddress"));
    }

    #[test]
    fn missing_query_key_is_named_from_the_message() {
        let failure = decode_query::<Filter>("includeAddress=true").unwrap_err();

        let RequestFailure::ParameterMismatch { name, .. } = failure else {
            panic!("expected a parameter mismatch");
        };
        assert_eq!(name.as_deref(), Some("page"));
    }

    #[test]
    fn repeated_query_key_is_named_from_the_message() {
        let failure = decode_query::<Filter>("includeAddress=true&includeAddress=false&page=1").unwrap_err();

        let RequestFailure::ParameterMismatch { name, .. } = failure else {
            panic!("expected a parameter mismatch");
        };
        assert_eq!(name.as_deref(), Some("includeAddress"));
    }

    #[test]
    fn query_item_field_depends_on_attribution() {
        let named = decode_query::<Filter>("includeAddress=yes&page=1").unwrap_err();
        let binding = STANDARD.classify(&named);
        let item = &binding.envelope.errors()[0];
        assert_eq!(item.field.as_deref(), Some("includeAddress"));
        assert_eq!(item.code, "BAD_QUERY_PARAMETER");

        // A scalar target has no key to blame
        let anonymous = decode_query::<u32>("page=1").unwrap_err();
        assert!(matches!(anonymous, RequestFailure::ParameterMismatch { name: None, .. }));

        let classified = STANDARD.classify(&anonymous);
        assert_eq!(classified.status, http::StatusCode::BAD_REQUEST);
        assert_eq!(
            serde_json::to_value(&classified.envelope).unwrap(),
            serde_json::json!({
                "errors": [{"code": "BAD_QUERY_PARAMETER", "message": "The query parameter value is invalid."}]
            })
        );
    }

    #[test]
    fn quoted_name_requires_the_prefix() {
        assert_eq!(quoted_name("unknown field `x`, expected", "unknown field `"), Some("x".to_owned()));
        assert_eq!(quoted_name("unknown variant `x`", "unknown field `"), None);
    }
}
