//! Media type checks for a JSON-only API

use http::HeaderMap;
use http::header::{ACCEPT, CONTENT_TYPE};

/// Whether the `Accept` header admits an `application/json` response
///
/// A missing header accepts anything. Ranges with `q=0` are refusals.
/// Unreadable header values count as not accepting JSON.
pub fn accepts_json(headers: &HeaderMap) -> bool {
    let mut values = headers.get_all(ACCEPT).iter().peekable();
    if values.peek().is_none() {
        return true;
    }

    values
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(','))
        .filter_map(MediaRange::parse)
        .any(|range| range.quality > 0.0 && range.matches_json())
}

/// Whether the `Content-Type` header declares a JSON body
///
/// Accepts `application/json` and structured `application/*+json` types,
/// with any parameters. A missing header is not JSON.
pub fn is_json_content_type(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(MediaRange::parse)
        .is_some_and(|range| range.kind == "application" && is_json_subtype(&range.subtype))
}

/// Raw header value, for logging
pub fn header_text(headers: &HeaderMap, name: http::header::HeaderName) -> Option<String> {
    headers
        .get(name)
        .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned())
}

struct MediaRange {
    kind: String,
    subtype: String,
    quality: f32,
}

impl MediaRange {
    fn parse(raw: &str) -> Option<Self> {
        let mut parts = raw.split(';');
        let essence = parts.next()?.trim();
        let (kind, subtype) = essence.split_once('/')?;
        if kind.is_empty() || subtype.is_empty() {
            return None;
        }

        let quality = parts
            .filter_map(|param| param.split_once('='))
            .find(|(name, _)| name.trim().eq_ignore_ascii_case("q"))
            .map_or(Some(1.0), |(_, value)| value.trim().parse::<f32>().ok())?;

        Some(Self {
            kind: kind.trim().to_ascii_lowercase(),
            subtype: subtype.trim().to_ascii_lowercase(),
            quality,
        })
    }

    fn matches_json(&self) -> bool {
        match (self.kind.as_str(), self.subtype.as_str()) {
            ("*", "*") | ("application", "*") => true,
            ("application", subtype) => is_json_subtype(subtype),
            _ => false,
        }
    }
}

fn is_json_subtype(subtype: &str) -> bool {
    subtype == "json" || subtype.ends_with("+json")
}
