//! Recovers a JSON object from free-form model output.
//!
//! The grounding tool and the model itself decorate answers with markdown
//! fences, inline citation markers (`[1]`), trailing commas and explanatory
//! prose. [`extract`] strips the fences, takes the span from the first `{` to
//! the last `}`, and parses it. Only when that strict parse fails does it
//! sanitize (drop citation markers and trailing commas) and try once more.
//!
//! # Known limitation
//!
//! The span is a longest match. If the model ever emits two sibling top-level
//! objects, the span covers both plus whatever sits between them, and the
//! result is either a parse failure or the wrong object. This is not guarded.

use crate::error::ExtractError;

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};

/// A successfully recovered top-level JSON object, still untyped.
pub type ParsedObject = Map<String, Value>;

/// Opening fence with optional language tag, or a bare closing fence.
static FENCE_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"```[A-Za-z0-9_+-]*").expect("fence pattern is valid"));

/// Bracketed integer citations injected by grounding, e.g. `[1]`, `[12]`.
static CITATION_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[\d+\]").expect("citation pattern is valid"));

/// A comma followed only by whitespace and then a closing brace or bracket.
static TRAILING_COMMA: Lazy<Regex> =
    Lazy::new(|| Regex::new(r",\s*([}\]])").expect("trailing comma pattern is valid"));

/// Recover the single dominant JSON object in `raw_text`.
///
/// # Errors
///
/// - [`ExtractError::Empty`] for an empty string
/// - [`ExtractError::NoObject`] when there is no `{ ... }` span
/// - [`ExtractError::Unparseable`] when both the strict and sanitized parses fail
pub fn extract(raw_text: &str) -> Result<ParsedObject, ExtractError> {
    if raw_text.is_empty() {
        return Err(ExtractError::empty());
    }

    let unfenced = strip_fences(raw_text);
    let candidate = object_span(&unfenced)?;

    let strict_error = match parse_object(candidate) {
        Ok(object) => return Ok(object),
        Err(e) => e,
    };

    let sanitized = sanitize(candidate);
    parse_object(&sanitized).map_err(|sanitized_error| {
        log::debug!(
            "Extraction failed on both passes ({} chars): strict: {}; sanitized: {}",
            candidate.len(),
            strict_error,
            sanitized_error
        );
        ExtractError::unparseable(strict_error, sanitized_error)
    })
}

fn strip_fences(text: &str) -> String {
    FENCE_MARKER.replace_all(text, "").into_owned()
}

fn object_span(text: &str) -> Result<&str, ExtractError> {
    let start = text.find('{');
    let end = text.rfind('}');

    match (start, end) {
        // `{` and `}` are single-byte, so both indices are char boundaries.
        (Some(start), Some(end)) if start < end => Ok(&text[start..=end]),
        (Some(_), Some(_)) => Err(ExtractError::no_object("closing brace precedes opening brace")),
        (None, _) => Err(ExtractError::no_object("no opening brace in response")),
        (_, None) => Err(ExtractError::no_object("no closing brace in response")),
    }
}

/// Second-pass repair. Only ever applied to a candidate that failed to parse.
fn sanitize(candidate: &str) -> String {
    let without_citations = CITATION_MARKER.replace_all(candidate, "");
    TRAILING_COMMA
        .replace_all(&without_citations, "$1")
        .into_owned()
}

fn parse_object(candidate: &str) -> Result<ParsedObject, String> {
    match serde_json::from_str::<Value>(candidate) {
        Ok(Value::Object(object)) => Ok(object),
        Ok(other) => Err(format!("expected an object, found {}", json_type_name(&other))),
        Err(e) => Err(e.to_string()),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
