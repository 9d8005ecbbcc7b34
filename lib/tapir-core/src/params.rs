//! Call parameters.
//!
//! Parameters are a JSON object: keys are parameter names, values are any
//! JSON value. The same map feeds path tokens, query strings and JSON bodies.

use serde_json::Value;

use crate::{Error, Result};

/// Parameter map passed to calls.
pub type Params = serde_json::Map<String, Value>;

/// Convert any serializable value into a [`Params`] map.
///
/// # Errors
///
/// Returns an error if serialization fails or the value is not a JSON object.
///
/// # Example
///
/// ```
/// use tapir_core::to_params;
///
/// #[derive(serde::Serialize)]
/// struct Search { q: String, page: u32 }
///
/// let params = to_params(&Search { q: "rust".into(), page: 2 }).expect("object");
/// assert_eq!(params["q"], "rust");
/// assert_eq!(params["page"], 2);
/// ```
pub fn to_params<T: serde::Serialize>(value: &T) -> Result<Params> {
    match serde_json::to_value(value)? {
        Value::Object(map) => Ok(map),
        other => Err(Error::invalid_request(format!(
            "parameters must be a JSON object, got {other}"
        ))),
    }
}

/// Union of two maps where `primary` wins on key collision.
///
/// Keys only present in `fallback` are copied in; nothing in `primary` is
/// overwritten.
#[must_use]
pub fn merge(mut primary: Params, fallback: &Params) -> Params {
    for (key, value) in fallback {
        if !primary.contains_key(key) {
            primary.insert(key.clone(), value.clone());
        }
    }
    primary
}

/// Text form of a parameter value, as used in query strings.
///
/// `null` has no text form. Booleans render as `1`/`0`, containers as
/// compact JSON.
#[must_use]
pub fn value_to_string(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(if *b { "1" } else { "0" }.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Array(_) | Value::Object(_) => Some(value.to_string()),
    }
}
