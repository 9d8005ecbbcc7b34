//! Query string and body encoding.

use bytes::Bytes;
use serde_json::Value;

use crate::{Params, Result, params::value_to_string};

/// MIME type of JSON bodies.
pub const APPLICATION_JSON: &str = "application/json";

/// Serialize a value to JSON bytes.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn to_json<T: serde::Serialize>(value: &T) -> Result<Bytes> {
    serde_json::to_vec(value)
        .map(Bytes::from)
        .map_err(Into::into)
}

/// Decode a JSON body.
///
/// Returns `None` for an empty (or all-whitespace) body and for anything
/// that is not valid JSON.
#[must_use]
pub fn decode_json(body: &[u8]) -> Option<Value> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return None;
    }
    serde_json::from_slice(body).ok()
}

/// Flatten parameters into query pairs.
///
/// Nested arrays and objects use bracket keys (`tags[0]=a`, `filter[state]=open`),
/// `null` values are left out, booleans are `1`/`0`.
///
/// # Example
///
/// ```
/// use tapir_core::{query_pairs, to_params};
///
/// let params = to_params(&serde_json::json!({
///     "filter": {"state": "open"},
///     "skip": null,
///     "tags": ["a", "b"],
/// })).expect("object");
///
/// assert_eq!(query_pairs(&params), vec![
///     ("filter[state]".to_string(), "open".to_string()),
///     ("tags[0]".to_string(), "a".to_string()),
///     ("tags[1]".to_string(), "b".to_string()),
/// ]);
/// ```
#[must_use]
pub fn query_pairs(params: &Params) -> Vec<(String, String)> {
    let mut pairs = Vec::with_capacity(params.len());
    for (key, value) in params {
        flatten_into(key.clone(), value, &mut pairs);
    }
    pairs
}

fn flatten_into(key: String, value: &Value, pairs: &mut Vec<(String, String)>) {
    match value {
        Value::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                flatten_into(format!("{key}[{index}]"), item, pairs);
            }
        }
        Value::Object(fields) => {
            for (name, field) in fields {
                flatten_into(format!("{key}[{name}]"), field, pairs);
            }
        }
        scalar => {
            if let Some(text) = value_to_string(scalar) {
                pairs.push((key, text));
            }
        }
    }
}

/// Encode parameters as an `application/x-www-form-urlencoded` query string.
///
/// # Example
///
/// ```
/// use tapir_core::{build_query, to_params};
///
/// let params = to_params(&serde_json::json!({"page": 2, "q": "rust lang"})).expect("object");
/// assert_eq!(build_query(&params), "page=2&q=rust+lang");
/// ```
#[must_use]
pub fn build_query(params: &Params) -> String {
    url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(query_pairs(params))
        .finish()
}

/// Append an encoded query string to a URL, choosing `?` or `&`.
///
/// An empty query leaves the URL unchanged.
#[must_use]
pub fn append_query(url: &str, query: &str) -> String {
    if query.is_empty() {
        return url.to_string();
    }
    let separator = match url.find('?') {
        None => "?",
        Some(pos) if pos + 1 == url.len() || url.ends_with('&') => "",
        Some(_) => "&",
    };
    format!("{url}{separator}{query}")
}

#[cfg(test)]
mod tests {
    use assert2::check;
    use serde_json::json;

    use super::*;
    use crate::to_params;

    fn params(value: Value) -> Params {
        to_params(&value).expect("object")
    }

    #[test]
    fn to_json_serialize() {
        let bytes = to_json(&params(json!({"body": "y", "title": "x"}))).expect("serialize");
        check!(bytes.as_ref() == br#"{"body":"y","title":"x"}"#);
    }

    #[test]
    fn decode_json_values() {
        check!(decode_json(br#"{"id": 1}"#) == Some(json!({"id": 1})));
        check!(decode_json(b"[1,2]") == Some(json!([1, 2])));
    }

    #[test]
    fn decode_json_failures() {
        check!(decode_json(b"") == None);
        check!(decode_json(b"  \r\n") == None);
        check!(decode_json(b"<html>oops</html>") == None);
        check!(decode_json(b"{\"truncated\":") == None);
    }

    #[test]
    fn build_query_scalars() {
        let query = build_query(&params(json!({
            "a": "x y",
            "b": true,
            "c": false,
            "d": 1.5,
            "e": null,
            "f": "&=?"
        })));
        check!(query == "a=x+y&b=1&c=0&d=1.5&f=%26%3D%3F");
    }

    #[test]
    fn build_query_nested() {
        let query = build_query(&params(json!({"ids": [1, 2], "sort": {"by": "name"}})));
        check!(query == "ids%5B0%5D=1&ids%5B1%5D=2&sort%5Bby%5D=name");
    }

    #[test]
    fn build_query_empty() {
        check!(build_query(&Params::new()) == "");
    }

    #[test]
    fn append_query_separators() {
        check!(append_query("https://x.test/a", "p=1") == "https://x.test/a?p=1");
        check!(append_query("https://x.test/a?", "p=1") == "https://x.test/a?p=1");
        check!(append_query("https://x.test/a?q=2", "p=1") == "https://x.test/a?q=2&p=1");
        check!(append_query("https://x.test/a?q=2&", "p=1") == "https://x.test/a?q=2&p=1");
        check!(append_query("https://x.test/a", "") == "https://x.test/a");
    }
}
