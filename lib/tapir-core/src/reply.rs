//! Dispatch results.

use serde_json::Value;

/// How a response body should be interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Decode {
    /// Parse the body as JSON.
    #[default]
    Json,
    /// Keep the body as text.
    Text,
}

/// What a dispatched call produced.
///
/// HTTP error statuses are not errors in tapir: whatever body the server
/// sent is decoded and returned. A body that was expected to be JSON but
/// could not be parsed (or was empty) is [`Reply::Invalid`].
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    /// Decoded JSON body.
    Json(Value),
    /// Raw body text.
    Text(String),
    /// JSON was requested but the body was empty or unparsable.
    Invalid,
}

impl Reply {
    /// Decode a body according to `decode`.
    #[must_use]
    pub fn from_body(body: &[u8], decode: Decode) -> Self {
        match decode {
            Decode::Json => crate::decode_json(body).map_or(Self::Invalid, Self::Json),
            Decode::Text => Self::Text(String::from_utf8_lossy(body).into_owned()),
        }
    }

    /// Returns `false` only for [`Reply::Invalid`].
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        !matches!(self, Self::Invalid)
    }

    /// Whether the reply carries nothing: `null`, an empty string, array or
    /// object, empty text, or [`Reply::Invalid`].
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Json(Value::Null) | Self::Invalid => true,
            Self::Json(Value::String(text)) | Self::Text(text) => text.is_empty(),
            Self::Json(Value::Array(items)) => items.is_empty(),
            Self::Json(Value::Object(fields)) => fields.is_empty(),
            Self::Json(_) => false,
        }
    }

    /// The JSON value, if this is a JSON reply.
    #[must_use]
    pub const fn as_json(&self) -> Option<&Value> {
        match self {
            Self::Json(value) => Some(value),
            _ => None,
        }
    }

    /// The text, if this is a text reply.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Look up a top-level field of a JSON object reply.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.as_json().and_then(|value| value.get(name))
    }

    /// Deserialize a JSON reply into a typed value.
    ///
    /// # Errors
    ///
    /// Returns an error if the reply is not JSON or does not match `T`.
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> crate::Result<T> {
        match self {
            Self::Json(value) => serde_json::from_value(value.clone()).map_err(Into::into),
            Self::Text(_) => Err(crate::Error::invalid_request("reply is text, not JSON")),
            Self::Invalid => Err(crate::Error::invalid_request("reply body is not valid JSON")),
        }
    }

    /// Convert into a JSON value: text becomes a string, invalid becomes `null`.
    #[must_use]
    pub fn into_value(self) -> Value {
        match self {
            Self::Json(value) => value,
            Self::Text(text) => Value::String(text),
            Self::Invalid => Value::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use assert2::{check, let_assert};
    use serde_json::json;

    use super::*;

    #[test]
    fn reply_from_json_body() {
        let reply = Reply::from_body(br#"{"id": 1, "results": [1]}"#, Decode::Json);
        check!(reply.is_valid());
        check!(reply.field("id") == Some(&json!(1)));
        check!(reply.field("missing") == None);
    }

    #[test]
    fn reply_from_bad_json_body() {
        check!(Reply::from_body(b"", Decode::Json) == Reply::Invalid);
        check!(Reply::from_body(b"Service Unavailable", Decode::Json) == Reply::Invalid);
        check!(!Reply::Invalid.is_valid());
    }

    #[test]
    fn reply_from_text_body() {
        let reply = Reply::from_body(b"plain", Decode::Text);
        check!(reply.as_text() == Some("plain"));
        check!(reply.as_json() == None);
        check!(Reply::from_body(b"", Decode::Text) == Reply::Text(String::new()));
    }

    #[test]
    fn reply_emptiness() {
        for empty in [
            Reply::Json(json!(null)),
            Reply::Json(json!("")),
            Reply::Json(json!([])),
            Reply::Json(json!({})),
            Reply::Text(String::new()),
            Reply::Invalid,
        ] {
            check!(empty.is_empty(), "{empty:?}");
        }

        for filled in [
            Reply::Json(json!(0)),
            Reply::Json(json!(false)),
            Reply::Json(json!([null])),
            Reply::Json(json!({"id": 1})),
            Reply::Text(" ".to_string()),
        ] {
            check!(!filled.is_empty(), "{filled:?}");
        }
    }

    #[test]
    fn reply_typed() {
        #[derive(Debug, PartialEq, serde::Deserialize)]
        struct User {
            id: u64,
        }

        let reply = Reply::Json(json!({"id": 7}));
        check!(reply.json::<User>().expect("typed") == User { id: 7 });

        let_assert!(Err(_) = Reply::Invalid.json::<User>());
    }

    #[test]
    fn reply_into_value() {
        check!(Reply::Json(json!([1])).into_value() == json!([1]));
        check!(Reply::Text("t".into()).into_value() == json!("t"));
        check!(Reply::Invalid.into_value() == Value::Null);
    }
}
