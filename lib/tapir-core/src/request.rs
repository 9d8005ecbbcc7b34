//! Outgoing HTTP requests.
//!
//! # Example
//!
//! ```
//! use tapir_core::{Method, Request};
//!
//! let request = Request::builder(Method::Get, "https://api.example.com/users?page=1".parse().unwrap())
//!     .header("Accept", "application/json")
//!     .build();
//! assert_eq!(request.url().query(), Some("page=1"));
//! ```

use std::collections::HashMap;

use bytes::Bytes;

use crate::{Method, body::APPLICATION_JSON};

/// A request ready for a transport: everything resolved, signed and encoded.
#[derive(Debug, Clone)]
pub struct Request {
    method: Method,
    url: url::Url,
    headers: HashMap<String, String>,
    body: Option<Bytes>,
}

impl Request {
    /// Start a request without headers or body.
    #[must_use]
    pub fn builder(method: Method, url: url::Url) -> RequestBuilder {
        RequestBuilder(Self {
            method,
            url,
            headers: HashMap::new(),
            body: None,
        })
    }

    /// HTTP method.
    #[must_use]
    pub const fn method(&self) -> Method {
        self.method
    }

    /// Final URL, query string included.
    #[must_use]
    pub const fn url(&self) -> &url::Url {
        &self.url
    }

    /// Headers as set, names in their original case.
    #[must_use]
    pub const fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Headers, for decoration after assembly.
    pub fn headers_mut(&mut self) -> &mut HashMap<String, String> {
        &mut self.headers
    }

    /// Header value, name matched case-insensitively.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Encoded body, if any.
    #[must_use]
    pub const fn body(&self) -> Option<&Bytes> {
        self.body.as_ref()
    }

    /// Split into method, URL, headers and body.
    #[must_use]
    pub fn into_parts(self) -> (Method, url::Url, HashMap<String, String>, Option<Bytes>) {
        let Self {
            method,
            url,
            headers,
            body,
        } = self;
        (method, url, headers, body)
    }
}

/// Incrementally assembles a [`Request`].
#[derive(Debug, Clone)]
pub struct RequestBuilder(Request);

impl RequestBuilder {
    /// Add or replace a header.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.headers.insert(name.into(), value.into());
        self
    }

    /// Raw body bytes.
    #[must_use]
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.0.body = Some(body.into());
        self
    }

    /// JSON body with its content type.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::JsonSerialization`] if `value` cannot be encoded.
    pub fn json<T: serde::Serialize>(self, value: &T) -> crate::Result<Self> {
        let encoded = crate::to_json(value)?;
        Ok(self.header("Content-Type", APPLICATION_JSON).body(encoded))
    }

    /// Finish.
    #[must_use]
    pub fn build(self) -> Request {
        self.0
    }
}
