//! HTTP responses as handed back by a transport.
//!
//! The transport separates the header block from the body; tapir only ever
//! looks at the status, the headers (for cache hooks) and the body bytes.

use std::collections::HashMap;

use bytes::Bytes;

use crate::{Decode, Reply};

/// What a transport brought back: status, headers, whole body.
#[derive(Debug, Clone)]
pub struct Response {
    status: u16,
    headers: HashMap<String, String>,
    body: Bytes,
}

impl Response {
    /// Assemble a response.
    #[must_use]
    pub fn new(status: u16, headers: HashMap<String, String>, body: Bytes) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// Status code.
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.status
    }

    /// Headers keyed by name as the transport reported them.
    #[must_use]
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Header value, name matched case-insensitively.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Response body.
    #[must_use]
    pub const fn body(&self) -> &Bytes {
        &self.body
    }

    /// Status is 2xx.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self.status, 200..=299)
    }

    /// Decode the body into a [`Reply`].
    #[must_use]
    pub fn reply(&self, decode: Decode) -> Reply {
        Reply::from_body(&self.body, decode)
    }
}
