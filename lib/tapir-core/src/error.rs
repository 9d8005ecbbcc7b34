//! Error types for tapir.
//!
//! Structural problems (bad configuration, unknown names, missing path
//! parameters, inverted page ranges) and transport failures are reported as
//! [`Error`]. HTTP error statuses and undecodable bodies are not: they come
//! back as a [`Reply`](crate::Reply) value.

use derive_more::{Display, Error, From};

/// Main error type for tapir operations.
#[derive(Debug, Display, Error, From)]
pub enum Error {
    /// Definition missing, unreadable or malformed.
    #[display("configuration error: {_0}")]
    #[from(skip)]
    Configuration(#[error(not(source))] String),

    /// An authentication strategy is already active on this client.
    #[display("authentication has already been set")]
    #[from(skip)]
    AuthAlreadySet,

    /// No API with this name is registered.
    #[display("unregistered API: {_0}")]
    #[from(skip)]
    UnknownEndpoint(#[error(not(source))] String),

    /// No call with this name exists on the endpoint.
    #[display("call does not exist: {call} (on API {endpoint})")]
    #[from(skip)]
    UnknownCall {
        /// Endpoint that was searched.
        endpoint: String,
        /// Requested call name.
        call: String,
    },

    /// A URL path token had no parameter to fill it.
    #[display("parameter error: \"{_0}\" is required")]
    #[from(skip)]
    Parameter(#[error(not(source))] String),

    /// Pagination was asked to run backwards.
    #[display("start page {start} must not be greater than end page {end}")]
    #[from(skip)]
    Range {
        /// First requested page.
        start: i64,
        /// Last requested page.
        end: i64,
    },

    /// HTTP method name outside GET/POST/PUT/PATCH/DELETE.
    #[display("unsupported HTTP method: {_0}")]
    #[from(skip)]
    InvalidMethod(#[error(not(source))] String),

    /// Network/connection errors.
    #[display("connection error: {_0}")]
    #[from(skip)]
    Connection(#[error(not(source))] String),

    /// TLS/SSL errors.
    #[display("TLS error: {_0}")]
    #[from(skip)]
    Tls(#[error(not(source))] String),

    /// Request timeout.
    #[display("request timeout")]
    #[from(skip)]
    Timeout,

    /// Request could not be assembled.
    #[display("invalid request: {_0}")]
    #[from(skip)]
    InvalidRequest(#[error(not(source))] String),

    /// URL parsing error.
    #[display("invalid URL: {_0}")]
    #[from]
    InvalidUrl(url::ParseError),

    /// JSON serialization error.
    #[display("JSON serialization error: {_0}")]
    #[from]
    JsonSerialization(serde_json::Error),

    /// Filesystem error while reading a definition.
    #[display("I/O error: {_0}")]
    #[from]
    Io(std::io::Error),
}

/// Result type alias using [`crate::Error`].
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a configuration error.
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Create an unknown-endpoint error.
    #[must_use]
    pub fn unknown_endpoint(name: impl Into<String>) -> Self {
        Self::UnknownEndpoint(name.into())
    }

    /// Create an unknown-call error.
    #[must_use]
    pub fn unknown_call(endpoint: impl Into<String>, call: impl Into<String>) -> Self {
        Self::UnknownCall {
            endpoint: endpoint.into(),
            call: call.into(),
        }
    }

    /// Create a missing path parameter error.
    #[must_use]
    pub fn parameter(token: impl Into<String>) -> Self {
        Self::Parameter(token.into())
    }

    /// Create a connection error.
    #[must_use]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection(message.into())
    }

    /// Create a TLS error.
    #[must_use]
    pub fn tls(message: impl Into<String>) -> Self {
        Self::Tls(message.into())
    }

    /// Create an invalid request error.
    #[must_use]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }

    /// Returns `true` if this is a timeout error.
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout)
    }

    /// Returns `true` if this is a connection error.
    #[must_use]
    pub const fn is_connection(&self) -> bool {
        matches!(self, Self::Connection(_))
    }

    /// Returns `true` if the definition could not be loaded.
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_) | Self::Io(_))
    }

    /// Returns `true` if a path parameter was missing.
    #[must_use]
    pub const fn is_parameter(&self) -> bool {
        matches!(self, Self::Parameter(_))
    }

    /// Returns `true` if an endpoint or call name was not registered.
    #[must_use]
    pub const fn is_unknown_name(&self) -> bool {
        matches!(self, Self::UnknownEndpoint(_) | Self::UnknownCall { .. })
    }

    /// Returns `true` if the error came from the network layer rather than
    /// from how the request was described.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Connection(_) | Self::Tls(_) | Self::Timeout)
    }
}
