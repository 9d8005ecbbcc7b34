//! Declarative REST client driven by JSON API definitions.
//!
//! A definition names APIs, each a set of calls with an HTTP method, a URL
//! template and an optional list of body parameters. [`Tapir`] turns it into
//! endpoints that substitute path tokens, split the remaining parameters
//! between query string and JSON body, authenticate, and decode the reply.
//!
//! # Example
//!
//! ```ignore
//! use tapir::prelude::*;
//!
//! let definition = Definition::from_json(r#"{
//!     "data_container": "results",
//!     "apis": {
//!         "users": {
//!             "get":  { "method": "get",  "url": "https://api.example.com/users/{id}" },
//!             "list": { "method": "get",  "url": "https://api.example.com/users" },
//!             "create": { "method": "post", "url": "https://api.example.com/users", "data": ["name"] }
//!         }
//!     }
//! }"#)?;
//!
//! let tapir = Tapir::new(definition)?;
//! let users = tapir.endpoint("users")?;
//!
//! let user = users.call("get", to_params(&json!({"id": 42}))?).await?;
//! let all = users.page("list", Params::new(), &Pagination::new(1, 3)).await?;
//! ```

mod auth;
mod cache;
mod client;
mod config;
mod dispatch;
mod endpoint;
mod logging;
pub mod prelude;
#[cfg(test)]
mod testing;
mod transport;

pub use auth::{Auth, BasicAuth, OAuth1};
pub use cache::{CacheHooks, FnCache, NoCache};
pub use client::{Tapir, TapirBuilder};
pub use config::{DATA_CONTAINER, Settings, TransportConfig};
pub use dispatch::Dispatcher;
pub use endpoint::{Endpoint, Pagination};
pub use logging::{LogLevel, Logging, LoggingLayer};
pub use transport::{HyperClient, HyperClientBuilder, ServiceFuture};

// Re-export tower for custom transports
pub use tower;

// Re-export core types
pub use tapir_core::{
    APPLICATION_JSON, ApiCalls, CallDefinition, Decode, Definition, Error, HttpClient, Method,
    Params, Reply, Request, RequestBuilder, Response, Result, UrlTemplate, append_query,
    build_query, decode_json, merge, query_pairs, to_json, to_params, value_to_string,
};

pub use tapir_core;
