//! Core types and traits for the tapir declarative REST client.
//!
//! This crate provides the transport-independent pieces of tapir:
//! - [`Definition`] - parsed API definitions (APIs, calls, settings)
//! - [`CallDefinition`] - one call: method, URL template, body parameter list
//! - [`UrlTemplate`] - `{token}` substitution from parameters
//! - [`Params`] - parameter maps and their query/body encodings
//! - [`Request`] and [`Response`] - HTTP messages exchanged with a transport
//! - [`HttpClient`] - transport trait
//! - [`Reply`] - decoded result of a dispatched call
//! - [`Error`] and [`Result`] - error handling

mod body;
mod call;
mod client;
mod definition;
mod error;
mod method;
mod params;
pub mod prelude;
mod reply;
mod request;
mod response;
mod template;

pub use body::{APPLICATION_JSON, append_query, build_query, decode_json, query_pairs, to_json};
pub use call::CallDefinition;
pub use client::HttpClient;
pub use definition::{ApiCalls, Definition};
pub use error::{Error, Result};
pub use method::Method;
pub use params::{Params, merge, to_params, value_to_string};
pub use reply::{Decode, Reply};
pub use request::{Request, RequestBuilder};
pub use response::Response;
pub use template::UrlTemplate;
