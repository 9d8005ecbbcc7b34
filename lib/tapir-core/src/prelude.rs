//! Prelude module for convenient imports.
//!
//! ```ignore
//! use tapir_core::prelude::*;
//! ```

pub use crate::{
    CallDefinition, Decode, Definition, Error, HttpClient, Method, Params, Reply, Request,
    RequestBuilder, Response, Result, UrlTemplate, to_params,
};
