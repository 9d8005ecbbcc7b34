//! Prelude module for convenient imports.
//!
//! ```ignore
//! use tapir::prelude::*;
//! ```

pub use crate::{
    Auth, CacheHooks, Decode, Definition, Endpoint, Error, FnCache, HttpClient, HyperClient,
    Method, Pagination, Params, Reply, Result, Tapir, to_params,
};
pub use serde_json::{Value, json};
