//! Endpoint handles: named calls and pagination.

use serde_json::Value;
use tracing::{debug, warn};

use crate::{
    ApiCalls, CallDefinition, Decode, Error, HttpClient, Params, Reply, Result, Tapir, merge,
};

/// Page range for [`Endpoint::page`].
///
/// Both ends are inclusive. Defaults to pages `0..=1` in the `page` parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pagination {
    /// First page requested.
    pub start: i64,
    /// Last page requested.
    pub end: i64,
    /// Parameter carrying the page index.
    pub param: String,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            start: 0,
            end: 1,
            param: "page".to_string(),
        }
    }
}

impl Pagination {
    /// Pages `start..=end` in the `page` parameter.
    #[must_use]
    pub fn new(start: i64, end: i64) -> Self {
        Self {
            start,
            end,
            ..Self::default()
        }
    }

    /// Use another parameter for the page index.
    #[must_use]
    pub fn param(mut self, name: impl Into<String>) -> Self {
        self.param = name.into();
        self
    }
}

/// A named API of a [`Tapir`] client.
///
/// Obtained from [`Tapir::endpoint`]; borrows the client for configuration,
/// global parameters, auth and transport.
#[derive(Debug)]
pub struct Endpoint<'a, C> {
    tapir: &'a Tapir<C>,
    name: &'a str,
    calls: &'a ApiCalls,
}

impl<C> Clone for Endpoint<'_, C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C> Copy for Endpoint<'_, C> {}

impl<'a, C: HttpClient> Endpoint<'a, C> {
    pub(crate) fn new(tapir: &'a Tapir<C>, name: &'a str, calls: &'a ApiCalls) -> Self {
        Self { tapir, name, calls }
    }

    /// API name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name
    }

    /// Names of the registered calls.
    pub fn calls(&self) -> impl Iterator<Item = &'a str> + use<'a, C> {
        self.calls.keys().map(String::as_str)
    }

    /// Definition of a call, `None` if not registered.
    #[must_use]
    pub fn definition(&self, call: &str) -> Option<&'a CallDefinition> {
        self.calls.get(call)
    }

    /// Invoke a call.
    ///
    /// `params` are merged over the client's global parameters, path tokens
    /// are substituted and consumed, the remaining parameters split into the
    /// query string and the body according to the call's `data` list.
    ///
    /// # Errors
    ///
    /// - [`Error::UnknownCall`] if `call` is not registered
    /// - [`Error::Parameter`] if a path token has no value
    /// - transport errors; HTTP error statuses are not errors
    pub async fn call(&self, call: &str, params: Params) -> Result<Reply> {
        let definition = self
            .definition(call)
            .ok_or_else(|| Error::unknown_call(self.name, call))?;

        let mut params = merge(params, self.tapir.parameters());
        let url = definition.url().resolve(&mut params)?;

        let method = definition.method();
        let url = self
            .tapir
            .build_query(method, &url, &definition.query_params(&params))?;
        let body = definition.data_params(&params);

        debug!(api = self.name, call, %method, "invoking call");
        self.tapir.query(method, &url, &body, Decode::Json).await
    }

    /// Invoke a call once per page and gather the results.
    ///
    /// Pages are fetched one after the other. With a `data_container`
    /// setting the array under that field is taken from every page and the
    /// arrays are concatenated; otherwise each page's whole reply becomes
    /// one element. An invalid reply counts as `null`.
    ///
    /// # Errors
    ///
    /// [`Error::Range`] if the range is reversed, before any request is sent.
    /// Any error of [`Endpoint::call`] aborts the whole run.
    pub async fn page(&self, call: &str, params: Params, pages: &Pagination) -> Result<Vec<Value>> {
        if pages.start > pages.end {
            return Err(Error::Range {
                start: pages.start,
                end: pages.end,
            });
        }

        let container = self.tapir.settings().data_container();
        let mut results = Vec::new();

        for index in pages.start..=pages.end {
            let mut page_params = params.clone();
            page_params.insert(pages.param.clone(), Value::from(index));

            let reply = self.call(call, page_params).await?;
            match container {
                Some(container) => match reply.field(container) {
                    Some(Value::Array(items)) => results.extend(items.iter().cloned()),
                    _ => warn!(
                        api = self.name,
                        call,
                        page = index,
                        container,
                        "page reply has no result array"
                    ),
                },
                None => results.push(reply.into_value()),
            }
        }

        Ok(results)
    }
}
