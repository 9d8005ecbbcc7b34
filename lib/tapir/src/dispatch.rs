//! Request dispatch: method-specific encoding, cache hooks, reply decoding.

use tracing::debug;

use crate::{
    APPLICATION_JSON, Auth, Decode, HttpClient, Method, Params, Reply, Request, Result,
    append_query, build_query,
    cache::{CacheHooks, NoCache},
};

/// Sends fully-resolved requests through a transport.
///
/// Encoding per method:
/// - GET: body parameters are appended to the query string, no body
/// - POST, PATCH: JSON body, JSON content type and accept headers
/// - PUT: JSON body, JSON content type
/// - DELETE: no body
///
/// GET requests consult the cache hooks first and successful, non-empty GET
/// replies are handed to them afterwards. An empty cached value is a miss.
/// Other methods never touch the cache.
pub struct Dispatcher<C> {
    http: C,
    cache: Box<dyn CacheHooks>,
}

impl<C> std::fmt::Debug for Dispatcher<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher").finish_non_exhaustive()
    }
}

impl<C: HttpClient> Dispatcher<C> {
    /// Dispatcher without caching.
    pub fn new(http: C) -> Self {
        Self::with_cache(http, NoCache)
    }

    /// Dispatcher with cache hooks.
    pub fn with_cache(http: C, cache: impl CacheHooks + 'static) -> Self {
        Self::with_boxed_cache(http, Box::new(cache))
    }

    pub(crate) fn with_boxed_cache(http: C, cache: Box<dyn CacheHooks>) -> Self {
        Self { http, cache }
    }

    /// The transport.
    pub fn http_client(&self) -> &C {
        &self.http
    }

    /// Send `method` to `url` with `body` parameters and decode the reply.
    ///
    /// `url` already carries its query string. HTTP error statuses are not
    /// errors: their bodies are decoded like any other.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid, the body cannot be encoded, or
    /// the transport fails.
    pub async fn dispatch(
        &self,
        auth: &Auth,
        method: Method,
        url: &str,
        body: &Params,
        decode: Decode,
    ) -> Result<Reply> {
        if method.is_cacheable()
            && let Some(cached) = self.cache.get(url, body)
            && !cached.is_empty()
        {
            debug!(%method, "serving reply from cache");
            return Ok(cached);
        }

        let request = Self::encode(auth, method, url, body)?;
        let response = self.http.execute(request).await?;
        let reply = response.reply(decode);

        if method.is_cacheable() && response.is_success() && !reply.is_empty() {
            self.cache.set(url, body, &reply, response.headers());
        }

        Ok(reply)
    }

    fn encode(auth: &Auth, method: Method, url: &str, body: &Params) -> Result<Request> {
        let target = if method == Method::Get {
            append_query(url, &build_query(body))
        } else {
            url.to_string()
        };
        let builder = Request::builder(method, url::Url::parse(&target)?);

        let mut request = match method {
            Method::Get => builder.build(),
            Method::Post | Method::Patch => builder
                .header("Accept", APPLICATION_JSON)
                .json(body)?
                .build(),
            Method::Put => builder.json(body)?.build(),
            Method::Delete => {
                if !body.is_empty() {
                    debug!(
                        count = body.len(),
                        "DELETE carries no body, dropping parameters"
                    );
                }
                builder.build()
            }
        };

        auth.decorate_request(&mut request);
        Ok(request)
    }
}
