//! Transport logging layer.
//!
//! Logs each exchange with `tracing`. Query strings are never logged in full:
//! signed URLs carry credentials there, so only parameter names show up, and
//! only at debug level.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Instant;

use tower::{Layer, Service};
use tracing::{Instrument, Level, debug, info, span, warn};

use crate::{Error, Request, Response, Result};

/// Log detail for [`LoggingLayer`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogLevel {
    /// Also log query parameter names and header names.
    Debug,
    /// One line per request and per outcome.
    #[default]
    Info,
}

/// Layer that logs requests and their outcome.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingLayer {
    level: LogLevel,
}

impl LoggingLayer {
    /// Info-level logging.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Debug-level logging.
    #[must_use]
    pub fn debug() -> Self {
        Self {
            level: LogLevel::Debug,
        }
    }

    /// Configured detail.
    #[must_use]
    pub const fn level(&self) -> LogLevel {
        self.level
    }
}

impl<S> Layer<S> for LoggingLayer {
    type Service = Logging<S>;

    fn layer(&self, inner: S) -> Self::Service {
        Logging {
            inner,
            level: self.level,
        }
    }
}

/// Service produced by [`LoggingLayer`].
#[derive(Debug, Clone)]
pub struct Logging<S> {
    inner: S,
    level: LogLevel,
}

fn query_names(url: &url::Url) -> Vec<String> {
    url.query_pairs().map(|(name, _)| name.into_owned()).collect()
}

impl<S> Service<Request> for Logging<S>
where
    S: Service<Request, Response = Response, Error = Error> + Clone + Send + 'static,
    S::Future: Send,
{
    type Response = Response;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<()>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: Request) -> Self::Future {
        let method = request.method();
        let host = request.url().host_str().unwrap_or_default().to_string();
        let path = request.url().path().to_string();
        let level = self.level;

        let span = span!(Level::INFO, "tapir_request", %method, %host, %path);

        span.in_scope(|| {
            if level == LogLevel::Debug {
                let headers: Vec<&String> = request.headers().keys().collect();
                debug!(
                    query = ?query_names(request.url()),
                    ?headers,
                    body_bytes = request.body().map_or(0, bytes::Bytes::len),
                    "sending request"
                );
            } else {
                info!("sending request");
            }
        });

        let mut inner = self.inner.clone();
        Box::pin(
            async move {
                let start = Instant::now();
                let result = inner.call(request).await;
                let elapsed_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);

                match &result {
                    Ok(response) if response.is_success() => {
                        info!(status = response.status(), elapsed_ms, "request completed");
                    }
                    Ok(response) => {
                        warn!(
                            status = response.status(),
                            elapsed_ms, "request completed with HTTP error status"
                        );
                    }
                    Err(err) => warn!(error = %err, elapsed_ms, "request failed"),
                }

                result
            }
            .instrument(span),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn logging_layer_default() {
        assert_eq!(LoggingLayer::new().level(), LogLevel::Info);
        assert_eq!(LoggingLayer::debug().level(), LogLevel::Debug);
    }

    #[test]
    fn query_names_only() {
        let url = url::Url::parse("https://x.test/a?oauth_signature=secret&page=2").expect("url");
        assert_eq!(query_names(&url), vec!["oauth_signature", "page"]);
    }
}
