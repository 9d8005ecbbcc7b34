//! Default transport: hyper-util over rustls, behind a tower service stack.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex, PoisonError};
use std::task::{Context, Poll};
use std::time::Duration;

use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper_rustls::{HttpsConnector, HttpsConnectorBuilder};
use hyper_util::client::legacy::{Client, connect::HttpConnector};
use hyper_util::rt::TokioExecutor;
use tower::Layer;
use tower::util::BoxCloneService;
use tower_service::Service;

use crate::{Error, HttpClient, Request, Response, Result, TransportConfig, logging::LoggingLayer};

/// Future returned by the transport service stack.
pub type ServiceFuture = Pin<Box<dyn Future<Output = Result<Response>> + Send + 'static>>;

type Stack = BoxCloneService<Request, Response, Error>;
type Pool = Client<HttpsConnector<HttpConnector>, Full<Bytes>>;

/// Connection pool speaking HTTP/1.1 and HTTP/2, plain or TLS.
fn pool(config: &TransportConfig) -> Pool {
    let roots: rustls::RootCertStore = webpki_roots::TLS_SERVER_ROOTS.iter().cloned().collect();
    let tls = rustls::ClientConfig::builder()
        .with_root_certificates(roots)
        .with_no_client_auth();

    let mut tcp = HttpConnector::new();
    tcp.enforce_http(false);
    tcp.set_connect_timeout(Some(config.connect_timeout));

    let connector = HttpsConnectorBuilder::new()
        .with_tls_config(tls)
        .https_or_http()
        .enable_http1()
        .enable_http2()
        .wrap_connector(tcp);

    Client::builder(TokioExecutor::new())
        .pool_idle_timeout(config.idle_timeout)
        .pool_max_idle_per_host(config.max_idle_per_host)
        .build(connector)
}

fn to_hyper(request: Request) -> Result<http::Request<Full<Bytes>>> {
    let (method, url, headers, body) = request.into_parts();

    headers
        .iter()
        .fold(
            http::Request::builder()
                .method(http::Method::from(method))
                .uri(url.as_str()),
            |builder, (name, value)| builder.header(name.as_str(), value.as_str()),
        )
        .body(Full::new(body.unwrap_or_default()))
        .map_err(|err| Error::invalid_request(err.to_string()))
}

/// Header values that are not visible ASCII are left out.
fn header_map(headers: &http::HeaderMap) -> HashMap<String, String> {
    headers
        .iter()
        .filter_map(|(name, value)| {
            let value = value.to_str().ok()?;
            Some((name.as_str().to_string(), value.to_string()))
        })
        .collect()
}

fn classify(err: &hyper_util::client::legacy::Error) -> Error {
    let message = err.to_string();
    let lower = message.to_lowercase();
    if !err.is_connect() && ["tls", "ssl", "certificate"].iter().any(|k| lower.contains(k)) {
        Error::tls(message)
    } else {
        Error::connection(message)
    }
}

/// Innermost service: one exchange through the pool, bounded by the request
/// timeout.
#[derive(Clone)]
struct Exchange {
    pool: Pool,
    timeout: Duration,
}

impl Exchange {
    async fn run(self, request: Request) -> Result<Response> {
        let sending = self.pool.request(to_hyper(request)?);
        let response = tokio::time::timeout(self.timeout, sending)
            .await
            .map_err(|_| Error::Timeout)?
            .map_err(|err| classify(&err))?;

        let (parts, body) = response.into_parts();
        let body = body
            .collect()
            .await
            .map_err(|err| Error::connection(err.to_string()))?
            .to_bytes();

        let headers = header_map(&parts.headers);
        Ok(Response::new(parts.status.as_u16(), headers, body))
    }
}

impl Service<Request> for Exchange {
    type Response = Response;
    type Error = Error;
    type Future = ServiceFuture;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<()>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, request: Request) -> Self::Future {
        Box::pin(self.clone().run(request))
    }
}

/// Transport used by [`Tapir`](crate::Tapir) unless another [`HttpClient`]
/// is supplied.
///
/// Pools connections, verifies TLS against the Mozilla roots, and optionally
/// logs every exchange through [`LoggingLayer`].
///
/// ```ignore
/// use std::time::Duration;
/// use tapir::HyperClient;
///
/// let http = HyperClient::builder()
///     .request_timeout(Duration::from_secs(5))
///     .with_logging()
///     .build();
/// ```
#[derive(Clone)]
pub struct HyperClient {
    stack: Arc<Mutex<Stack>>,
    config: TransportConfig,
}

impl std::fmt::Debug for HyperClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HyperClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl HyperClient {
    /// Transport with default limits and no logging.
    #[must_use]
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Transport with the given limits and no logging.
    #[must_use]
    pub fn with_config(config: TransportConfig) -> Self {
        Self::builder().config(config).build()
    }

    /// Start configuring a transport.
    #[must_use]
    pub fn builder() -> HyperClientBuilder {
        HyperClientBuilder::default()
    }

    /// Limits in effect.
    #[must_use]
    pub const fn config(&self) -> &TransportConfig {
        &self.config
    }

    fn send(&self, request: Request) -> ServiceFuture {
        // The stack is cloned out so the lock is not held across the exchange.
        let mut stack = self
            .stack
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        Box::pin(async move { stack.call(request).await })
    }
}

impl Default for HyperClient {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpClient for HyperClient {
    fn execute(&self, request: Request) -> impl Future<Output = Result<Response>> + Send {
        self.send(request)
    }
}

/// Builder for [`HyperClient`].
#[derive(Debug, Default)]
pub struct HyperClientBuilder {
    config: TransportConfig,
    logging: Option<LoggingLayer>,
}

impl HyperClientBuilder {
    /// Replace all limits at once.
    #[must_use]
    pub const fn config(mut self, config: TransportConfig) -> Self {
        self.config = config;
        self
    }

    /// Budget for a whole exchange.
    #[must_use]
    pub const fn request_timeout(mut self, timeout: Duration) -> Self {
        self.config = self.config.request_timeout(timeout);
        self
    }

    /// Budget for establishing a connection.
    #[must_use]
    pub const fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.config = self.config.connect_timeout(timeout);
        self
    }

    /// Log exchanges at info level.
    #[must_use]
    pub fn with_logging(mut self) -> Self {
        self.logging = Some(LoggingLayer::new());
        self
    }

    /// Log exchanges at debug level, with parameter and header names.
    #[must_use]
    pub fn with_debug_logging(mut self) -> Self {
        self.logging = Some(LoggingLayer::debug());
        self
    }

    /// Assemble the service stack.
    #[must_use]
    pub fn build(self) -> HyperClient {
        let exchange = Exchange {
            pool: pool(&self.config),
            timeout: self.config.request_timeout,
        };
        let stack = match self.logging {
            Some(logging) => Stack::new(logging.layer(exchange)),
            None => Stack::new(exchange),
        };

        HyperClient {
            stack: Arc::new(Mutex::new(stack)),
            config: self.config,
        }
    }
}
