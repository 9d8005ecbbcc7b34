//! HTTP transport trait.
//!
//! [`HttpClient`] is the seam between request construction and the network.
//! The `tapir` crate ships a hyper-based implementation; tests and embedders
//! can plug in their own.

use std::future::Future;

use crate::{Request, Response, Result};

/// Core HTTP transport trait.
///
/// Implementations send exactly the request they are given and hand back the
/// response whatever its status. Only failures to obtain a response at all
/// are errors.
pub trait HttpClient: Send + Sync {
    /// Execute an HTTP request and return the response.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails for any reason:
    /// - Network errors
    /// - TLS errors
    /// - Timeouts
    fn execute(&self, request: Request) -> impl Future<Output = Result<Response>> + Send;
}

impl<T: HttpClient> HttpClient for &T {
    fn execute(&self, request: Request) -> impl Future<Output = Result<Response>> + Send {
        (**self).execute(request)
    }
}

impl<T: HttpClient> HttpClient for std::sync::Arc<T> {
    fn execute(&self, request: Request) -> impl Future<Output = Result<Response>> + Send {
        (**self).execute(request)
    }
}
