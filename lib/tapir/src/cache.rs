//! Response cache hooks.
//!
//! tapir does not store anything itself. An application that wants caching
//! hands the client a [`CacheHooks`] implementation; the dispatcher consults
//! it before GET requests and feeds it successful GET replies.

use std::collections::HashMap;

use crate::{Params, Reply};

/// Get/set capability for caching GET replies.
///
/// Keys are the final request URL (query string and any signature included)
/// together with the body parameters that were appended to it.
pub trait CacheHooks: Send + Sync {
    /// Look up a cached reply.
    fn get(&self, url: &str, params: &Params) -> Option<Reply>;

    /// Store a reply along with the response headers it arrived with.
    fn set(&self, url: &str, params: &Params, reply: &Reply, headers: &HashMap<String, String>);
}

/// Caching disabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCache;

impl CacheHooks for NoCache {
    fn get(&self, _url: &str, _params: &Params) -> Option<Reply> {
        None
    }

    fn set(
        &self,
        _url: &str,
        _params: &Params,
        _reply: &Reply,
        _headers: &HashMap<String, String>,
    ) {
    }
}

/// Cache hooks backed by two closures.
///
/// # Example
///
/// ```
/// use std::collections::HashMap;
/// use std::sync::Mutex;
///
/// use tapir::{FnCache, Reply};
///
/// let store: &'static Mutex<HashMap<String, Reply>> = Box::leak(Box::default());
/// let cache = FnCache::new(
///     |url, _params| store.lock().ok()?.get(url).cloned(),
///     |url, _params, reply, _headers| {
///         if let Ok(mut store) = store.lock() {
///             store.insert(url.to_string(), reply.clone());
///         }
///     },
/// );
/// # let _ = cache;
/// ```
pub struct FnCache<G, S> {
    get: G,
    set: S,
}

impl<G, S> FnCache<G, S>
where
    G: Fn(&str, &Params) -> Option<Reply> + Send + Sync,
    S: Fn(&str, &Params, &Reply, &HashMap<String, String>) + Send + Sync,
{
    /// Wrap a getter and a setter.
    pub const fn new(get: G, set: S) -> Self {
        Self { get, set }
    }
}

impl<G, S> CacheHooks for FnCache<G, S>
where
    G: Fn(&str, &Params) -> Option<Reply> + Send + Sync,
    S: Fn(&str, &Params, &Reply, &HashMap<String, String>) + Send + Sync,
{
    fn get(&self, url: &str, params: &Params) -> Option<Reply> {
        (self.get)(url, params)
    }

    fn set(&self, url: &str, params: &Params, reply: &Reply, headers: &HashMap<String, String>) {
        (self.set)(url, params, reply, headers);
    }
}

impl<G, S> std::fmt::Debug for FnCache<G, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnCache").finish_non_exhaustive()
    }
}
