//! The client.

use std::collections::BTreeMap;

use serde_json::Value;
use tracing::debug;

use crate::{
    ApiCalls, Auth, Decode, Definition, Endpoint, Error, HttpClient, HyperClient, Method, Params,
    Reply, Result, Settings,
    cache::{CacheHooks, NoCache},
    dispatch::Dispatcher,
};

/// A REST client driven by a [`Definition`].
///
/// The client owns the settings, the global parameters merged into every
/// call, the authentication strategy and one endpoint per API of the
/// definition.
///
/// # Example
///
/// ```ignore
/// use tapir::{Definition, Params, Tapir};
///
/// let definition = Definition::from_file("apis/github.json")?;
/// let mut tapir = Tapir::new(definition)?;
/// tapir.use_basic_auth("octocat", "secret")?;
///
/// let repos = tapir.endpoint("repos")?;
/// let reply = repos.call("list", Params::new()).await?;
/// ```
pub struct Tapir<C = HyperClient> {
    settings: Settings,
    parameters: Params,
    auth: Auth,
    apis: BTreeMap<String, ApiCalls>,
    dispatcher: Dispatcher<C>,
}

impl<C> std::fmt::Debug for Tapir<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tapir")
            .field("settings", &self.settings)
            .field("auth", &self.auth)
            .field("apis", &self.apis.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

impl Tapir {
    /// Client over the default transport, without overrides.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if the definition's settings are invalid.
    pub fn new(definition: Definition) -> Result<Self> {
        Self::builder(definition).build()
    }

    /// Client for `<dir>/<name>.json`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if the file is missing or invalid.
    pub fn from_name(dir: impl AsRef<std::path::Path>, name: &str) -> Result<Self> {
        Self::new(Definition::from_name(dir, name)?)
    }

    /// Start building a client.
    #[must_use]
    pub fn builder(definition: Definition) -> TapirBuilder {
        TapirBuilder {
            definition,
            settings: Params::new(),
            auth: Auth::None,
            cache: Box::new(NoCache),
            http: HyperClient::new(),
        }
    }
}

impl<C: HttpClient> Tapir<C> {
    /// Value of a setting, `None` if absent.
    #[must_use]
    pub fn conf(&self, key: &str) -> Option<&Value> {
        self.settings.get(key)
    }

    /// All settings.
    #[must_use]
    pub const fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Replace the global parameters.
    pub fn set_parameters(&mut self, parameters: Params) {
        self.parameters = parameters;
    }

    /// Global parameters merged into every call.
    #[must_use]
    pub const fn parameters(&self) -> &Params {
        &self.parameters
    }

    /// Authenticate with HTTP Basic credentials.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AuthAlreadySet`] if a strategy is already active.
    pub fn use_basic_auth(&mut self, username: &str, password: &str) -> Result<()> {
        self.set_auth(Auth::basic(username, password))
    }

    /// Sign requests with OAuth 1.0 PLAINTEXT.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AuthAlreadySet`] if a strategy is already active.
    pub fn use_oauth(
        &mut self,
        consumer_key: &str,
        consumer_secret: &str,
        token: &str,
        token_secret: &str,
    ) -> Result<()> {
        let auth = Auth::oauth1(consumer_key, consumer_secret, token, token_secret);
        self.set_auth(auth)
    }

    /// Activate an authentication strategy. Auth can be set once.
    ///
    /// Setting [`Auth::None`] changes nothing.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AuthAlreadySet`] if a strategy is already active.
    pub fn set_auth(&mut self, auth: Auth) -> Result<()> {
        if !auth.is_set() {
            return Ok(());
        }
        if self.auth.is_set() {
            return Err(Error::AuthAlreadySet);
        }
        debug!(?auth, "authentication set");
        self.auth = auth;
        Ok(())
    }

    /// The active authentication strategy.
    #[must_use]
    pub const fn auth(&self) -> &Auth {
        &self.auth
    }

    /// The endpoint for an API.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownEndpoint`] if the definition has no such API.
    pub fn endpoint(&self, name: &str) -> Result<Endpoint<'_, C>> {
        self.apis
            .get_key_value(name)
            .map(|(name, calls)| Endpoint::new(self, name, calls))
            .ok_or_else(|| Error::unknown_endpoint(name))
    }

    /// Names of the APIs.
    pub fn endpoints(&self) -> impl Iterator<Item = &str> {
        self.apis.keys().map(String::as_str)
    }

    /// Final URL for `url` with `params` in its query string, signed if the
    /// auth strategy signs.
    ///
    /// # Errors
    ///
    /// Returns an error if signing cannot parse `url`.
    pub fn build_query(&self, method: Method, url: &str, params: &Params) -> Result<String> {
        self.auth.decorate_query(method, url, params)
    }

    /// Send a request to a final URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid or the transport fails.
    pub async fn query(
        &self,
        method: Method,
        url: &str,
        body: &Params,
        decode: Decode,
    ) -> Result<Reply> {
        self.dispatcher
            .dispatch(&self.auth, method, url, body, decode)
            .await
    }

    /// The transport.
    #[must_use]
    pub fn http_client(&self) -> &C {
        self.dispatcher.http_client()
    }
}

/// Builder for [`Tapir`].
pub struct TapirBuilder<C = HyperClient> {
    definition: Definition,
    settings: Params,
    auth: Auth,
    cache: Box<dyn CacheHooks>,
    http: C,
}

impl<C> std::fmt::Debug for TapirBuilder<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TapirBuilder")
            .field("settings", &self.settings)
            .field("auth", &self.auth)
            .finish_non_exhaustive()
    }
}

impl<C: HttpClient> TapirBuilder<C> {
    /// Settings overriding the definition's top-level keys.
    #[must_use]
    pub fn settings(mut self, settings: Params) -> Self {
        self.settings.extend(settings);
        self
    }

    /// Override one setting.
    #[must_use]
    pub fn setting(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.settings.insert(key.into(), value.into());
        self
    }

    /// Initial authentication strategy.
    #[must_use]
    pub fn auth(mut self, auth: Auth) -> Self {
        self.auth = auth;
        self
    }

    /// Cache hooks for GET replies.
    #[must_use]
    pub fn cache(mut self, cache: impl CacheHooks + 'static) -> Self {
        self.cache = Box::new(cache);
        self
    }

    /// Use another transport.
    #[must_use]
    pub fn http_client<D: HttpClient>(self, http: D) -> TapirBuilder<D> {
        TapirBuilder {
            definition: self.definition,
            settings: self.settings,
            auth: self.auth,
            cache: self.cache,
            http,
        }
    }

    /// Build the client.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if the merged settings are invalid.
    pub fn build(self) -> Result<Tapir<C>> {
        let Definition { apis, settings } = self.definition;
        let settings = Settings::new(settings, self.settings)?;
        debug!(apis = apis.len(), "client built");

        Ok(Tapir {
            settings,
            parameters: Params::new(),
            auth: self.auth,
            apis,
            dispatcher: Dispatcher::with_boxed_cache(self.http, self.cache),
        })
    }
}
