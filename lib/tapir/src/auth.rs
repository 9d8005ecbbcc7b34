//! Authentication strategies.
//!
//! A client carries exactly one [`Auth`]. It touches outgoing requests at two
//! points:
//! - [`Auth::decorate_query`] turns a resolved URL plus query parameters into
//!   the final URL (OAuth 1.0 signs here)
//! - [`Auth::decorate_request`] adjusts the assembled request (Basic adds its
//!   `Authorization` header here)

use std::time::{SystemTime, UNIX_EPOCH};

use base64::Engine;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use tracing::trace;

use crate::{Method, Params, Request, Result, append_query, build_query, query_pairs};

/// RFC 3986 unreserved characters stay as they are, everything else is encoded.
const RFC3986: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

fn encode(value: &str) -> String {
    utf8_percent_encode(value, RFC3986).to_string()
}

/// Authentication strategy of a client.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Auth {
    /// No authentication.
    #[default]
    None,
    /// HTTP Basic authentication.
    Basic(BasicAuth),
    /// OAuth 1.0 request signing with an already-issued token.
    OAuth1(OAuth1),
}

impl Auth {
    /// Basic authentication with the given credentials.
    #[must_use]
    pub fn basic(username: impl AsRef<str>, password: impl AsRef<str>) -> Self {
        Self::Basic(BasicAuth::new(username, password))
    }

    /// OAuth 1.0 signing with a consumer pair and a token pair.
    #[must_use]
    pub fn oauth1(
        consumer_key: impl Into<String>,
        consumer_secret: impl Into<String>,
        token: impl Into<String>,
        token_secret: impl Into<String>,
    ) -> Self {
        let oauth = OAuth1::new(consumer_key, consumer_secret, token, token_secret);
        Self::OAuth1(oauth)
    }

    /// Returns `true` unless this is [`Auth::None`].
    #[must_use]
    pub const fn is_set(&self) -> bool {
        !matches!(self, Self::None)
    }

    /// Build the final URL for `url` carrying `params` in its query string.
    ///
    /// # Errors
    ///
    /// Returns an error if OAuth signing cannot parse `url`.
    pub fn decorate_query(&self, method: Method, url: &str, params: &Params) -> Result<String> {
        match self {
            Self::None | Self::Basic(_) => Ok(append_query(url, &build_query(params))),
            Self::OAuth1(oauth) => oauth.sign_url(method, url, params),
        }
    }

    /// Apply credentials to an assembled request.
    ///
    /// Basic credentials ride on every method, PUT included. The hyper
    /// transport sends PUT bodies reliably, so PUT needs no separate path.
    pub fn decorate_request(&self, request: &mut Request) {
        if let Self::Basic(basic) = self {
            request
                .headers_mut()
                .insert("Authorization".to_string(), basic.header_value());
        }
    }
}

/// HTTP Basic credentials.
#[derive(Clone, PartialEq, Eq)]
pub struct BasicAuth {
    username: String,
    /// Base64-encoded "username:password".
    encoded_credentials: String,
}

impl BasicAuth {
    /// Encode a username and password.
    pub fn new(username: impl AsRef<str>, password: impl AsRef<str>) -> Self {
        let credentials = format!("{}:{}", username.as_ref(), password.as_ref());
        Self {
            username: username.as_ref().to_string(),
            encoded_credentials: base64::engine::general_purpose::STANDARD.encode(credentials),
        }
    }

    /// The username.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// `Authorization` header value.
    #[must_use]
    pub fn header_value(&self) -> String {
        format!("Basic {}", self.encoded_credentials)
    }
}

impl std::fmt::Debug for BasicAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BasicAuth")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

/// OAuth 1.0 credentials, signed with the PLAINTEXT method.
#[derive(Clone, PartialEq, Eq)]
pub struct OAuth1 {
    consumer_key: String,
    consumer_secret: String,
    token: String,
    token_secret: String,
}

impl OAuth1 {
    /// Create credentials from a consumer pair and a token pair.
    pub fn new(
        consumer_key: impl Into<String>,
        consumer_secret: impl Into<String>,
        token: impl Into<String>,
        token_secret: impl Into<String>,
    ) -> Self {
        Self {
            consumer_key: consumer_key.into(),
            consumer_secret: consumer_secret.into(),
            token: token.into(),
            token_secret: token_secret.into(),
        }
    }

    /// The consumer key.
    #[must_use]
    pub fn consumer_key(&self) -> &str {
        &self.consumer_key
    }

    /// The token.
    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }

    /// PLAINTEXT signature: both secrets, encoded, joined by `&`.
    #[must_use]
    pub fn signature(&self) -> String {
        format!(
            "{}&{}",
            encode(&self.consumer_secret),
            encode(&self.token_secret)
        )
    }

    /// Sign `url` with `params`, using the current time and a fresh nonce.
    ///
    /// # Errors
    ///
    /// Returns an error if `url` cannot be parsed.
    pub fn sign_url(&self, method: Method, url: &str, params: &Params) -> Result<String> {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |elapsed| elapsed.as_secs());
        let nonce = uuid::Uuid::new_v4().simple().to_string();
        self.sign_url_with(method, url, params, timestamp, &nonce)
    }

    /// Sign `url` with `params` using a fixed timestamp and nonce.
    ///
    /// The result is the normalized URL (scheme, host, non-default port,
    /// path) followed by every parameter, existing query included, sorted by
    /// name and RFC 3986 encoded.
    ///
    /// # Errors
    ///
    /// Returns an error if `url` cannot be parsed.
    pub fn sign_url_with(
        &self,
        method: Method,
        url: &str,
        params: &Params,
        timestamp: u64,
        nonce: &str,
    ) -> Result<String> {
        let parsed = url::Url::parse(url)?;

        let mut pairs: Vec<(String, String)> = parsed.query_pairs().into_owned().collect();
        pairs.extend([
            ("oauth_version".to_string(), "1.0".to_string()),
            ("oauth_nonce".to_string(), nonce.to_string()),
            ("oauth_timestamp".to_string(), timestamp.to_string()),
            ("oauth_consumer_key".to_string(), self.consumer_key.clone()),
            ("oauth_token".to_string(), self.token.clone()),
            (
                "oauth_signature_method".to_string(),
                "PLAINTEXT".to_string(),
            ),
            ("oauth_signature".to_string(), self.signature()),
        ]);
        pairs.extend(query_pairs(params));
        pairs.sort();

        let query = pairs
            .iter()
            .map(|(key, value)| format!("{}={}", encode(key), encode(value)))
            .collect::<Vec<_>>()
            .join("&");

        let mut normalized = format!(
            "{}://{}",
            parsed.scheme(),
            parsed.host_str().unwrap_or_default()
        );
        if let Some(port) = parsed.port() {
            normalized.push_str(&format!(":{port}"));
        }
        normalized.push_str(parsed.path());

        trace!(%method, url = %normalized, "signed OAuth 1.0 request");
        Ok(format!("{normalized}?{query}"))
    }
}

impl std::fmt::Debug for OAuth1 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OAuth1")
            .field("consumer_key", &self.consumer_key)
            .field("token", &self.token)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use assert2::{check, let_assert};
    use serde_json::json;

    use super::*;
    use crate::to_params;

    fn params(value: serde_json::Value) -> Params {
        to_params(&value).expect("object")
    }

    #[test]
    fn basic_auth_encodes_correctly() {
        // "user:pass" -> "dXNlcjpwYXNz"
        let basic = BasicAuth::new("user", "pass");
        check!(basic.header_value() == "Basic dXNlcjpwYXNz");
        check!(basic.username() == "user");
    }

    #[test]
    fn basic_auth_debug_hides_password() {
        let debug = format!("{:?}", Auth::basic("user", "hunter2"));
        check!(debug.contains("user"));
        check!(!debug.contains("hunter2"));
        check!(!debug.contains("aHVudGVyMg"));
    }

    #[test]
    fn no_auth_appends_query() {
        let url = Auth::None
            .decorate_query(
                Method::Get,
                "https://api.example.com/users/42/posts",
                &params(json!({"page": 2})),
            )
            .expect("query");
        check!(url == "https://api.example.com/users/42/posts?page=2");
    }

    #[test]
    fn no_auth_without_params_keeps_url() {
        let url = Auth::None
            .decorate_query(Method::Get, "https://api.example.com/users", &Params::new())
            .expect("query");
        check!(url == "https://api.example.com/users");
    }

    #[test]
    fn basic_auth_builds_query_like_none() {
        let p = params(json!({"q": "a b"}));
        let basic = Auth::basic("u", "p")
            .decorate_query(Method::Get, "https://x.test/s", &p)
            .expect("query");
        let none = Auth::None
            .decorate_query(Method::Get, "https://x.test/s", &p)
            .expect("query");
        check!(basic == none);
    }

    #[test]
    fn basic_auth_decorates_every_method() {
        for method in [
            Method::Get,
            Method::Post,
            Method::Put,
            Method::Patch,
            Method::Delete,
        ] {
            let mut request =
                Request::builder(method, "https://x.test/".parse().expect("url")).build();
            Auth::basic("user", "pass").decorate_request(&mut request);
            check!(request.header("Authorization") == Some("Basic dXNlcjpwYXNz"));
        }
    }

    #[test]
    fn other_strategies_leave_request_alone() {
        let mut request =
            Request::builder(Method::Get, "https://x.test/".parse().expect("url")).build();
        Auth::None.decorate_request(&mut request);
        Auth::oauth1("ck", "cs", "t", "ts").decorate_request(&mut request);
        check!(request.headers().is_empty());
    }

    #[test]
    fn plaintext_signature_encodes_secrets() {
        let oauth = OAuth1::new("key", "c&secret", "token", "t secret");
        check!(oauth.signature() == "c%26secret&t%20secret");
    }

    #[test]
    fn oauth_signed_url() {
        let oauth = OAuth1::new("ck", "cs", "tok", "ts");
        let url = oauth
            .sign_url_with(
                Method::Get,
                "https://API.example.com:443/v1/items?existing=1",
                &params(json!({"page": 2, "q": "a b"})),
                1_700_000_000,
                "abc123",
            )
            .expect("sign");

        check!(
            url == "https://api.example.com/v1/items?existing=1\
                    &oauth_consumer_key=ck\
                    &oauth_nonce=abc123\
                    &oauth_signature=cs%26ts\
                    &oauth_signature_method=PLAINTEXT\
                    &oauth_timestamp=1700000000\
                    &oauth_token=tok\
                    &oauth_version=1.0\
                    &page=2\
                    &q=a%20b"
        );
    }

    #[test]
    fn oauth_keeps_non_default_port() {
        let oauth = OAuth1::new("ck", "cs", "tok", "ts");
        let url = oauth
            .sign_url_with(
                Method::Post,
                "http://localhost:8080/x",
                &Params::new(),
                1,
                "n",
            )
            .expect("sign");
        check!(url.starts_with("http://localhost:8080/x?oauth_consumer_key=ck&"));
    }

    #[test]
    fn oauth_sign_url_uses_fresh_nonce() {
        let oauth = OAuth1::new("ck", "cs", "tok", "ts");
        let first = oauth
            .sign_url(Method::Get, "https://x.test/a", &Params::new())
            .expect("sign");
        let second = oauth
            .sign_url(Method::Get, "https://x.test/a", &Params::new())
            .expect("sign");
        check!(first != second);
        check!(first.contains("oauth_signature_method=PLAINTEXT"));
    }

    #[test]
    fn oauth_rejects_relative_url() {
        let oauth = OAuth1::new("ck", "cs", "tok", "ts");
        let result = oauth.sign_url(Method::Get, "/relative", &Params::new());
        let_assert!(Err(crate::Error::InvalidUrl(_)) = result);
    }

    #[test]
    fn auth_is_set() {
        check!(!Auth::None.is_set());
        check!(Auth::basic("a", "b").is_set());
        check!(Auth::oauth1("a", "b", "c", "d").is_set());
    }
}
