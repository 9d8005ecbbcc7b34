//! URL templates with `{name}` path tokens.

use serde_json::Value;
use tracing::trace;

use crate::{Error, Params, Result, params::value_to_string};

/// A URL pattern such as `https://{subdomain}.example.com/users/{id}`.
///
/// A token is a brace, the shortest run of characters up to the next closing
/// brace, and that closing brace. Braces inside the match are not part of the
/// token name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UrlTemplate(String);

impl UrlTemplate {
    /// Create a template from its pattern.
    #[must_use]
    pub fn new(pattern: impl Into<String>) -> Self {
        Self(pattern.into())
    }

    /// The unresolved pattern.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Distinct token names in order of first appearance.
    #[must_use]
    pub fn tokens(&self) -> Vec<String> {
        let mut tokens: Vec<String> = Vec::new();
        let mut rest = self.0.as_str();

        while let Some(open) = rest.find('{') {
            let after_open = &rest[open..];
            let Some(close) = after_open.find('}') else {
                break;
            };
            let matched = &after_open[..=close];
            if matched.contains('\n') {
                // No match may span a line; retry from the next brace.
                rest = &after_open[1..];
                continue;
            }

            let name: String = matched.chars().filter(|c| *c != '{' && *c != '}').collect();
            if !tokens.contains(&name) {
                tokens.push(name);
            }
            rest = &after_open[close + 1..];
        }

        tokens
    }

    /// Substitute every token from `params`, removing each consumed key.
    ///
    /// Tokens are handled in order of first appearance. Every literal
    /// `{name}` occurrence is replaced. When a token has no usable value the
    /// call fails at that token: keys for earlier tokens are already gone,
    /// later ones are untouched.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Parameter`] if a token is absent from `params` or its
    /// value is `null`.
    ///
    /// # Example
    ///
    /// ```
    /// use tapir_core::{UrlTemplate, to_params};
    ///
    /// let mut params = to_params(&serde_json::json!({"id": 42, "page": 2})).expect("object");
    /// let url = UrlTemplate::new("/users/{id}/posts").resolve(&mut params).expect("resolve");
    ///
    /// assert_eq!(url, "/users/42/posts");
    /// assert!(!params.contains_key("id"));
    /// assert_eq!(params["page"], 2);
    /// ```
    pub fn resolve(&self, params: &mut Params) -> Result<String> {
        let mut url = self.0.clone();

        for token in self.tokens() {
            let Some(value) = params.get(&token).and_then(path_text) else {
                return Err(Error::parameter(token));
            };
            url = url.replace(&format!("{{{token}}}"), &value);
            params.remove(&token);
            trace!(%token, %value, "substituted path token");
        }

        Ok(url)
    }
}

/// Path tokens render `false` as nothing; queries keep `0`.
fn path_text(value: &Value) -> Option<String> {
    match value {
        Value::Bool(false) => Some(String::new()),
        other => value_to_string(other),
    }
}

impl std::fmt::Display for UrlTemplate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for UrlTemplate {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for UrlTemplate {
    fn from(pattern: &str) -> Self {
        Self::new(pattern)
    }
}

impl From<String> for UrlTemplate {
    fn from(pattern: String) -> Self {
        Self(pattern)
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
    fn tokens_in_first_occurrence_order() {
        let template = UrlTemplate::new("https://{sub}.example.com/{kind}/{id}/{kind}");
        check!(template.tokens() == vec!["sub", "kind", "id"]);
    }

    #[test]
    fn tokens_without_placeholders() {
        check!(UrlTemplate::new("https://example.com/users").tokens().is_empty());
        check!(UrlTemplate::new("https://example.com/{unclosed").tokens().is_empty());
    }

    #[test]
    fn tokens_are_shortest_match() {
        let template = UrlTemplate::new("/{a}{b}/{{c}}");
        check!(template.tokens() == vec!["a", "b", "c"]);
    }

    #[test]
    fn resolve_consumes_path_tokens() {
        let mut p = params(json!({"id": 42, "page": 2}));
        let url = UrlTemplate::new("/users/{id}/posts")
            .resolve(&mut p)
            .expect("resolve");

        check!(url == "/users/42/posts");
        check!(p == params(json!({"page": 2})));
    }

    #[test]
    fn resolve_replaces_every_occurrence() {
        let mut p = params(json!({"name": "acme", "id": "7"}));
        let url = UrlTemplate::new("https://{name}.example.com/{name}/items/{id}")
            .resolve(&mut p)
            .expect("resolve");

        check!(url == "https://acme.example.com/acme/items/7");
        check!(p.is_empty());
    }

    #[test]
    fn resolve_leaves_no_placeholders() {
        let template = UrlTemplate::new("/{a}/{b}/{c}");
        let mut p = params(json!({"a": 1, "b": "two", "c": true, "extra": 0}));
        let url = template.resolve(&mut p).expect("resolve");

        check!(!url.contains('{'));
        check!(!url.contains('}'));
        check!(p.keys().collect::<Vec<_>>() == vec!["extra"]);
    }

    #[test]
    fn resolve_renders_booleans() {
        let mut p = params(json!({"on": true, "off": false}));
        let url = UrlTemplate::new("/flags/{on}/x{off}y")
            .resolve(&mut p)
            .expect("resolve");
        check!(url == "/flags/1/xy");
        check!(p.is_empty());
    }

    #[test]
    fn resolve_substitutes_literally() {
        let mut p = params(json!({"q": "$1.*"}));
        let url = UrlTemplate::new("/search/{q}")
            .resolve(&mut p)
            .expect("resolve");
        check!(url == "/search/$1.*");
    }

    #[test]
    fn resolve_fails_on_missing_token() {
        let mut p = params(json!({"owner": "rust-lang", "other": 1}));
        let result = UrlTemplate::new("/repos/{owner}/{repo}/issues/{number}").resolve(&mut p);

        let_assert!(Err(Error::Parameter(token)) = result);
        check!(token == "repo");
        // Tokens before the missing one are consumed, nothing after it is touched.
        check!(!p.contains_key("owner"));
        check!(p.contains_key("other"));
    }

    #[test]
    fn resolve_treats_null_as_missing() {
        let mut p = params(json!({"id": null}));
        let result = UrlTemplate::new("/users/{id}").resolve(&mut p);
        let_assert!(Err(Error::Parameter(token)) = result);
        check!(token == "id");
    }

    #[test]
    fn template_display() {
        let template = UrlTemplate::from("/users/{id}");
        check!(template.to_string() == "/users/{id}");
        check!(template.as_str() == "/users/{id}");
    }
}
