//! Call definitions.

use serde::Deserialize;

use crate::{Method, Params, UrlTemplate};

/// One named operation of an API: method, URL template, and the parameters
/// that travel in the request body.
///
/// Deserializes from the definition schema:
///
/// ```json
/// { "method": "post", "url": "https://api.example.com/users/{id}/notes", "data": ["title", "body"] }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CallDefinition {
    method: Method,
    #[serde(deserialize_with = "deserialize_template")]
    url: UrlTemplate,
    #[serde(default)]
    data: Vec<String>,
}

fn deserialize_template<'de, D>(deserializer: D) -> Result<UrlTemplate, D::Error>
where
    D: serde::Deserializer<'de>,
{
    String::deserialize(deserializer).map(UrlTemplate::from)
}

impl CallDefinition {
    /// Create a call definition.
    #[must_use]
    pub fn new(method: Method, url: impl Into<UrlTemplate>) -> Self {
        Self {
            method,
            url: url.into(),
            data: Vec::new(),
        }
    }

    /// Restrict the body to the given parameter names.
    #[must_use]
    pub fn with_data<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.data = names.into_iter().map(Into::into).collect();
        self
    }

    /// HTTP method.
    #[must_use]
    pub const fn method(&self) -> Method {
        self.method
    }

    /// URL template.
    #[must_use]
    pub const fn url(&self) -> &UrlTemplate {
        &self.url
    }

    /// Parameter names reserved for the body, in declaration order.
    #[must_use]
    pub fn data(&self) -> &[String] {
        &self.data
    }

    /// Parameters that go in the request body.
    ///
    /// With a body list, only the listed keys present in `params`. Without
    /// one, every parameter.
    #[must_use]
    pub fn data_params(&self, params: &Params) -> Params {
        if self.data.is_empty() {
            return params.clone();
        }
        params
            .iter()
            .filter(|(key, _)| self.data.contains(key))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }

    /// Parameters that go in the query string.
    ///
    /// With a body list, everything not on it. Without one, nothing: an
    /// unrestricted call sends all its parameters as data.
    #[must_use]
    pub fn query_params(&self, params: &Params) -> Params {
        if self.data.is_empty() {
            return Params::new();
        }
        params
            .iter()
            .filter(|(key, _)| !self.data.contains(key))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use assert2::check;
    use serde_json::json;

    use super::*;
    use crate::to_params;

    fn params(value: serde_json::Value) -> Params {
        to_params(&value).expect("object")
    }

    #[test]
    fn deserialize_full_definition() {
        let call: CallDefinition = serde_json::from_value(json!({
            "method": "POST",
            "url": "https://api.example.com/users/{id}/notes",
            "data": ["title", "body"]
        }))
        .expect("deserialize");

        check!(call.method() == Method::Post);
        check!(call.url().as_str() == "https://api.example.com/users/{id}/notes");
        check!(call.data() == ["title", "body"]);
    }

    #[test]
    fn deserialize_without_data() {
        let call: CallDefinition =
            serde_json::from_value(json!({"method": "get", "url": "/users"})).expect("deserialize");
        check!(call.method() == Method::Get);
        check!(call.data().is_empty());
    }

    #[test]
    fn deserialize_rejects_bad_method() {
        let result =
            serde_json::from_value::<CallDefinition>(json!({"method": "fetch", "url": "/users"}));
        check!(result.is_err());
    }

    #[test]
    fn partition_with_body_list() {
        let call = CallDefinition::new(Method::Post, "/posts").with_data(["title", "body"]);
        let all = params(json!({"title": "x", "body": "y", "page": 1}));

        check!(call.data_params(&all) == params(json!({"title": "x", "body": "y"})));
        check!(call.query_params(&all) == params(json!({"page": 1})));
    }

    #[test]
    fn partition_is_disjoint_and_complete() {
        let call = CallDefinition::new(Method::Put, "/items").with_data(["name", "missing"]);
        let all = params(json!({"name": "n", "sort": "asc", "limit": 10}));

        let data = call.data_params(&all);
        let query = call.query_params(&all);

        check!(data.keys().all(|key| !query.contains_key(key)));
        check!(data.len() + query.len() == all.len());
        check!(all.keys().all(|key| data.contains_key(key) || query.contains_key(key)));
    }

    #[test]
    fn partition_without_body_list() {
        let call = CallDefinition::new(Method::Get, "/search");
        let all = params(json!({"q": "rust", "page": 3}));

        check!(call.data_params(&all) == all);
        check!(call.query_params(&all).is_empty());
    }
}
