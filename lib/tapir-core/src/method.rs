//! HTTP methods a call definition may name.

use std::str::FromStr;

use derive_more::Display;

/// HTTP method a call is issued with.
///
/// Definitions spell methods in any case (`"get"`, `"POST"`); parsing is
/// case-insensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, serde::Deserialize)]
#[serde(try_from = "String")]
pub enum Method {
    /// `GET`: cacheable, parameters travel in the query string.
    #[display("GET")]
    Get,
    /// `POST`: JSON body.
    #[display("POST")]
    Post,
    /// `PUT`: JSON body.
    #[display("PUT")]
    Put,
    /// `PATCH`: JSON body.
    #[display("PATCH")]
    Patch,
    /// `DELETE`: never carries a body.
    #[display("DELETE")]
    Delete,
}

impl Method {
    /// Returns `true` if the request for this method carries a JSON body.
    #[must_use]
    pub const fn has_body(&self) -> bool {
        matches!(self, Self::Post | Self::Put | Self::Patch)
    }

    /// Returns `true` if replies to this method may be cached.
    #[must_use]
    pub const fn is_cacheable(&self) -> bool {
        matches!(self, Self::Get)
    }
}

impl FromStr for Method {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "get" => Ok(Self::Get),
            "post" => Ok(Self::Post),
            "put" => Ok(Self::Put),
            "patch" => Ok(Self::Patch),
            "delete" => Ok(Self::Delete),
            _ => Err(crate::Error::InvalidMethod(s.to_string())),
        }
    }
}

impl TryFrom<String> for Method {
    type Error = crate::Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Method> for http::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => Self::GET,
            Method::Post => Self::POST,
            Method::Put => Self::PUT,
            Method::Patch => Self::PATCH,
            Method::Delete => Self::DELETE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_display() {
        assert_eq!(Method::Get.to_string(), "GET");
        assert_eq!(Method::Post.to_string(), "POST");
        assert_eq!(Method::Put.to_string(), "PUT");
        assert_eq!(Method::Patch.to_string(), "PATCH");
        assert_eq!(Method::Delete.to_string(), "DELETE");
    }

    #[test]
    fn method_parse_is_case_insensitive() {
        assert_eq!("get".parse::<Method>().expect("get"), Method::Get);
        assert_eq!("Post".parse::<Method>().expect("post"), Method::Post);
        assert_eq!("PATCH".parse::<Method>().expect("patch"), Method::Patch);
        assert_eq!("delete".parse::<Method>().expect("delete"), Method::Delete);
    }

    #[test]
    fn method_parse_rejects_unknown() {
        let err = "head".parse::<Method>().expect_err("unsupported");
        assert!(matches!(err, crate::Error::InvalidMethod(name) if name == "head"));
    }

    #[test]
    fn method_deserialize() {
        let method: Method = serde_json::from_str(r#""put""#).expect("deserialize");
        assert_eq!(method, Method::Put);
        assert!(serde_json::from_str::<Method>(r#""trace""#).is_err());
    }

    #[test]
    fn method_body_and_cache_rules() {
        assert!(!Method::Get.has_body());
        assert!(Method::Post.has_body());
        assert!(Method::Put.has_body());
        assert!(Method::Patch.has_body());
        assert!(!Method::Delete.has_body());

        assert!(Method::Get.is_cacheable());
        assert!(!Method::Post.is_cacheable());
    }

    #[test]
    fn method_into_http() {
        assert_eq!(http::Method::from(Method::Get), http::Method::GET);
        assert_eq!(http::Method::from(Method::Patch), http::Method::PATCH);
    }
}
