//! API definitions.
//!
//! A definition is a JSON document with a top-level `apis` object (API name
//! to call name to call definition) and any number of other keys, which are
//! client settings:
//!
//! ```json
//! {
//!   "data_container": "results",
//!   "apis": {
//!     "users": {
//!       "get":    { "method": "get",  "url": "https://api.example.com/users/{id}" },
//!       "create": { "method": "post", "url": "https://api.example.com/users", "data": ["name"] }
//!     }
//!   }
//! }
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde_json::Value;
use tracing::debug;

use crate::{CallDefinition, Error, Params, Result};

/// Calls of one API, keyed by call name.
pub type ApiCalls = BTreeMap<String, CallDefinition>;

/// A parsed definition: APIs plus free-form settings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Definition {
    /// APIs keyed by name.
    pub apis: BTreeMap<String, ApiCalls>,
    /// Every other top-level key.
    pub settings: Params,
}

impl Definition {
    /// Parse a definition from JSON bytes.
    ///
    /// Errors carry the JSON path of the offending field.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if the bytes are not a valid definition.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let value = serde_json::from_slice(bytes)
            .map_err(|e| Error::configuration(format!("could not parse JSON: {e}")))?;
        Self::from_value(value)
    }

    /// Parse a definition from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if the text is not a valid definition.
    pub fn from_json(text: &str) -> Result<Self> {
        Self::from_slice(text.as_bytes())
    }

    /// Build a definition from an already-parsed JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if the value is not a valid definition.
    pub fn from_value(value: Value) -> Result<Self> {
        let Value::Object(mut settings) = value else {
            return Err(Error::configuration("definition must be a JSON object"));
        };
        let Some(apis) = settings.remove("apis") else {
            return Err(Error::configuration("missing field `apis`"));
        };

        let apis = serde_path_to_error::deserialize(apis).map_err(|e| {
            Error::configuration(format!("at 'apis.{}': {}", e.path(), e.inner()))
        })?;

        Ok(Self { apis, settings })
    }

    /// Read and parse a definition file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read, or
    /// [`Error::Configuration`] if it is not a valid definition.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        let definition = Self::from_slice(&bytes).map_err(|err| match err {
            Error::Configuration(message) => {
                Error::configuration(format!("{}: {message}", path.display()))
            }
            other => other,
        })?;
        debug!(
            path = %path.display(),
            apis = definition.apis.len(),
            "loaded API definition"
        );
        Ok(definition)
    }

    /// Load the definition called `name` from `<dir>/<name>.json`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if no such file exists, or the errors
    /// of [`Definition::from_file`].
    pub fn from_name(dir: impl AsRef<Path>, name: &str) -> Result<Self> {
        let path = dir.as_ref().join(format!("{name}.json"));
        if !path.is_file() {
            return Err(Error::configuration(format!(
                "no definition named '{name}' ({} not found)",
                path.display()
            )));
        }
        Self::from_file(path)
    }

    /// Calls of the named API.
    #[must_use]
    pub fn api(&self, name: &str) -> Option<&ApiCalls> {
        self.apis.get(name)
    }
}
