//! Client settings and transport configuration.

use std::time::Duration;

use serde_json::Value;

use crate::{Error, Params, Result};

/// Name of the setting holding the result array field for pagination.
pub const DATA_CONTAINER: &str = "data_container";

/// Client settings: the definition's top-level keys merged with
/// caller-supplied overrides.
///
/// Any key is kept and readable through [`Settings::get`]. Recognized keys
/// also get a typed accessor.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Settings {
    values: Params,
    data_container: Option<String>,
}

impl Settings {
    /// Merge definition settings with overrides; overrides win on collision.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if a recognized key has the wrong type.
    pub fn new(definition: Params, overrides: Params) -> Result<Self> {
        let values = crate::merge(overrides, &definition);
        let data_container = match values.get(DATA_CONTAINER) {
            None | Some(Value::Null) => None,
            Some(Value::String(name)) if name.is_empty() => None,
            Some(Value::String(name)) => Some(name.clone()),
            Some(other) => {
                return Err(Error::configuration(format!(
                    "'{DATA_CONTAINER}' must be a string, got {other}"
                )));
            }
        };
        Ok(Self {
            values,
            data_container,
        })
    }

    /// Value of a setting, `None` if absent.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Field of paginated replies that holds the result array.
    #[must_use]
    pub fn data_container(&self) -> Option<&str> {
        self.data_container.as_deref()
    }

    /// All settings.
    #[must_use]
    pub fn values(&self) -> &Params {
        &self.values
    }
}

/// Limits of the hyper transport.
///
/// ```
/// use std::time::Duration;
/// use tapir::TransportConfig;
///
/// let config = TransportConfig::default().request_timeout(Duration::from_secs(5));
/// assert_eq!(config.max_idle_per_host, 32);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransportConfig {
    /// Budget for a whole exchange, body included.
    pub request_timeout: Duration,
    /// Budget for establishing a connection.
    pub connect_timeout: Duration,
    /// Pooled idle connections kept per host.
    pub max_idle_per_host: usize,
    /// How long a pooled connection may stay idle.
    pub idle_timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            max_idle_per_host: 32,
            idle_timeout: Duration::from_secs(90),
        }
    }
}

impl TransportConfig {
    /// With another request timeout.
    #[must_use]
    pub const fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// With another connect timeout.
    #[must_use]
    pub const fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// With another idle pool size.
    #[must_use]
    pub const fn max_idle_per_host(mut self, count: usize) -> Self {
        self.max_idle_per_host = count;
        self
    }

    /// With another idle timeout.
    #[must_use]
    pub const fn idle_timeout(mut self, timeout: Duration) -> Self {
        self.idle_timeout = timeout;
        self
    }
}
