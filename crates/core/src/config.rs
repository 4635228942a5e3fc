//! Client runtime configuration.
//!
//! Configuration is resolved once at process startup and passed into the backend client.
//! Functions here take already-read values rather than touching the process environment,
//! so tests can exercise them without setting variables.

use crate::constants::DEFAULT_API_URL;
use crate::{QueueError, QueueResult};
use std::time::Duration;

/// Backend connection settings resolved at startup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    api_base_url: String,
    request_timeout: Option<Duration>,
}

impl ClientConfig {
    /// Create a new `ClientConfig`.
    ///
    /// The base URL must be an absolute `http` or `https` URL. A trailing `/` is dropped so
    /// paths can be appended directly.
    ///
    /// # Errors
    ///
    /// Returns [`QueueError::InvalidInput`] for a blank or non-HTTP URL, or a zero timeout.
    pub fn new(api_base_url: &str, request_timeout: Option<Duration>) -> QueueResult<Self> {
        let trimmed = api_base_url.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            return Err(QueueError::InvalidInput(
                "backend URL cannot be empty".into(),
            ));
        }
        if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
            return Err(QueueError::InvalidInput(format!(
                "backend URL must start with http:// or https://: {trimmed}"
            )));
        }
        if request_timeout.is_some_and(|t| t.is_zero()) {
            return Err(QueueError::InvalidInput(
                "request timeout must be greater than zero".into(),
            ));
        }

        Ok(Self {
            api_base_url: trimmed.to_string(),
            request_timeout,
        })
    }

    pub fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            request_timeout: None,
        }
    }
}

/// Build a `ClientConfig` from optional raw values, typically read from the environment.
///
/// Blank values are treated as unset. An unset URL falls back to
/// [`DEFAULT_API_URL`]; an unset timeout means requests never time out.
pub fn client_config_from_env_values(
    api_url: Option<String>,
    timeout_secs: Option<String>,
) -> QueueResult<ClientConfig> {
    let api_url = api_url
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());
    let timeout = timeout_secs
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(|v| {
            v.parse::<u64>().map(Duration::from_secs).map_err(|_| {
                QueueError::InvalidInput(format!("request timeout is not a whole number: {v}"))
            })
        })
        .transpose()?;

    ClientConfig::new(api_url.as_deref().unwrap_or(DEFAULT_API_URL), timeout)
}
