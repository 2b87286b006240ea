//! Client configuration: backend location and transport limits

use crate::{Error, Result};
use std::time::Duration;

/// Backend used when no override is configured
pub const DEFAULT_API_URL: &str = "https://sweeperkeeper.repl.co";

/// Per-request timeout applied by the transport
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(5000);

/// Environment variable that overrides the backend base URL
pub const API_URL_ENV: &str = "SWEEPERKEEPER_API_URL";

/// Settings for the HTTP client adapter
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Base URL every endpoint path is appended to (no trailing slash)
    pub base_url: String,
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Default configuration, with the base URL taken from
    /// `SWEEPERKEEPER_API_URL` when it is set and non-empty
    pub fn from_env() -> Self {
        match std::env::var(API_URL_ENV) {
            Ok(url) if !url.trim().is_empty() => Self::new(url.trim()),
            _ => Self::default(),
        }
    }

    /// Check the base URL is an absolute http(s) URL and the timeout is usable
    pub fn validate(&self) -> Result<()> {
        let url = reqwest::Url::parse(&self.base_url)
            .map_err(|e| Error::ConfigError(format!("invalid base URL '{}': {}", self.base_url, e)))?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(Error::ConfigError(format!(
                "base URL must use http or https, got '{}'",
                url.scheme()
            )));
        }

        if self.timeout.is_zero() {
            return Err(Error::ConfigError("timeout must be greater than zero".to_string()));
        }

        Ok(())
    }

    /// Absolute URL for an endpoint path such as `/api/accounts`
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}
