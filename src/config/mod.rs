//! Configuration module for the SendPost client.
//!
//! Holds transport-level settings: base URL, timeout and extra headers.
//! API keys are not part of the client configuration; every call carries
//! its own scoped key (see [`crate::auth`]).

use std::time::Duration;

use crate::errors::{SendPostError, SendPostResult};

/// Default base URL for the SendPost API.
pub const DEFAULT_BASE_URL: &str = "https://api.sendpost.io/api/v1";

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for the SendPost client.
#[derive(Debug, Clone)]
pub struct SendPostConfig {
    /// Base URL for API requests, without a trailing slash.
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
    /// Custom headers to include in requests.
    pub custom_headers: Vec<(String, String)>,
}

impl Default for SendPostConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            custom_headers: Vec::new(),
        }
    }
}

impl SendPostConfig {
    /// Creates a new configuration builder.
    pub fn builder() -> SendPostConfigBuilder {
        SendPostConfigBuilder::new()
    }

    /// Creates a configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `SENDPOST_BASE_URL` (optional): Custom base URL
    /// - `SENDPOST_TIMEOUT` (optional): Request timeout in seconds
    pub fn from_env() -> SendPostResult<Self> {
        let mut builder = SendPostConfigBuilder::new();

        if let Ok(base_url) = std::env::var("SENDPOST_BASE_URL") {
            builder = builder.base_url(base_url);
        }

        if let Ok(timeout_str) = std::env::var("SENDPOST_TIMEOUT") {
            let timeout_secs = timeout_str.parse::<u64>().map_err(|_| {
                SendPostError::Configuration {
                    message: format!("SENDPOST_TIMEOUT must be a number of seconds, got '{}'", timeout_str),
                }
            })?;
            builder = builder.timeout(Duration::from_secs(timeout_secs));
        }

        builder.build()
    }

    /// Returns the full URL for an endpoint path.
    pub fn endpoint_url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

/// Builder for `SendPostConfig`.
#[derive(Default)]
pub struct SendPostConfigBuilder {
    base_url: Option<String>,
    timeout: Option<Duration>,
    custom_headers: Vec<(String, String)>,
}

impl SendPostConfigBuilder {
    /// Creates a new configuration builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the base URL.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Adds a custom header.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.custom_headers.push((name.into(), value.into()));
        self
    }

    /// Builds the configuration.
    pub fn build(self) -> SendPostResult<SendPostConfig> {
        let base_url = self
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(SendPostError::Configuration {
                message: "Base URL must start with http:// or https://".to_string(),
            });
        }
        url::Url::parse(&base_url)?;

        let timeout = self.timeout.unwrap_or(DEFAULT_TIMEOUT);
        if timeout.is_zero() {
            return Err(SendPostError::Configuration {
                message: "Timeout must be greater than zero".to_string(),
            });
        }

        Ok(SendPostConfig {
            base_url,
            timeout,
            custom_headers: self.custom_headers,
        })
    }
}
