//! HTTP transport implementation using reqwest.

use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, warn};

use super::{HttpResponse, Method, QueryParams};
use crate::config::SendPostConfig;
use crate::errors::{ApiErrorResponse, SendPostError, SendPostResult};
use crate::observability::logging::{redact_sensitive, SENSITIVE_FIELDS};

/// HTTP transport trait for the SendPost client.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Executes an HTTP request against a full URL.
    async fn execute(
        &self,
        method: Method,
        url: String,
        headers: HashMap<String, String>,
        body: Option<Bytes>,
    ) -> SendPostResult<HttpResponse>;

    /// Convenience method for GET requests relative to the base URL.
    async fn get(
        &self,
        path: &str,
        query: QueryParams,
        headers: HashMap<String, String>,
    ) -> SendPostResult<Vec<u8>>;

    /// Convenience method for POST requests relative to the base URL.
    async fn post(
        &self,
        path: &str,
        headers: HashMap<String, String>,
        body: Vec<u8>,
    ) -> SendPostResult<Vec<u8>>;
}

/// Configuration for `ReqwestTransport`.
pub struct TransportConfig {
    /// Base URL for the API.
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl From<&SendPostConfig> for TransportConfig {
    fn from(config: &SendPostConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            timeout: config.timeout,
        }
    }
}

/// Reqwest-based HTTP transport implementation.
pub struct ReqwestTransport {
    client: reqwest::Client,
    base_url: String,
}

impl ReqwestTransport {
    /// Creates a new transport with configuration.
    pub fn with_config(config: TransportConfig) -> SendPostResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .pool_max_idle_per_host(4)
            .build()
            .map_err(|e| SendPostError::Configuration {
                message: format!("Failed to create HTTP client: {}", e),
            })?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Creates a new transport with a custom client.
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Builds a full URL from a path and query parameters.
    fn build_url(&self, path: &str, query: &QueryParams) -> SendPostResult<String> {
        let mut url = url::Url::parse(&format!(
            "{}/{}",
            self.base_url,
            path.trim_start_matches('/')
        ))?;

        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query.iter());
        }

        Ok(url.to_string())
    }

    /// Maps an error status to a SendPost error.
    fn map_http_error(status: u16, body: &Bytes, headers: &HashMap<String, String>) -> SendPostError {
        let message = serde_json::from_slice::<ApiErrorResponse>(body)
            .ok()
            .and_then(ApiErrorResponse::into_message)
            .or_else(|| {
                let text = String::from_utf8_lossy(body).trim().to_string();
                (!text.is_empty()).then_some(text)
            })
            .unwrap_or_else(|| format!("HTTP {} error", status));

        SendPostError::from_status(status, message, Self::extract_retry_after(headers))
    }

    /// Extracts retry-after duration from headers.
    fn extract_retry_after(headers: &HashMap<String, String>) -> Option<Duration> {
        headers
            .get("retry-after")
            .and_then(|v| v.parse::<u64>().ok())
            .map(Duration::from_secs)
    }

    /// Converts response headers to a HashMap with lowercase keys.
    fn extract_headers(headers: &reqwest::header::HeaderMap) -> HashMap<String, String> {
        headers
            .iter()
            .filter_map(|(k, v)| {
                v.to_str()
                    .ok()
                    .map(|val| (k.as_str().to_lowercase(), val.to_string()))
            })
            .collect()
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn execute(
        &self,
        method: Method,
        url: String,
        headers: HashMap<String, String>,
        body: Option<Bytes>,
    ) -> SendPostResult<HttpResponse> {
        debug!(%method, url = %url, "Outgoing request");

        let mut request = self.client.request(method.into(), &url);

        for (key, value) in &headers {
            request = request.header(key, value);
        }

        if let Some(body) = body {
            request = request.body(body);
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        let response_headers = Self::extract_headers(response.headers());
        let body = response.bytes().await?;

        if !(200..300).contains(&status) {
            warn!(
                %method,
                status,
                body = %redact_sensitive(&String::from_utf8_lossy(&body), SENSITIVE_FIELDS),
                "Request failed"
            );
            return Err(Self::map_http_error(status, &body, &response_headers));
        }

        debug!(%method, status, bytes = body.len(), "Request completed");

        Ok(HttpResponse {
            status,
            headers: response_headers,
            body,
        })
    }

    async fn get(
        &self,
        path: &str,
        query: QueryParams,
        headers: HashMap<String, String>,
    ) -> SendPostResult<Vec<u8>> {
        let url = self.build_url(path, &query)?;
        let response = self.execute(Method::Get, url, headers, None).await?;
        Ok(response.body.to_vec())
    }

    async fn post(
        &self,
        path: &str,
        headers: HashMap<String, String>,
        body: Vec<u8>,
    ) -> SendPostResult<Vec<u8>> {
        let url = self.build_url(path, &QueryParams::new())?;
        let response = self
            .execute(Method::Post, url, headers, Some(Bytes::from(body)))
            .await?;
        Ok(response.body.to_vec())
    }
}
