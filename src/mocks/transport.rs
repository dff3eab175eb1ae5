//! Mock transport for testing.

use async_trait::async_trait;
use bytes::Bytes;
use parking_lot::Mutex;
use std::collections::{HashMap, VecDeque};

use crate::errors::{ApiErrorResponse, SendPostError, SendPostResult};
use crate::transport::{HttpResponse, HttpTransport, Method, QueryParams};

/// A recorded request for verification.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// HTTP method.
    pub method: Method,
    /// Request path (or full URL for `execute`).
    pub url: String,
    /// Query parameters.
    pub query: QueryParams,
    /// Request headers.
    pub headers: HashMap<String, String>,
    /// Request body.
    pub body: Option<Bytes>,
}

impl RecordedRequest {
    /// Parses the request body as JSON.
    pub fn body_json(&self) -> Option<serde_json::Value> {
        self.body
            .as_ref()
            .and_then(|body| serde_json::from_slice(body).ok())
    }
}

/// A mock response to return.
#[derive(Debug, Clone)]
pub struct MockResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response headers.
    pub headers: HashMap<String, String>,
    /// Response body.
    pub body: Bytes,
}

impl MockResponse {
    /// Creates a successful JSON response.
    pub fn json(body: serde_json::Value) -> Self {
        let mut headers = HashMap::new();
        headers.insert("content-type".to_string(), "application/json".to_string());
        Self {
            status: 200,
            headers,
            body: Bytes::from(body.to_string()),
        }
    }

    /// Creates a response with a raw body.
    pub fn raw(status: u16, body: &str) -> Self {
        Self {
            status,
            headers: HashMap::new(),
            body: Bytes::from(body.to_string()),
        }
    }

    /// Creates an error response in the API's error format.
    pub fn error(status: u16, message: &str) -> Self {
        Self::raw(status, &serde_json::json!({ "message": message }).to_string())
    }
}

/// Mock transport for testing.
pub struct MockTransport {
    responses: Mutex<VecDeque<MockResponse>>,
    requests: Mutex<Vec<RecordedRequest>>,
    default_response: Option<MockResponse>,
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl MockTransport {
    /// Creates a new mock transport.
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
            default_response: None,
        }
    }

    /// Adds a response to the queue.
    pub fn enqueue_response(&self, response: MockResponse) {
        self.responses.lock().push_back(response);
    }

    /// Sets a default response for when the queue is empty.
    #[must_use]
    pub fn with_default_response(mut self, response: MockResponse) -> Self {
        self.default_response = Some(response);
        self
    }

    /// Gets all recorded requests.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().clone()
    }

    /// Gets the last recorded request.
    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.requests.lock().last().cloned()
    }

    /// Returns the number of requests made.
    pub fn request_count(&self) -> usize {
        self.requests.lock().len()
    }

    fn record(&self, request: RecordedRequest) {
        self.requests.lock().push(request);
    }

    fn next_response(&self) -> SendPostResult<HttpResponse> {
        let response = self
            .responses
            .lock()
            .pop_front()
            .or_else(|| self.default_response.clone())
            .unwrap_or_else(|| MockResponse::error(500, "No mock response configured"));

        if response.status >= 400 {
            let message = serde_json::from_slice::<ApiErrorResponse>(&response.body)
                .ok()
                .and_then(ApiErrorResponse::into_message)
                .unwrap_or_else(|| String::from_utf8_lossy(&response.body).to_string());
            return Err(SendPostError::from_status(response.status, message, None));
        }

        Ok(HttpResponse {
            status: response.status,
            headers: response.headers,
            body: response.body,
        })
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn execute(
        &self,
        method: Method,
        url: String,
        headers: HashMap<String, String>,
        body: Option<Bytes>,
    ) -> SendPostResult<HttpResponse> {
        self.record(RecordedRequest {
            method,
            url,
            query: QueryParams::new(),
            headers,
            body,
        });
        self.next_response()
    }

    async fn get(
        &self,
        path: &str,
        query: QueryParams,
        headers: HashMap<String, String>,
    ) -> SendPostResult<Vec<u8>> {
        self.record(RecordedRequest {
            method: Method::Get,
            url: path.to_string(),
            query,
            headers,
            body: None,
        });
        Ok(self.next_response()?.body.to_vec())
    }

    async fn post(
        &self,
        path: &str,
        headers: HashMap<String, String>,
        body: Vec<u8>,
    ) -> SendPostResult<Vec<u8>> {
        self.record(RecordedRequest {
            method: Method::Post,
            url: path.to_string(),
            query: QueryParams::new(),
            headers,
            body: Some(Bytes::from(body)),
        });
        Ok(self.next_response()?.body.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_transport_records_requests() {
        let transport = MockTransport::new();
        transport.enqueue_response(MockResponse::json(serde_json::json!({})));

        let _ = transport
            .post("/account/webhook", HashMap::new(), b"{}".to_vec())
            .await;

        assert_eq!(transport.request_count(), 1);
        let request = transport.last_request().unwrap();
        assert_eq!(request.url, "/account/webhook");
        assert_eq!(request.method, Method::Post);
    }

    #[tokio::test]
    async fn test_unconfigured_response_is_server_error() {
        let transport = MockTransport::new();

        let result = transport.get("/account/ip/", QueryParams::new(), HashMap::new()).await;

        match result {
            Err(SendPostError::Server { status, message }) => {
                assert_eq!(status, 500);
                assert_eq!(message, "No mock response configured");
            }
            other => panic!("Expected Server error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_default_response() {
        let transport = MockTransport::new()
            .with_default_response(MockResponse::json(serde_json::json!([])));

        let first = transport.get("/a", QueryParams::new(), HashMap::new()).await.unwrap();
        let second = transport.get("/b", QueryParams::new(), HashMap::new()).await.unwrap();

        assert_eq!(first, b"[]");
        assert_eq!(second, b"[]");
    }
}
