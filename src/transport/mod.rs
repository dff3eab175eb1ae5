//! HTTP transport module for the SendPost client.
//!
//! The transport only moves bytes. Services build paths and bodies,
//! and decode responses; the transport maps non-2xx statuses to
//! [`SendPostError`](crate::errors::SendPostError).

mod http_transport;

pub use http_transport::{HttpTransport, ReqwestTransport, TransportConfig};

use bytes::Bytes;
use std::collections::HashMap;

/// HTTP method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// GET request.
    Get,
    /// POST request.
    Post,
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Method::Get => write!(f, "GET"),
            Method::Post => write!(f, "POST"),
        }
    }
}

/// HTTP response.
#[derive(Debug)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response headers.
    pub headers: HashMap<String, String>,
    /// Response body.
    pub body: Bytes,
}

/// Query string parameters.
pub type QueryParams = Vec<(String, String)>;
