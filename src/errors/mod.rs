//! Error types for the SendPost client.
//!
//! Every failure the client can surface is one variant of [`SendPostError`].
//! Remote failures keep the HTTP status and the message the API returned so
//! callers can report them verbatim.

use std::time::Duration;
use thiserror::Error;

/// Result type alias for SendPost operations.
pub type SendPostResult<T> = Result<T, SendPostError>;

/// Error type for SendPost client operations.
#[derive(Debug, Error)]
pub enum SendPostError {
    /// Configuration error (missing key, malformed URL, etc.)
    #[error("Configuration error: {message}")]
    Configuration {
        /// Error message describing the configuration issue.
        message: String,
    },

    /// The API key was rejected.
    #[error("Authentication failed: {message}")]
    Authentication {
        /// Error message from the API.
        message: String,
    },

    /// The API key is valid but not allowed to perform the operation.
    #[error("Permission denied: {message}")]
    Permission {
        /// Error message from the API.
        message: String,
    },

    /// Malformed request.
    #[error("Bad request: {message}")]
    BadRequest {
        /// Error message from the API.
        message: String,
    },

    /// Resource not found.
    #[error("Not found: {message}")]
    NotFound {
        /// Error message from the API.
        message: String,
    },

    /// The resource already exists or is in a conflicting state.
    #[error("Conflict: {message}")]
    Conflict {
        /// Error message from the API.
        message: String,
    },

    /// Request validation failed on the server.
    #[error("Validation error: {message}")]
    Validation {
        /// Error message from the API.
        message: String,
    },

    /// Rate limit exceeded.
    #[error("Rate limit exceeded: {message}")]
    RateLimit {
        /// Error message from the API.
        message: String,
        /// Duration the server asked us to wait.
        retry_after: Option<Duration>,
    },

    /// Server-side error (5xx).
    #[error("Server error (HTTP {status}): {message}")]
    Server {
        /// HTTP status code.
        status: u16,
        /// Error message from the API.
        message: String,
    },

    /// Request timeout.
    #[error("Request timeout: {message}")]
    Timeout {
        /// Error message.
        message: String,
    },

    /// Network/connection error.
    #[error("Connection error: {message}")]
    Connection {
        /// Error message.
        message: String,
    },

    /// Request body could not be encoded.
    #[error("Serialization error: {message}")]
    Serialization {
        /// Error message.
        message: String,
    },

    /// Response body could not be decoded.
    #[error("Deserialization error: {message}")]
    Deserialization {
        /// Error message.
        message: String,
        /// Raw response body.
        body: String,
    },

    /// Any other HTTP failure.
    #[error("Unknown error (HTTP {status}): {message}")]
    Unknown {
        /// HTTP status code, 0 when no response was received.
        status: u16,
        /// Error message.
        message: String,
    },
}

impl SendPostError {
    /// Returns the HTTP status code associated with this error, if any.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            SendPostError::Authentication { .. } => Some(401),
            SendPostError::Permission { .. } => Some(403),
            SendPostError::BadRequest { .. } => Some(400),
            SendPostError::NotFound { .. } => Some(404),
            SendPostError::Conflict { .. } => Some(409),
            SendPostError::Validation { .. } => Some(422),
            SendPostError::RateLimit { .. } => Some(429),
            SendPostError::Server { status, .. } => Some(*status),
            SendPostError::Unknown { status, .. } if *status != 0 => Some(*status),
            _ => None,
        }
    }

    /// Returns the bare message without the variant prefix.
    pub fn message(&self) -> &str {
        match self {
            SendPostError::Configuration { message }
            | SendPostError::Authentication { message }
            | SendPostError::Permission { message }
            | SendPostError::BadRequest { message }
            | SendPostError::NotFound { message }
            | SendPostError::Conflict { message }
            | SendPostError::Validation { message }
            | SendPostError::RateLimit { message, .. }
            | SendPostError::Server { message, .. }
            | SendPostError::Timeout { message }
            | SendPostError::Connection { message }
            | SendPostError::Serialization { message }
            | SendPostError::Deserialization { message, .. }
            | SendPostError::Unknown { message, .. } => message,
        }
    }

    /// Returns true if the request never produced an HTTP response.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            SendPostError::Timeout { .. } | SendPostError::Connection { .. }
        )
    }

    /// Maps a non-success HTTP status and the API message to an error.
    pub fn from_status(status: u16, message: String, retry_after: Option<Duration>) -> Self {
        match status {
            400 => SendPostError::BadRequest { message },
            401 => SendPostError::Authentication { message },
            403 => SendPostError::Permission { message },
            404 => SendPostError::NotFound { message },
            409 => SendPostError::Conflict { message },
            422 => SendPostError::Validation { message },
            429 => SendPostError::RateLimit {
                message,
                retry_after,
            },
            500..=599 => SendPostError::Server { status, message },
            _ => SendPostError::Unknown { status, message },
        }
    }

    /// Creates a deserialization error from a decode failure and the raw body.
    pub fn deserialization(err: &serde_json::Error, body: &[u8]) -> Self {
        SendPostError::Deserialization {
            message: err.to_string(),
            body: String::from_utf8_lossy(body).to_string(),
        }
    }
}

/// Error body returned by the SendPost API.
///
/// The API is not consistent about the key it uses, so every known
/// spelling is accepted.
#[derive(Debug, Default, serde::Deserialize)]
pub struct ApiErrorResponse {
    /// Error message.
    #[serde(default)]
    pub message: Option<String>,
    /// Alternative error message field.
    #[serde(default)]
    pub error: Option<String>,
    /// Error code reported by the API.
    #[serde(default, rename = "errorCode")]
    pub error_code: Option<i64>,
}

impl ApiErrorResponse {
    /// Returns the most specific message available.
    pub fn into_message(self) -> Option<String> {
        self.message.or(self.error).filter(|m| !m.is_empty())
    }
}

impl From<reqwest::Error> for SendPostError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            SendPostError::Timeout {
                message: err.to_string(),
            }
        } else if err.is_connect() {
            SendPostError::Connection {
                message: err.to_string(),
            }
        } else {
            SendPostError::Unknown {
                status: err.status().map_or(0, |s| s.as_u16()),
                message: err.to_string(),
            }
        }
    }
}

impl From<serde_json::Error> for SendPostError {
    fn from(err: serde_json::Error) -> Self {
        SendPostError::Serialization {
            message: err.to_string(),
        }
    }
}

impl From<url::ParseError> for SendPostError {
    fn from(err: url::ParseError) -> Self {
        SendPostError::Configuration {
            message: format!("Invalid URL: {}", err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(400, Some(400) ; "bad request")]
    #[test_case(401, Some(401) ; "authentication")]
    #[test_case(403, Some(403) ; "permission")]
    #[test_case(404, Some(404) ; "not found")]
    #[test_case(409, Some(409) ; "conflict")]
    #[test_case(422, Some(422) ; "validation")]
    #[test_case(503, Some(503) ; "server")]
    #[test_case(418, Some(418) ; "unknown")]
    fn test_status_round_trips(status: u16, expected: Option<u16>) {
        let error = SendPostError::from_status(status, "boom".to_string(), None);
        assert_eq!(error.status_code(), expected);
        assert_eq!(error.message(), "boom");
    }

    #[test]
    fn test_rate_limit_keeps_retry_after() {
        let error =
            SendPostError::from_status(429, "slow down".to_string(), Some(Duration::from_secs(5)));
        match error {
            SendPostError::RateLimit { retry_after, .. } => {
                assert_eq!(retry_after, Some(Duration::from_secs(5)));
            }
            other => panic!("Expected RateLimit, got {:?}", other),
        }
    }

    #[test]
    fn test_transport_errors_have_no_status() {
        let error = SendPostError::Timeout {
            message: "timed out".to_string(),
        };
        assert!(error.is_transport());
        assert_eq!(error.status_code(), None);

        let error = SendPostError::Unknown {
            status: 0,
            message: "no response".to_string(),
        };
        assert!(!error.is_transport());
        assert_eq!(error.status_code(), None);
    }

    #[test]
    fn test_api_error_message_fallback() {
        let body: ApiErrorResponse = serde_json::from_str(r#"{"error":"Invalid domain"}"#).unwrap();
        assert_eq!(body.into_message(), Some("Invalid domain".to_string()));

        let body: ApiErrorResponse = serde_json::from_str(r#"{"message":""}"#).unwrap();
        assert_eq!(body.into_message(), None);
    }
}
