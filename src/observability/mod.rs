//! Observability module: logging setup and secret redaction.

pub mod logging;

pub use logging::{mask_secret, redact_sensitive, LogFormat, LogLevel, LoggingConfig};
