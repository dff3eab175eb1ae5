//! Logging configuration and utilities.
//!
//! Structured logging goes through the `tracing` crate. The binary calls
//! [`LoggingConfig::init`] once at startup; library code only emits events.

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Log level enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Trace-level logging (most verbose)
    Trace,
    /// Debug-level logging
    Debug,
    /// Info-level logging
    Info,
    /// Warning-level logging
    Warn,
    /// Error-level logging (least verbose)
    Error,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => LevelFilter::TRACE,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Error => LevelFilter::ERROR,
        }
    }
}

impl std::str::FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(format!("Unknown log level: {}", s)),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable format with colors (for development)
    Pretty,
    /// JSON format (for structured logging in production)
    Json,
    /// Compact single-line format
    Compact,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            "compact" => Ok(LogFormat::Compact),
            _ => Err(format!("Unknown log format: {}", s)),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// The minimum log level to capture
    pub level: LogLevel,
    /// The output format for log messages
    pub format: LogFormat,
    /// Whether to include the module target in log output
    pub include_target: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            format: LogFormat::Compact,
            include_target: false,
        }
    }
}

impl LoggingConfig {
    /// Creates a new logging configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads `SENDPOST_LOG_LEVEL` and `SENDPOST_LOG_FORMAT`, keeping defaults
    /// for unset or unrecognised values.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(level) = std::env::var("SENDPOST_LOG_LEVEL")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            config.level = level;
        }
        if let Some(format) = std::env::var("SENDPOST_LOG_FORMAT")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            config.format = format;
        }

        config
    }

    /// Sets the log level.
    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    /// Sets the log format.
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Sets whether to include the module target.
    pub fn with_target(mut self, include: bool) -> Self {
        self.include_target = include;
        self
    }

    /// Initialize logging with this configuration.
    ///
    /// `RUST_LOG` directives take precedence over the configured level.
    /// Events are written to stderr; stdout is left to the run report.
    ///
    /// # Errors
    ///
    /// Returns an error if a global subscriber has already been installed.
    pub fn init(self) -> Result<(), Box<dyn std::error::Error>> {
        let filter = EnvFilter::builder()
            .with_default_directive(LevelFilter::from(self.level).into())
            .from_env_lossy();

        match self.format {
            LogFormat::Pretty => {
                tracing_subscriber::registry()
                    .with(filter)
                    .with(
                        fmt::layer()
                            .pretty()
                            .with_target(self.include_target)
                            .with_writer(std::io::stderr),
                    )
                    .try_init()?;
            }
            LogFormat::Json => {
                tracing_subscriber::registry()
                    .with(filter)
                    .with(fmt::layer().json().with_writer(std::io::stderr))
                    .try_init()?;
            }
            LogFormat::Compact => {
                tracing_subscriber::registry()
                    .with(filter)
                    .with(
                        fmt::layer()
                            .compact()
                            .with_target(self.include_target)
                            .with_writer(std::io::stderr),
                    )
                    .try_init()?;
            }
        }

        Ok(())
    }
}

/// Common sensitive field names to redact.
pub const SENSITIVE_FIELDS: &[&str] = &[
    "apiKey",
    "api_key",
    "X-Account-ApiKey",
    "X-SubAccount-ApiKey",
    "password",
    "secret",
    "token",
];

/// Redacts the values of sensitive JSON string fields.
pub fn redact_sensitive(input: &str, fields: &[&str]) -> String {
    let mut result = input.to_string();

    for field in fields {
        let pattern = format!(r#""({})"\s*:\s*"[^"]*""#, regex::escape(field));
        if let Ok(re) = regex::Regex::new(&pattern) {
            result = re.replace_all(&result, r#""$1":"[REDACTED]""#).to_string();
        }
    }

    result
}

/// Masks all but the last four characters of a secret for display.
pub fn mask_secret(secret: &str) -> String {
    let visible: String = secret
        .chars()
        .rev()
        .take(4)
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();

    if secret.chars().count() <= 4 {
        "****".to_string()
    } else {
        format!("****{}", visible)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_log_level_from_str() {
        assert_eq!("debug".parse::<LogLevel>().unwrap(), LogLevel::Debug);
        assert_eq!("INFO".parse::<LogLevel>().unwrap(), LogLevel::Info);
        assert_eq!("warning".parse::<LogLevel>().unwrap(), LogLevel::Warn);
        assert!("loud".parse::<LogLevel>().is_err());
    }

    #[test]
    fn test_log_format_from_str() {
        assert_eq!("JSON".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!("pretty".parse::<LogFormat>().unwrap(), LogFormat::Pretty);
        assert!("xml".parse::<LogFormat>().is_err());
    }

    #[test]
    fn test_config_builder() {
        let config = LoggingConfig::new()
            .with_level(LogLevel::Debug)
            .with_format(LogFormat::Json)
            .with_target(true);

        assert_eq!(config.level, LogLevel::Debug);
        assert_eq!(config.format, LogFormat::Json);
        assert!(config.include_target);
    }

    #[test]
    fn test_redact_sensitive() {
        let body = r#"{"id":7,"apiKey": "abc123","name":"ESP Client"}"#;
        let redacted = redact_sensitive(body, SENSITIVE_FIELDS);

        assert_eq!(redacted, r#"{"id":7,"apiKey":"[REDACTED]","name":"ESP Client"}"#);
    }

    #[test]
    fn test_redact_leaves_other_fields() {
        let body = r#"{"message":"Invalid domain name"}"#;
        assert_eq!(redact_sensitive(body, SENSITIVE_FIELDS), body);
    }

    #[test]
    fn test_mask_secret() {
        assert_eq!(mask_secret("sk_live_12345678"), "****5678");
        assert_eq!(mask_secret("abc"), "****");
    }
}
