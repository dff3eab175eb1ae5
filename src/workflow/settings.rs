//! Workflow settings and credential loading.

use crate::auth::Credentials;
use crate::errors::{SendPostError, SendPostResult};

/// Environment variable holding the account API key.
pub const ACCOUNT_API_KEY_ENV: &str = "SENDPOST_ACCOUNT_API_KEY";
/// Environment variable holding the sub-account API key.
pub const SUB_ACCOUNT_API_KEY_ENV: &str = "SENDPOST_SUB_ACCOUNT_API_KEY";

/// Stand-in used when the account key is not configured.
pub const ACCOUNT_API_KEY_PLACEHOLDER: &str = "YOUR_ACCOUNT_API_KEY_HERE";
/// Stand-in used when the sub-account key is not configured.
pub const SUB_ACCOUNT_API_KEY_PLACEHOLDER: &str = "YOUR_SUB_ACCOUNT_API_KEY_HERE";

const DEFAULT_FROM_EMAIL: &str = "sender@yourdomain.com";
const DEFAULT_TO_EMAIL: &str = "recipient@example.com";
const DEFAULT_DOMAIN: &str = "yourdomain.com";
const DEFAULT_WEBHOOK_URL: &str = "https://your-webhook-endpoint.com/webhook";

/// Addresses and endpoints the workflow uses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowSettings {
    /// Sender address.
    pub from_email: String,
    /// Recipient address.
    pub to_email: String,
    /// Sending domain to register.
    pub domain: String,
    /// URL the webhook delivers events to.
    pub webhook_url: String,
}

impl Default for WorkflowSettings {
    fn default() -> Self {
        Self {
            from_email: DEFAULT_FROM_EMAIL.to_string(),
            to_email: DEFAULT_TO_EMAIL.to_string(),
            domain: DEFAULT_DOMAIN.to_string(),
            webhook_url: DEFAULT_WEBHOOK_URL.to_string(),
        }
    }
}

impl WorkflowSettings {
    /// Loads settings from the environment.
    ///
    /// # Environment Variables
    ///
    /// - `SENDPOST_FROM_EMAIL`
    /// - `SENDPOST_TO_EMAIL`
    /// - `SENDPOST_DOMAIN`
    /// - `SENDPOST_WEBHOOK_URL`
    ///
    /// Unset or empty variables fall back to the defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Loads settings through a variable lookup function.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |name: &str, default: &str| {
            lookup(name)
                .filter(|value| !value.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        Self {
            from_email: get("SENDPOST_FROM_EMAIL", DEFAULT_FROM_EMAIL),
            to_email: get("SENDPOST_TO_EMAIL", DEFAULT_TO_EMAIL),
            domain: get("SENDPOST_DOMAIN", DEFAULT_DOMAIN),
            webhook_url: get("SENDPOST_WEBHOOK_URL", DEFAULT_WEBHOOK_URL),
        }
    }

    /// Checks that every value is structurally usable.
    pub fn validate(&self) -> SendPostResult<()> {
        for (name, value) in [
            ("From address", &self.from_email),
            ("To address", &self.to_email),
            ("Domain", &self.domain),
            ("Webhook URL", &self.webhook_url),
        ] {
            if value.trim().is_empty() {
                return Err(SendPostError::Configuration {
                    message: format!("{} cannot be empty", name),
                });
            }
        }

        let url = url::Url::parse(&self.webhook_url).map_err(|e| SendPostError::Configuration {
            message: format!("Webhook URL '{}' is not a valid URL: {}", self.webhook_url, e),
        })?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(SendPostError::Configuration {
                message: format!("Webhook URL must use http or https, got '{}'", url.scheme()),
            });
        }

        Ok(())
    }
}

/// Credentials plus the variables that fell back to placeholders.
#[derive(Debug)]
pub struct LoadedCredentials {
    /// The credentials to run with.
    pub credentials: Credentials,
    /// Names of the environment variables that were not set.
    pub placeholders: Vec<&'static str>,
}

impl LoadedCredentials {
    /// Loads both API keys from the environment.
    pub fn from_env() -> SendPostResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Loads both API keys through a variable lookup function.
    ///
    /// A missing key is replaced by its placeholder so the run still
    /// happens; every call will then be rejected by the API.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> SendPostResult<Self> {
        let mut placeholders = Vec::new();
        let mut get = |name: &'static str, placeholder: &str| match lookup(name) {
            Some(value) if !value.is_empty() => value,
            _ => {
                placeholders.push(name);
                placeholder.to_string()
            }
        };

        let account = get(ACCOUNT_API_KEY_ENV, ACCOUNT_API_KEY_PLACEHOLDER);
        let sub_account = get(SUB_ACCOUNT_API_KEY_ENV, SUB_ACCOUNT_API_KEY_PLACEHOLDER);

        Ok(Self {
            credentials: Credentials::new(account, sub_account)?,
            placeholders,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let settings = WorkflowSettings::from_lookup(lookup(&[]));
        assert_eq!(settings, WorkflowSettings::default());
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_env_overrides() {
        let settings = WorkflowSettings::from_lookup(lookup(&[
            ("SENDPOST_FROM_EMAIL", "news@acme.test"),
            ("SENDPOST_DOMAIN", "acme.test"),
            ("SENDPOST_WEBHOOK_URL", ""),
        ]));

        assert_eq!(settings.from_email, "news@acme.test");
        assert_eq!(settings.domain, "acme.test");
        assert_eq!(settings.webhook_url, DEFAULT_WEBHOOK_URL);
    }

    #[test]
    fn test_validate_rejects_bad_webhook_url() {
        let mut settings = WorkflowSettings::default();

        settings.webhook_url = "not a url".to_string();
        assert!(settings.validate().is_err());

        settings.webhook_url = "ftp://hooks.example.com".to_string();
        assert!(settings.validate().is_err());

        settings.webhook_url = "   ".to_string();
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_addresses() {
        let settings = WorkflowSettings {
            to_email: String::new(),
            ..WorkflowSettings::default()
        };

        match settings.validate() {
            Err(SendPostError::Configuration { message }) => {
                assert!(message.contains("To address"));
            }
            other => panic!("Expected Configuration error, got {:?}", other),
        }
    }

    #[test]
    fn test_credentials_placeholders() {
        let loaded =
            LoadedCredentials::from_lookup(lookup(&[(ACCOUNT_API_KEY_ENV, "acct")])).unwrap();

        assert_eq!(loaded.placeholders, vec![SUB_ACCOUNT_API_KEY_ENV]);
        assert_eq!(loaded.credentials.account().expose(), "acct");
        assert_eq!(
            loaded.credentials.sub_account().expose(),
            SUB_ACCOUNT_API_KEY_PLACEHOLDER
        );
    }
}
