//! Authentication module for the SendPost client.
//!
//! SendPost issues two kinds of API keys. Account keys manage the account
//! itself (sub-accounts, webhooks, IPs, statistics); sub-account keys send
//! mail and manage sending domains. Each request carries exactly one of them
//! in a scope-specific header.

use secrecy::{ExposeSecret, SecretString};
use std::collections::HashMap;

use crate::errors::{SendPostError, SendPostResult};

/// Header carrying an account-scope key.
pub const ACCOUNT_API_KEY_HEADER: &str = "X-Account-ApiKey";

/// Header carrying a sub-account-scope key.
pub const SUB_ACCOUNT_API_KEY_HEADER: &str = "X-SubAccount-ApiKey";

/// Authorization context an API key belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthScope {
    /// Account-level operations.
    Account,
    /// Sub-account-level operations.
    SubAccount,
}

impl AuthScope {
    /// Returns the request header used for this scope.
    pub fn header_name(self) -> &'static str {
        match self {
            AuthScope::Account => ACCOUNT_API_KEY_HEADER,
            AuthScope::SubAccount => SUB_ACCOUNT_API_KEY_HEADER,
        }
    }
}

impl std::fmt::Display for AuthScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthScope::Account => write!(f, "account"),
            AuthScope::SubAccount => write!(f, "sub-account"),
        }
    }
}

/// An API key bound to the scope it authorizes.
#[derive(Clone)]
pub struct ScopedApiKey {
    scope: AuthScope,
    key: SecretString,
}

impl ScopedApiKey {
    /// Creates a scoped key.
    pub fn new(scope: AuthScope, key: impl Into<String>) -> Self {
        Self {
            scope,
            key: SecretString::new(key.into()),
        }
    }

    /// Returns the scope of this key.
    pub fn scope(&self) -> AuthScope {
        self.scope
    }

    /// Returns the raw key.
    pub(crate) fn expose(&self) -> &str {
        self.key.expose_secret()
    }
}

impl std::fmt::Debug for ScopedApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScopedApiKey")
            .field("scope", &self.scope)
            .field("key", &"[REDACTED]")
            .finish()
    }
}

/// The pair of keys a workflow run authenticates with.
#[derive(Clone)]
pub struct Credentials {
    account: ScopedApiKey,
    sub_account: ScopedApiKey,
}

impl Credentials {
    /// Creates credentials from an account key and a sub-account key.
    pub fn new(
        account_key: impl Into<String>,
        sub_account_key: impl Into<String>,
    ) -> SendPostResult<Self> {
        let account_key = account_key.into();
        let sub_account_key = sub_account_key.into();

        if account_key.is_empty() {
            return Err(SendPostError::Configuration {
                message: "Account API key cannot be empty".to_string(),
            });
        }
        if sub_account_key.is_empty() {
            return Err(SendPostError::Configuration {
                message: "Sub-account API key cannot be empty".to_string(),
            });
        }

        Ok(Self {
            account: ScopedApiKey::new(AuthScope::Account, account_key),
            sub_account: ScopedApiKey::new(AuthScope::SubAccount, sub_account_key),
        })
    }

    /// Returns the key for the given scope.
    pub fn for_scope(&self, scope: AuthScope) -> &ScopedApiKey {
        match scope {
            AuthScope::Account => &self.account,
            AuthScope::SubAccount => &self.sub_account,
        }
    }

    /// Returns the account-scope key.
    pub fn account(&self) -> &ScopedApiKey {
        &self.account
    }

    /// Returns the sub-account-scope key.
    pub fn sub_account(&self) -> &ScopedApiKey {
        &self.sub_account
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("account", &"[REDACTED]")
            .field("sub_account", &"[REDACTED]")
            .finish()
    }
}

/// Trait for authentication managers.
pub trait AuthManager: Send + Sync {
    /// Returns the headers for a request authorized by `key`.
    fn get_headers(&self, key: &ScopedApiKey) -> HashMap<String, String>;
}

/// Builds SendPost API-key headers.
#[derive(Debug, Default, Clone)]
pub struct ApiKeyAuthManager {
    custom_headers: Vec<(String, String)>,
}

impl ApiKeyAuthManager {
    /// Creates an auth manager with no extra headers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an auth manager that also sends the given headers.
    pub fn with_custom_headers(custom_headers: Vec<(String, String)>) -> Self {
        Self { custom_headers }
    }
}

impl AuthManager for ApiKeyAuthManager {
    fn get_headers(&self, key: &ScopedApiKey) -> HashMap<String, String> {
        let mut headers = HashMap::new();

        headers.insert(key.scope().header_name().to_string(), key.expose().to_string());
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        headers.insert("Accept".to_string(), "application/json".to_string());

        for (name, value) in &self.custom_headers {
            headers.insert(name.clone(), value.clone());
        }

        headers
    }
}
