//! Sending domain types.

use serde::{Deserialize, Serialize};

/// A DNS record the domain owner must publish.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DnsRecord {
    /// Record type (TXT, CNAME, ...).
    #[serde(rename = "type")]
    pub record_type: Option<String>,
    /// Record host.
    pub host: Option<String>,
    /// Record value.
    pub text_value: Option<String>,
}

/// A sending domain.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Domain {
    /// Domain ID.
    pub id: Option<i64>,
    /// Domain name.
    pub name: Option<String>,
    /// Whether DNS verification has succeeded.
    pub verified: Option<bool>,
    /// DKIM record to publish.
    pub dkim: Option<DnsRecord>,
    /// Creation timestamp.
    pub created: Option<i64>,
}

/// Request to add a sending domain.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateDomainRequest {
    /// Domain name.
    pub name: String,
}

impl CreateDomainRequest {
    /// Creates a request for the given domain name.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}
