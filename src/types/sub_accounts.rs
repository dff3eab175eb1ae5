//! Sub-account types.

use serde::{Deserialize, Serialize};

/// Kind of sub-account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubAccountKind {
    /// Regular sub-account.
    Regular,
    /// Plus sub-account.
    Plus,
}

impl From<i64> for SubAccountKind {
    fn from(value: i64) -> Self {
        if value == 1 {
            Self::Plus
        } else {
            Self::Regular
        }
    }
}

impl std::fmt::Display for SubAccountKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubAccountKind::Regular => write!(f, "Regular"),
            SubAccountKind::Plus => write!(f, "Plus"),
        }
    }
}

/// A sub-account as returned by the API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubAccount {
    /// Sub-account ID.
    pub id: Option<i64>,
    /// Display name.
    pub name: Option<String>,
    /// Sub-account API key.
    pub api_key: Option<String>,
    /// Raw sub-account type (0 = regular, 1 = plus).
    #[serde(rename = "type")]
    pub account_type: Option<i64>,
    /// Whether sending is blocked.
    pub blocked: Option<bool>,
    /// Creation timestamp.
    pub created: Option<i64>,
}

impl SubAccount {
    /// Returns the decoded sub-account kind.
    pub fn kind(&self) -> Option<SubAccountKind> {
        self.account_type.map(SubAccountKind::from)
    }
}

/// Request to create a sub-account.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateSubAccountRequest {
    /// Name of the new sub-account.
    pub name: String,
}

impl CreateSubAccountRequest {
    /// Creates a request for the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sub_account_deserialization() {
        let json = r#"{
            "id": 42,
            "name": "ESP Client",
            "apiKey": "sub-key",
            "type": 1,
            "blocked": false,
            "created": 1700000000
        }"#;

        let account: SubAccount = serde_json::from_str(json).unwrap();
        assert_eq!(account.id, Some(42));
        assert_eq!(account.api_key.as_deref(), Some("sub-key"));
        assert_eq!(account.kind(), Some(SubAccountKind::Plus));
    }

    #[test]
    fn test_sub_account_missing_fields() {
        let account: SubAccount = serde_json::from_str(r#"{"id": 3}"#).unwrap();
        assert_eq!(account.id, Some(3));
        assert!(account.name.is_none());
        assert!(account.kind().is_none());
    }
}
