//! Email sending types.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A sender address.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailAddress {
    /// Email address.
    pub email: String,
    /// Display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl EmailAddress {
    /// Creates an address with a display name.
    pub fn named(email: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            name: Some(name.into()),
        }
    }
}

/// A message recipient.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipient {
    /// Email address.
    pub email: String,
    /// Display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Per-recipient merge fields.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub custom_fields: BTreeMap<String, serde_json::Value>,
}

impl Recipient {
    /// Creates a recipient with a display name.
    pub fn named(email: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            name: Some(name.into()),
            custom_fields: BTreeMap::new(),
        }
    }

    /// Adds a custom field.
    pub fn custom_field(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.custom_fields.insert(key.into(), value.into());
        self
    }
}

/// An email to send.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailMessage {
    /// Sender.
    pub from: EmailAddress,
    /// Recipients.
    pub to: Vec<Recipient>,
    /// Subject line.
    pub subject: String,
    /// HTML body.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html_body: Option<String>,
    /// Plain-text body.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_body: Option<String>,
    /// Track opens.
    pub track_opens: bool,
    /// Track clicks.
    pub track_clicks: bool,
    /// Analytics groups.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub groups: Vec<String>,
    /// Custom headers.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, String>,
    /// IP pool to send through.
    #[serde(rename = "ippool", skip_serializing_if = "Option::is_none")]
    pub ip_pool: Option<String>,
}

impl EmailMessage {
    /// Creates a builder.
    pub fn builder(from: EmailAddress, subject: impl Into<String>) -> EmailMessageBuilder {
        EmailMessageBuilder::new(from, subject)
    }
}

/// Builder for `EmailMessage`.
#[derive(Debug, Clone)]
pub struct EmailMessageBuilder {
    message: EmailMessage,
}

impl EmailMessageBuilder {
    /// Creates a builder with sender and subject.
    pub fn new(from: EmailAddress, subject: impl Into<String>) -> Self {
        Self {
            message: EmailMessage {
                from,
                to: Vec::new(),
                subject: subject.into(),
                html_body: None,
                text_body: None,
                track_opens: false,
                track_clicks: false,
                groups: Vec::new(),
                headers: BTreeMap::new(),
                ip_pool: None,
            },
        }
    }

    /// Adds a recipient.
    pub fn to(mut self, recipient: Recipient) -> Self {
        self.message.to.push(recipient);
        self
    }

    /// Sets the HTML body.
    pub fn html_body(mut self, body: impl Into<String>) -> Self {
        self.message.html_body = Some(body.into());
        self
    }

    /// Sets the plain-text body.
    pub fn text_body(mut self, body: impl Into<String>) -> Self {
        self.message.text_body = Some(body.into());
        self
    }

    /// Enables open and click tracking.
    pub fn track_all(mut self) -> Self {
        self.message.track_opens = true;
        self.message.track_clicks = true;
        self
    }

    /// Adds an analytics group.
    pub fn group(mut self, group: impl Into<String>) -> Self {
        self.message.groups.push(group.into());
        self
    }

    /// Adds a custom header.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.message.headers.insert(name.into(), value.into());
        self
    }

    /// Routes the message through an IP pool.
    pub fn ip_pool(mut self, pool: Option<String>) -> Self {
        self.message.ip_pool = pool;
        self
    }

    /// Builds the message.
    pub fn build(self) -> EmailMessage {
        self.message
    }
}

/// Per-recipient result of a send call.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailResponse {
    /// Message ID assigned by the API.
    pub message_id: Option<String>,
    /// Recipient address.
    pub to: Option<String>,
    /// Submission timestamp.
    pub submitted_at: Option<i64>,
    /// Error code, zero or absent on success.
    pub error_code: Option<i64>,
    /// Error message.
    pub error_message: Option<String>,
}
