//! Message detail types.

use serde::{Deserialize, Serialize};

/// Address information on a stored message.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MessageParty {
    /// Email address.
    pub email: Option<String>,
    /// Display name.
    pub name: Option<String>,
}

/// A sent message as stored by the delivery pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Message ID.
    #[serde(rename = "messageID")]
    pub message_id: Option<String>,
    /// Owning account.
    #[serde(rename = "accountID")]
    pub account_id: Option<i64>,
    /// Owning sub-account.
    #[serde(rename = "subAccountID")]
    pub sub_account_id: Option<i64>,
    /// Sending IP ID.
    #[serde(rename = "ipID")]
    pub ip_id: Option<i64>,
    /// Public sending address.
    #[serde(rename = "publicIP")]
    pub public_ip: Option<String>,
    /// Local sending address.
    #[serde(rename = "localIP")]
    pub local_ip: Option<String>,
    /// Email type reported by the pipeline.
    #[serde(rename = "emailType")]
    pub email_type: Option<String>,
    /// Submission timestamp.
    #[serde(rename = "submittedAt")]
    pub submitted_at: Option<i64>,
    /// Sender.
    pub from: Option<MessageParty>,
    /// Recipient.
    pub to: Option<MessageParty>,
    /// Subject line.
    pub subject: Option<String>,
    /// IP pool the message went through.
    #[serde(rename = "ipPool")]
    pub ip_pool: Option<String>,
    /// Delivery attempt count.
    pub attempt: Option<i64>,
}
