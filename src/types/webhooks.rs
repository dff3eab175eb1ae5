//! Webhook types.

use serde::{Deserialize, Serialize};

/// A registered webhook.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Webhook {
    /// Webhook ID.
    pub id: Option<i64>,
    /// Callback URL.
    pub url: Option<String>,
    /// Whether the webhook is active.
    pub enabled: Option<bool>,
    /// Notify on processed events.
    pub processed: Option<bool>,
    /// Notify on delivered events.
    pub delivered: Option<bool>,
    /// Notify on dropped events.
    pub dropped: Option<bool>,
    /// Notify on soft bounces.
    pub soft_bounced: Option<bool>,
    /// Notify on hard bounces.
    pub hard_bounced: Option<bool>,
    /// Notify on opens.
    pub opened: Option<bool>,
    /// Notify on clicks.
    pub clicked: Option<bool>,
    /// Notify on unsubscribes.
    pub unsubscribed: Option<bool>,
    /// Notify on spam reports.
    pub spam: Option<bool>,
    /// Creation timestamp.
    pub created: Option<i64>,
}

/// Request to create a webhook.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateWebhookRequest {
    /// Callback URL.
    pub url: String,
    /// Whether the webhook is active.
    pub enabled: bool,
    /// Notify on processed events.
    pub processed: bool,
    /// Notify on delivered events.
    pub delivered: bool,
    /// Notify on dropped events.
    pub dropped: bool,
    /// Notify on soft bounces.
    pub soft_bounced: bool,
    /// Notify on hard bounces.
    pub hard_bounced: bool,
    /// Notify on opens.
    pub opened: bool,
    /// Notify on clicks.
    pub clicked: bool,
    /// Notify on unsubscribes.
    pub unsubscribed: bool,
    /// Notify on spam reports.
    pub spam: bool,
}

impl CreateWebhookRequest {
    /// Creates an enabled webhook subscribed to every event type.
    pub fn all_events(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            enabled: true,
            processed: true,
            delivered: true,
            dropped: true,
            soft_bounced: true,
            hard_bounced: true,
            opened: true,
            clicked: true,
            unsubscribed: true,
            spam: true,
        }
    }
}
