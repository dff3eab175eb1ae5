//! State threaded between workflow steps.

use crate::observability::mask_secret;

/// Values produced by earlier steps and consumed by later ones.
///
/// Every field starts unset. A step's changes are applied only when the
/// step completes; failed and skipped steps leave the state untouched.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct RunState {
    /// Sub-account selected or created during the run.
    pub sub_account_id: Option<i64>,
    /// API key of that sub-account, when the API returned one.
    pub sub_account_key: Option<String>,
    /// Webhook registered during the run.
    pub webhook_id: Option<i64>,
    /// Domain added during the run, as a decimal string.
    pub domain_id: Option<String>,
    /// IP pool created during the run.
    pub ip_pool_id: Option<i64>,
    /// Name of that pool; used as `ippool` when sending.
    pub ip_pool_name: Option<String>,
    /// First message ID returned by a successful send.
    pub sent_message_id: Option<String>,
}

impl std::fmt::Debug for RunState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RunState")
            .field("sub_account_id", &self.sub_account_id)
            .field(
                "sub_account_key",
                &self.sub_account_key.as_deref().map(mask_secret),
            )
            .field("webhook_id", &self.webhook_id)
            .field("domain_id", &self.domain_id)
            .field("ip_pool_id", &self.ip_pool_id)
            .field("ip_pool_name", &self.ip_pool_name)
            .field("sent_message_id", &self.sent_message_id)
            .finish()
    }
}
