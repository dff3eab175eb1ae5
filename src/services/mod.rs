//! Service implementations for the SendPost API.
//!
//! One service per API resource. Every operation takes the scoped key it
//! should authenticate with, so the caller decides between account and
//! sub-account credentials.

pub mod domains;
pub mod emails;
pub mod ip_pools;
pub mod ips;
pub mod messages;
pub mod stats;
pub mod sub_accounts;
pub mod webhooks;

pub use domains::{DefaultDomainsService, DomainsService};
pub use emails::{DefaultEmailsService, EmailsService};
pub use ip_pools::{DefaultIpPoolsService, IpPoolsService};
pub use ips::{DefaultIpsService, IpsService};
pub use messages::{DefaultMessagesService, MessagesService};
pub use stats::{DefaultStatsService, StatsService};
pub use sub_accounts::{DefaultSubAccountsService, SubAccountsService};
pub use webhooks::{DefaultWebhooksService, WebhooksService};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::errors::{SendPostError, SendPostResult};

/// Decodes a JSON response body.
pub(crate) fn decode<T: DeserializeOwned>(body: &[u8]) -> SendPostResult<T> {
    serde_json::from_slice(body).map_err(|e| SendPostError::deserialization(&e, body))
}

/// Percent-encodes a value so it fills exactly one URL path segment.
pub(crate) fn path_segment(value: &str) -> SendPostResult<String> {
    let mut url = url::Url::parse("http://localhost/")?;
    url.path_segments_mut()
        .map_err(|()| SendPostError::Configuration {
            message: "Cannot encode path segment".to_string(),
        })?
        .pop_if_empty()
        .push(value);

    Ok(url.path().trim_start_matches('/').to_string())
}

/// Encodes a JSON request body.
pub(crate) fn encode<T: Serialize>(request: &T) -> SendPostResult<Vec<u8>> {
    serde_json::to_vec(request).map_err(|e| SendPostError::Serialization {
        message: e.to_string(),
    })
}
