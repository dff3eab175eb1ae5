//! Dedicated IPs service.

use async_trait::async_trait;

use super::decode;
use crate::auth::{AuthManager, ScopedApiKey};
use crate::errors::SendPostResult;
use crate::transport::{HttpTransport, QueryParams};
use crate::types::ips::Ip;

const IPS_PATH: &str = "/account/ip/";

/// IPs service trait.
#[async_trait]
pub trait IpsService: Send + Sync {
    /// Lists the account's dedicated IPs.
    async fn list(&self, key: &ScopedApiKey) -> SendPostResult<Vec<Ip>>;
}

/// Default implementation of the IPs service.
pub struct DefaultIpsService<'a, T: ?Sized> {
    transport: &'a T,
    auth: &'a dyn AuthManager,
}

impl<'a, T: ?Sized> DefaultIpsService<'a, T> {
    /// Creates a new IPs service.
    pub fn new(transport: &'a T, auth: &'a dyn AuthManager) -> Self {
        Self { transport, auth }
    }
}

#[async_trait]
impl<T> IpsService for DefaultIpsService<'_, T>
where
    T: HttpTransport + ?Sized,
{
    async fn list(&self, key: &ScopedApiKey) -> SendPostResult<Vec<Ip>> {
        let response = self
            .transport
            .get(IPS_PATH, QueryParams::new(), self.auth.get_headers(key))
            .await?;

        decode(&response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{ApiKeyAuthManager, AuthScope};
    use crate::errors::SendPostError;
    use crate::mocks::{MockResponse, MockTransport};

    #[tokio::test]
    async fn test_list_rejects_malformed_body() {
        let transport = MockTransport::new();
        transport.enqueue_response(MockResponse::raw(200, "not json"));
        let auth = ApiKeyAuthManager::new();
        let service = DefaultIpsService::new(&transport, &auth);

        let result = service
            .list(&ScopedApiKey::new(AuthScope::Account, "acct"))
            .await;

        match result {
            Err(SendPostError::Deserialization { body, .. }) => assert_eq!(body, "not json"),
            other => panic!("Expected Deserialization error, got {:?}", other),
        }
    }
}
