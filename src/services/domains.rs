//! Sending domains service.

use async_trait::async_trait;

use super::{decode, encode};
use crate::auth::{AuthManager, ScopedApiKey};
use crate::errors::SendPostResult;
use crate::transport::{HttpTransport, QueryParams};
use crate::types::domains::{CreateDomainRequest, Domain};

const DOMAINS_PATH: &str = "/subaccount/domain";

/// Domains service trait.
#[async_trait]
pub trait DomainsService: Send + Sync {
    /// Adds a sending domain to the sub-account.
    async fn create(&self, key: &ScopedApiKey, request: &CreateDomainRequest)
        -> SendPostResult<Domain>;

    /// Lists the sub-account's domains.
    async fn list(&self, key: &ScopedApiKey) -> SendPostResult<Vec<Domain>>;
}

/// Default implementation of the domains service.
pub struct DefaultDomainsService<'a, T: ?Sized> {
    transport: &'a T,
    auth: &'a dyn AuthManager,
}

impl<'a, T: ?Sized> DefaultDomainsService<'a, T> {
    /// Creates a new domains service.
    pub fn new(transport: &'a T, auth: &'a dyn AuthManager) -> Self {
        Self { transport, auth }
    }
}

#[async_trait]
impl<T> DomainsService for DefaultDomainsService<'_, T>
where
    T: HttpTransport + ?Sized,
{
    async fn create(
        &self,
        key: &ScopedApiKey,
        request: &CreateDomainRequest,
    ) -> SendPostResult<Domain> {
        let response = self
            .transport
            .post(DOMAINS_PATH, self.auth.get_headers(key), encode(request)?)
            .await?;

        decode(&response)
    }

    async fn list(&self, key: &ScopedApiKey) -> SendPostResult<Vec<Domain>> {
        let response = self
            .transport
            .get(DOMAINS_PATH, QueryParams::new(), self.auth.get_headers(key))
            .await?;

        decode(&response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{ApiKeyAuthManager, AuthScope, SUB_ACCOUNT_API_KEY_HEADER};
    use crate::mocks::{MockResponse, MockTransport};

    #[tokio::test]
    async fn test_create_uses_sub_account_key() {
        let transport = MockTransport::new();
        transport.enqueue_response(MockResponse::json(
            serde_json::json!({"id": 12, "name": "yourdomain.com", "verified": false}),
        ));
        let auth = ApiKeyAuthManager::new();
        let service = DefaultDomainsService::new(&transport, &auth);

        let domain = service
            .create(
                &ScopedApiKey::new(AuthScope::SubAccount, "sub"),
                &CreateDomainRequest::new("yourdomain.com"),
            )
            .await
            .unwrap();

        assert_eq!(domain.id, Some(12));
        let request = transport.last_request().unwrap();
        assert_eq!(request.url, DOMAINS_PATH);
        assert_eq!(
            request.headers.get(SUB_ACCOUNT_API_KEY_HEADER),
            Some(&"sub".to_string())
        );
        assert_eq!(
            request.body_json().unwrap(),
            serde_json::json!({"name": "yourdomain.com"})
        );
    }
}
