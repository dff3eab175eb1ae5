//! Webhooks service.

use async_trait::async_trait;

use super::{decode, encode};
use crate::auth::{AuthManager, ScopedApiKey};
use crate::errors::SendPostResult;
use crate::transport::{HttpTransport, QueryParams};
use crate::types::webhooks::{CreateWebhookRequest, Webhook};

const WEBHOOKS_PATH: &str = "/account/webhook";

/// Webhooks service trait.
#[async_trait]
pub trait WebhooksService: Send + Sync {
    /// Registers a webhook.
    async fn create(
        &self,
        key: &ScopedApiKey,
        request: &CreateWebhookRequest,
    ) -> SendPostResult<Webhook>;

    /// Lists all webhooks.
    async fn list(&self, key: &ScopedApiKey) -> SendPostResult<Vec<Webhook>>;
}

/// Default implementation of the webhooks service.
pub struct DefaultWebhooksService<'a, T: ?Sized> {
    transport: &'a T,
    auth: &'a dyn AuthManager,
}

impl<'a, T: ?Sized> DefaultWebhooksService<'a, T> {
    /// Creates a new webhooks service.
    pub fn new(transport: &'a T, auth: &'a dyn AuthManager) -> Self {
        Self { transport, auth }
    }
}

#[async_trait]
impl<T> WebhooksService for DefaultWebhooksService<'_, T>
where
    T: HttpTransport + ?Sized,
{
    async fn create(
        &self,
        key: &ScopedApiKey,
        request: &CreateWebhookRequest,
    ) -> SendPostResult<Webhook> {
        let response = self
            .transport
            .post(WEBHOOKS_PATH, self.auth.get_headers(key), encode(request)?)
            .await?;

        decode(&response)
    }

    async fn list(&self, key: &ScopedApiKey) -> SendPostResult<Vec<Webhook>> {
        let response = self
            .transport
            .get(WEBHOOKS_PATH, QueryParams::new(), self.auth.get_headers(key))
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
    async fn test_create_maps_validation_error() {
        let transport = MockTransport::new();
        transport.enqueue_response(MockResponse::error(422, "url is not reachable"));
        let auth = ApiKeyAuthManager::new();
        let service = DefaultWebhooksService::new(&transport, &auth);

        let result = service
            .create(
                &ScopedApiKey::new(AuthScope::Account, "acct"),
                &CreateWebhookRequest::all_events("https://hooks.example.com"),
            )
            .await;

        match result {
            Err(SendPostError::Validation { message }) => {
                assert_eq!(message, "url is not reachable");
            }
            other => panic!("Expected Validation error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_list_decodes_webhooks() {
        let transport = MockTransport::new();
        transport.enqueue_response(MockResponse::json(serde_json::json!([
            {"id": 5, "url": "https://hooks.example.com", "enabled": true}
        ])));
        let auth = ApiKeyAuthManager::new();
        let service = DefaultWebhooksService::new(&transport, &auth);

        let webhooks = service
            .list(&ScopedApiKey::new(AuthScope::Account, "acct"))
            .await
            .unwrap();

        assert_eq!(webhooks[0].id, Some(5));
        assert_eq!(webhooks[0].enabled, Some(true));
        assert_eq!(transport.last_request().unwrap().url, WEBHOOKS_PATH);
    }
}
