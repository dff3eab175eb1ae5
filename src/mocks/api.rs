//! Scripted [`SendPostApi`] for workflow tests.

use async_trait::async_trait;
use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use std::collections::{HashMap, VecDeque};

use crate::auth::{AuthScope, ScopedApiKey};
use crate::client::SendPostApi;
use crate::errors::{SendPostError, SendPostResult};
use crate::types::{
    CreateDomainRequest, CreateSubAccountRequest, CreateWebhookRequest, DailyStat, Domain,
    EmailMessage, EmailResponse, Ip, IpPool, IpPoolCreateRequest, Message, StatCounters,
    StatsWindow, SubAccount, Webhook,
};

/// One [`SendPostApi`] operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiOperation {
    /// `list_sub_accounts`
    ListSubAccounts,
    /// `create_sub_account`
    CreateSubAccount,
    /// `create_webhook`
    CreateWebhook,
    /// `list_webhooks`
    ListWebhooks,
    /// `create_domain`
    CreateDomain,
    /// `list_domains`
    ListDomains,
    /// `list_ips`
    ListIps,
    /// `create_ip_pool`
    CreateIpPool,
    /// `list_ip_pools`
    ListIpPools,
    /// `send_email`
    SendEmail,
    /// `get_message`
    GetMessage,
    /// `sub_account_stats`
    SubAccountStats,
    /// `sub_account_aggregate_stats`
    SubAccountAggregateStats,
    /// `account_stats`
    AccountStats,
}

/// A recorded call.
#[derive(Debug, Clone)]
pub struct ApiCall {
    /// Operation invoked.
    pub operation: ApiOperation,
    /// Scope of the key it was called with.
    pub scope: AuthScope,
    /// Request body or parameters as JSON; `Null` for plain lists.
    pub payload: Value,
}

enum MockReply {
    Ok(Value),
    Err(SendPostError),
}

/// An in-memory API with per-operation reply queues.
///
/// Replies are consumed in order. An operation with no reply left fails
/// with a 500 server error.
#[derive(Default)]
pub struct MockSendPostApi {
    replies: Mutex<HashMap<ApiOperation, VecDeque<MockReply>>>,
    calls: Mutex<Vec<ApiCall>>,
}

impl MockSendPostApi {
    /// Creates an API with no scripted replies.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an API scripted for a run in which every step succeeds.
    pub fn happy_path() -> Self {
        let api = Self::new();
        api.respond(
            ApiOperation::ListSubAccounts,
            json!([{"id": 101, "name": "Existing", "apiKey": "existing-key"}]),
        )
        .respond(
            ApiOperation::CreateSubAccount,
            json!({"id": 202, "name": "ESP Client", "apiKey": "created-key"}),
        )
        .respond(ApiOperation::CreateWebhook, json!({"id": 303, "enabled": true}))
        .respond(ApiOperation::ListWebhooks, json!([{"id": 303}]))
        .respond(
            ApiOperation::CreateDomain,
            json!({"id": 404, "name": "yourdomain.com", "dkim": {"textValue": "v=DKIM1; p=abc"}}),
        )
        .respond(ApiOperation::ListDomains, json!([{"id": 404}]))
        .respond(ApiOperation::ListIps, json!([{"id": 1, "publicIP": "1.2.3.4"}]))
        .respond(ApiOperation::ListIps, json!([{"id": 1, "publicIP": "1.2.3.4"}]))
        .respond(
            ApiOperation::CreateIpPool,
            json!({"id": 505, "name": "Marketing Pool", "ips": [{"publicIP": "1.2.3.4"}]}),
        )
        .respond(ApiOperation::ListIpPools, json!([{"id": 505}]))
        .respond(ApiOperation::SendEmail, json!([{"messageId": "msg-transactional"}]))
        .respond(ApiOperation::SendEmail, json!([{"messageId": "msg-marketing"}]))
        .respond(
            ApiOperation::SubAccountStats,
            json!([{"date": "2024-06-09", "stat": {"processed": 2, "delivered": 1}}]),
        )
        .respond(
            ApiOperation::SubAccountAggregateStats,
            json!({"processed": 2, "delivered": 1}),
        )
        .respond(ApiOperation::AccountStats, json!([]))
        .respond(
            ApiOperation::GetMessage,
            json!({"messageID": "msg-transactional", "subject": "Order Confirmation"}),
        );
        api
    }

    /// Queues a successful reply, given as the JSON the API would return.
    pub fn respond(&self, operation: ApiOperation, body: Value) -> &Self {
        self.push(operation, MockReply::Ok(body));
        self
    }

    /// Queues a failure.
    pub fn fail(&self, operation: ApiOperation, error: SendPostError) -> &Self {
        self.push(operation, MockReply::Err(error));
        self
    }

    /// Drops every queued reply for an operation.
    pub fn clear(&self, operation: ApiOperation) -> &Self {
        self.replies.lock().remove(&operation);
        self
    }

    /// Returns every recorded call, in order.
    pub fn calls(&self) -> Vec<ApiCall> {
        self.calls.lock().clone()
    }

    /// Returns the recorded calls of one operation.
    pub fn calls_for(&self, operation: ApiOperation) -> Vec<ApiCall> {
        self.calls
            .lock()
            .iter()
            .filter(|call| call.operation == operation)
            .cloned()
            .collect()
    }

    /// Returns how often an operation was called.
    pub fn call_count(&self, operation: ApiOperation) -> usize {
        self.calls_for(operation).len()
    }

    fn push(&self, operation: ApiOperation, reply: MockReply) {
        self.replies
            .lock()
            .entry(operation)
            .or_default()
            .push_back(reply);
    }

    fn call<T: DeserializeOwned>(
        &self,
        operation: ApiOperation,
        key: &ScopedApiKey,
        payload: Value,
    ) -> SendPostResult<T> {
        self.calls.lock().push(ApiCall {
            operation,
            scope: key.scope(),
            payload,
        });

        let reply = self
            .replies
            .lock()
            .get_mut(&operation)
            .and_then(VecDeque::pop_front);

        match reply {
            Some(MockReply::Ok(body)) => {
                let raw = body.to_string();
                serde_json::from_value(body).map_err(|e| SendPostError::Deserialization {
                    message: e.to_string(),
                    body: raw,
                })
            }
            Some(MockReply::Err(error)) => Err(error),
            None => Err(SendPostError::Server {
                status: 500,
                message: format!("No mock response configured for {:?}", operation),
            }),
        }
    }
}

fn to_payload<T: Serialize>(request: &T) -> Value {
    serde_json::to_value(request).unwrap_or_default()
}

fn window_payload(window: StatsWindow) -> Value {
    let (from, to) = window.query_dates();
    json!({"from": from, "to": to})
}

#[async_trait]
impl SendPostApi for MockSendPostApi {
    async fn list_sub_accounts(&self, key: &ScopedApiKey) -> SendPostResult<Vec<SubAccount>> {
        self.call(ApiOperation::ListSubAccounts, key, Value::Null)
    }

    async fn create_sub_account(
        &self,
        key: &ScopedApiKey,
        request: &CreateSubAccountRequest,
    ) -> SendPostResult<SubAccount> {
        self.call(ApiOperation::CreateSubAccount, key, to_payload(request))
    }

    async fn create_webhook(
        &self,
        key: &ScopedApiKey,
        request: &CreateWebhookRequest,
    ) -> SendPostResult<Webhook> {
        self.call(ApiOperation::CreateWebhook, key, to_payload(request))
    }

    async fn list_webhooks(&self, key: &ScopedApiKey) -> SendPostResult<Vec<Webhook>> {
        self.call(ApiOperation::ListWebhooks, key, Value::Null)
    }

    async fn create_domain(
        &self,
        key: &ScopedApiKey,
        request: &CreateDomainRequest,
    ) -> SendPostResult<Domain> {
        self.call(ApiOperation::CreateDomain, key, to_payload(request))
    }

    async fn list_domains(&self, key: &ScopedApiKey) -> SendPostResult<Vec<Domain>> {
        self.call(ApiOperation::ListDomains, key, Value::Null)
    }

    async fn list_ips(&self, key: &ScopedApiKey) -> SendPostResult<Vec<Ip>> {
        self.call(ApiOperation::ListIps, key, Value::Null)
    }

    async fn create_ip_pool(
        &self,
        key: &ScopedApiKey,
        request: &IpPoolCreateRequest,
    ) -> SendPostResult<IpPool> {
        self.call(ApiOperation::CreateIpPool, key, to_payload(request))
    }

    async fn list_ip_pools(&self, key: &ScopedApiKey) -> SendPostResult<Vec<IpPool>> {
        self.call(ApiOperation::ListIpPools, key, Value::Null)
    }

    async fn send_email(
        &self,
        key: &ScopedApiKey,
        message: &EmailMessage,
    ) -> SendPostResult<Vec<EmailResponse>> {
        self.call(ApiOperation::SendEmail, key, to_payload(message))
    }

    async fn get_message(&self, key: &ScopedApiKey, message_id: &str) -> SendPostResult<Message> {
        self.call(ApiOperation::GetMessage, key, json!({"messageId": message_id}))
    }

    async fn sub_account_stats(
        &self,
        key: &ScopedApiKey,
        sub_account_id: i64,
        window: StatsWindow,
    ) -> SendPostResult<Vec<DailyStat>> {
        let mut payload = window_payload(window);
        payload["subAccountId"] = json!(sub_account_id);
        self.call(ApiOperation::SubAccountStats, key, payload)
    }

    async fn sub_account_aggregate_stats(
        &self,
        key: &ScopedApiKey,
        sub_account_id: i64,
        window: StatsWindow,
    ) -> SendPostResult<StatCounters> {
        let mut payload = window_payload(window);
        payload["subAccountId"] = json!(sub_account_id);
        self.call(ApiOperation::SubAccountAggregateStats, key, payload)
    }

    async fn account_stats(
        &self,
        key: &ScopedApiKey,
        window: StatsWindow,
    ) -> SendPostResult<Vec<DailyStat>> {
        self.call(ApiOperation::AccountStats, key, window_payload(window))
    }
}
