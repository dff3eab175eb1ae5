//! The SendPost operations the workflow depends on.

use async_trait::async_trait;

use crate::auth::ScopedApiKey;
use crate::errors::SendPostResult;
use crate::types::{
    CreateDomainRequest, CreateSubAccountRequest, CreateWebhookRequest, DailyStat, Domain,
    EmailMessage, EmailResponse, Ip, IpPool, IpPoolCreateRequest, Message, StatCounters,
    StatsWindow, SubAccount, Webhook,
};

/// Every remote operation the workflow can invoke.
///
/// Each call authenticates with the key it is given; implementations must
/// not substitute a key of another scope.
#[async_trait]
pub trait SendPostApi: Send + Sync {
    /// `GET /account/subaccount/`
    async fn list_sub_accounts(&self, key: &ScopedApiKey) -> SendPostResult<Vec<SubAccount>>;

    /// `POST /account/subaccount/`
    async fn create_sub_account(
        &self,
        key: &ScopedApiKey,
        request: &CreateSubAccountRequest,
    ) -> SendPostResult<SubAccount>;

    /// `POST /account/webhook`
    async fn create_webhook(
        &self,
        key: &ScopedApiKey,
        request: &CreateWebhookRequest,
    ) -> SendPostResult<Webhook>;

    /// `GET /account/webhook`
    async fn list_webhooks(&self, key: &ScopedApiKey) -> SendPostResult<Vec<Webhook>>;

    /// `POST /subaccount/domain`
    async fn create_domain(
        &self,
        key: &ScopedApiKey,
        request: &CreateDomainRequest,
    ) -> SendPostResult<Domain>;

    /// `GET /subaccount/domain`
    async fn list_domains(&self, key: &ScopedApiKey) -> SendPostResult<Vec<Domain>>;

    /// `GET /account/ip/`
    async fn list_ips(&self, key: &ScopedApiKey) -> SendPostResult<Vec<Ip>>;

    /// `POST /account/ippool`
    async fn create_ip_pool(
        &self,
        key: &ScopedApiKey,
        request: &IpPoolCreateRequest,
    ) -> SendPostResult<IpPool>;

    /// `GET /account/ippool`
    async fn list_ip_pools(&self, key: &ScopedApiKey) -> SendPostResult<Vec<IpPool>>;

    /// `POST /subaccount/email/`
    async fn send_email(
        &self,
        key: &ScopedApiKey,
        message: &EmailMessage,
    ) -> SendPostResult<Vec<EmailResponse>>;

    /// `GET /account/message/{id}`
    async fn get_message(&self, key: &ScopedApiKey, message_id: &str) -> SendPostResult<Message>;

    /// `GET /account/subaccount/stat/{id}`
    async fn sub_account_stats(
        &self,
        key: &ScopedApiKey,
        sub_account_id: i64,
        window: StatsWindow,
    ) -> SendPostResult<Vec<DailyStat>>;

    /// `GET /account/subaccount/stat/{id}/aggregate`
    async fn sub_account_aggregate_stats(
        &self,
        key: &ScopedApiKey,
        sub_account_id: i64,
        window: StatsWindow,
    ) -> SendPostResult<StatCounters>;

    /// `GET /account/stat`
    async fn account_stats(
        &self,
        key: &ScopedApiKey,
        window: StatsWindow,
    ) -> SendPostResult<Vec<DailyStat>>;
}
