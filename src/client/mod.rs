//! SendPost API client.

mod api;

pub use api::SendPostApi;

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

use crate::auth::{ApiKeyAuthManager, ScopedApiKey};
use crate::config::{SendPostConfig, SendPostConfigBuilder};
use crate::errors::SendPostResult;
use crate::services::{
    DefaultDomainsService, DefaultEmailsService, DefaultIpPoolsService, DefaultIpsService,
    DefaultMessagesService, DefaultStatsService, DefaultSubAccountsService,
    DefaultWebhooksService, DomainsService, EmailsService, IpPoolsService, IpsService,
    MessagesService, StatsService, SubAccountsService, WebhooksService,
};
use crate::transport::{HttpTransport, ReqwestTransport, TransportConfig};
use crate::types::{
    CreateDomainRequest, CreateSubAccountRequest, CreateWebhookRequest, DailyStat, Domain,
    EmailMessage, EmailResponse, Ip, IpPool, IpPoolCreateRequest, Message, StatCounters,
    StatsWindow, SubAccount, Webhook,
};

/// The main SendPost client.
pub struct SendPostClient {
    config: SendPostConfig,
    transport: Arc<dyn HttpTransport>,
    auth: ApiKeyAuthManager,
}

impl SendPostClient {
    /// Creates a new client with the given configuration.
    pub fn new(config: SendPostConfig) -> SendPostResult<Self> {
        let transport = Arc::new(ReqwestTransport::with_config(TransportConfig::from(&config))?);
        Ok(Self::with_transport(config, transport))
    }

    /// Creates a client over an existing transport.
    pub fn with_transport(config: SendPostConfig, transport: Arc<dyn HttpTransport>) -> Self {
        let auth = ApiKeyAuthManager::with_custom_headers(config.custom_headers.clone());
        Self {
            config,
            transport,
            auth,
        }
    }

    /// Creates a new client builder.
    pub fn builder() -> SendPostClientBuilder {
        SendPostClientBuilder::new()
    }

    /// Creates a client from the environment.
    pub fn from_env() -> SendPostResult<Self> {
        Self::new(SendPostConfig::from_env()?)
    }

    /// Returns the sub-accounts service.
    pub fn sub_accounts(&self) -> impl SubAccountsService + '_ {
        DefaultSubAccountsService::new(self.transport.as_ref(), &self.auth)
    }

    /// Returns the webhooks service.
    pub fn webhooks(&self) -> impl WebhooksService + '_ {
        DefaultWebhooksService::new(self.transport.as_ref(), &self.auth)
    }

    /// Returns the domains service.
    pub fn domains(&self) -> impl DomainsService + '_ {
        DefaultDomainsService::new(self.transport.as_ref(), &self.auth)
    }

    /// Returns the IPs service.
    pub fn ips(&self) -> impl IpsService + '_ {
        DefaultIpsService::new(self.transport.as_ref(), &self.auth)
    }

    /// Returns the IP pools service.
    pub fn ip_pools(&self) -> impl IpPoolsService + '_ {
        DefaultIpPoolsService::new(self.transport.as_ref(), &self.auth)
    }

    /// Returns the emails service.
    pub fn emails(&self) -> impl EmailsService + '_ {
        DefaultEmailsService::new(self.transport.as_ref(), &self.auth)
    }

    /// Returns the messages service.
    pub fn messages(&self) -> impl MessagesService + '_ {
        DefaultMessagesService::new(self.transport.as_ref(), &self.auth)
    }

    /// Returns the statistics service.
    pub fn stats(&self) -> impl StatsService + '_ {
        DefaultStatsService::new(self.transport.as_ref(), &self.auth)
    }

    /// Returns the client configuration.
    pub fn config(&self) -> &SendPostConfig {
        &self.config
    }
}

#[async_trait]
impl SendPostApi for SendPostClient {
    async fn list_sub_accounts(&self, key: &ScopedApiKey) -> SendPostResult<Vec<SubAccount>> {
        self.sub_accounts().list(key).await
    }

    async fn create_sub_account(
        &self,
        key: &ScopedApiKey,
        request: &CreateSubAccountRequest,
    ) -> SendPostResult<SubAccount> {
        self.sub_accounts().create(key, request).await
    }

    async fn create_webhook(
        &self,
        key: &ScopedApiKey,
        request: &CreateWebhookRequest,
    ) -> SendPostResult<Webhook> {
        self.webhooks().create(key, request).await
    }

    async fn list_webhooks(&self, key: &ScopedApiKey) -> SendPostResult<Vec<Webhook>> {
        self.webhooks().list(key).await
    }

    async fn create_domain(
        &self,
        key: &ScopedApiKey,
        request: &CreateDomainRequest,
    ) -> SendPostResult<Domain> {
        self.domains().create(key, request).await
    }

    async fn list_domains(&self, key: &ScopedApiKey) -> SendPostResult<Vec<Domain>> {
        self.domains().list(key).await
    }

    async fn list_ips(&self, key: &ScopedApiKey) -> SendPostResult<Vec<Ip>> {
        self.ips().list(key).await
    }

    async fn create_ip_pool(
        &self,
        key: &ScopedApiKey,
        request: &IpPoolCreateRequest,
    ) -> SendPostResult<IpPool> {
        self.ip_pools().create(key, request).await
    }

    async fn list_ip_pools(&self, key: &ScopedApiKey) -> SendPostResult<Vec<IpPool>> {
        self.ip_pools().list(key).await
    }

    async fn send_email(
        &self,
        key: &ScopedApiKey,
        message: &EmailMessage,
    ) -> SendPostResult<Vec<EmailResponse>> {
        self.emails().send(key, message).await
    }

    async fn get_message(&self, key: &ScopedApiKey, message_id: &str) -> SendPostResult<Message> {
        self.messages().get(key, message_id).await
    }

    async fn sub_account_stats(
        &self,
        key: &ScopedApiKey,
        sub_account_id: i64,
        window: StatsWindow,
    ) -> SendPostResult<Vec<DailyStat>> {
        self.stats().sub_account_daily(key, sub_account_id, window).await
    }

    async fn sub_account_aggregate_stats(
        &self,
        key: &ScopedApiKey,
        sub_account_id: i64,
        window: StatsWindow,
    ) -> SendPostResult<StatCounters> {
        self.stats()
            .sub_account_aggregate(key, sub_account_id, window)
            .await
    }

    async fn account_stats(
        &self,
        key: &ScopedApiKey,
        window: StatsWindow,
    ) -> SendPostResult<Vec<DailyStat>> {
        self.stats().account_daily(key, window).await
    }
}

/// Builder for the SendPost client.
#[derive(Default)]
pub struct SendPostClientBuilder {
    config: SendPostConfigBuilder,
    transport: Option<Arc<dyn HttpTransport>>,
}

impl SendPostClientBuilder {
    /// Creates a new client builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the base URL.
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config = self.config.base_url(url);
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config = self.config.timeout(timeout);
        self
    }

    /// Adds a header sent with every request.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.config = self.config.header(name, value);
        self
    }

    /// Uses a custom transport instead of reqwest.
    #[must_use]
    pub fn transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Builds the client.
    pub fn build(self) -> SendPostResult<SendPostClient> {
        let config = self.config.build()?;

        match self.transport {
            Some(transport) => Ok(SendPostClient::with_transport(config, transport)),
            None => SendPostClient::new(config),
        }
    }
}
