//! The workflow's step catalog.
//!
//! Each step makes one API call (step 8 makes two) with the key of its
//! scope, and reports either a completed state or a skip. Errors are
//! returned to the orchestrator untouched.

use tracing::{debug, info};

use super::settings::WorkflowSettings;
use super::state::RunState;
use crate::auth::{AuthScope, Credentials, ScopedApiKey};
use crate::client::SendPostApi;
use crate::errors::SendPostResult;
use crate::types::{
    CreateDomainRequest, CreateSubAccountRequest, CreateWebhookRequest, EmailAddress,
    EmailMessage, IpPoolCreateRequest, OverflowStrategy, PoolIp, Recipient, RoutingStrategy,
    StatTotals, StatsWindow,
};

/// Hours a new pool takes to warm up its IPs.
pub const POOL_WARMUP_HOURS: i64 = 24;

/// A workflow step. Steps run in the order of [`Step::ALL`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    /// List sub-accounts and select the first one if none is selected.
    ListSubAccounts,
    /// Create a sub-account and select it.
    CreateSubAccount,
    /// Register a webhook for every event type.
    CreateWebhook,
    /// List webhooks.
    ListWebhooks,
    /// Add the sending domain.
    AddDomain,
    /// List domains.
    ListDomains,
    /// List dedicated IPs.
    ListIps,
    /// Create a pool holding the first IP.
    CreateIpPool,
    /// List IP pools.
    ListIpPools,
    /// Send the order confirmation email.
    SendTransactionalEmail,
    /// Send the promotional email.
    SendMarketingEmail,
    /// Daily statistics of the selected sub-account.
    SubAccountStats,
    /// Aggregate statistics of the selected sub-account.
    AggregateStats,
    /// Daily statistics of the whole account.
    AccountStats,
    /// Details of the first sent message.
    MessageDetails,
}

impl Step {
    /// Every step, in execution order.
    pub const ALL: [Step; 15] = [
        Step::ListSubAccounts,
        Step::CreateSubAccount,
        Step::CreateWebhook,
        Step::ListWebhooks,
        Step::AddDomain,
        Step::ListDomains,
        Step::ListIps,
        Step::CreateIpPool,
        Step::ListIpPools,
        Step::SendTransactionalEmail,
        Step::SendMarketingEmail,
        Step::SubAccountStats,
        Step::AggregateStats,
        Step::AccountStats,
        Step::MessageDetails,
    ];

    /// Position in the run, starting at 1.
    pub fn number(self) -> u8 {
        match self {
            Step::ListSubAccounts => 1,
            Step::CreateSubAccount => 2,
            Step::CreateWebhook => 3,
            Step::ListWebhooks => 4,
            Step::AddDomain => 5,
            Step::ListDomains => 6,
            Step::ListIps => 7,
            Step::CreateIpPool => 8,
            Step::ListIpPools => 9,
            Step::SendTransactionalEmail => 10,
            Step::SendMarketingEmail => 11,
            Step::SubAccountStats => 12,
            Step::AggregateStats => 13,
            Step::AccountStats => 14,
            Step::MessageDetails => 15,
        }
    }

    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            Step::ListSubAccounts => "List Sub-Accounts",
            Step::CreateSubAccount => "Create Sub-Account",
            Step::CreateWebhook => "Create Webhook",
            Step::ListWebhooks => "List Webhooks",
            Step::AddDomain => "Add Domain",
            Step::ListDomains => "List Domains",
            Step::ListIps => "List IPs",
            Step::CreateIpPool => "Create IP Pool",
            Step::ListIpPools => "List IP Pools",
            Step::SendTransactionalEmail => "Send Transactional Email",
            Step::SendMarketingEmail => "Send Marketing Email",
            Step::SubAccountStats => "Sub-Account Statistics",
            Step::AggregateStats => "Aggregate Statistics",
            Step::AccountStats => "Account Statistics",
            Step::MessageDetails => "Message Details",
        }
    }

    /// The key scope the step authenticates with.
    pub fn scope(self) -> AuthScope {
        match self {
            Step::AddDomain
            | Step::ListDomains
            | Step::SendTransactionalEmail
            | Step::SendMarketingEmail => AuthScope::SubAccount,
            _ => AuthScope::Account,
        }
    }

    /// Lower-case verb phrase used in failure summaries.
    pub(crate) fn action(self) -> &'static str {
        match self {
            Step::ListSubAccounts => "list sub-accounts",
            Step::CreateSubAccount => "create sub-account",
            Step::CreateWebhook => "create webhook",
            Step::ListWebhooks => "list webhooks",
            Step::AddDomain => "add domain",
            Step::ListDomains => "list domains",
            Step::ListIps => "list IPs",
            Step::CreateIpPool => "create IP pool",
            Step::ListIpPools => "list IP pools",
            Step::SendTransactionalEmail => "send transactional email",
            Step::SendMarketingEmail => "send marketing email",
            Step::SubAccountStats => "get sub-account statistics",
            Step::AggregateStats => "get aggregate statistics",
            Step::AccountStats => "get account statistics",
            Step::MessageDetails => "get message details",
        }
    }

    pub(crate) async fn run<A>(
        self,
        api: &A,
        ctx: &StepContext<'_>,
        state: &RunState,
    ) -> SendPostResult<StepOutcome>
    where
        A: SendPostApi + ?Sized,
    {
        let key = ctx.credentials.for_scope(self.scope());

        match self {
            Step::ListSubAccounts => list_sub_accounts(api, key, state).await,
            Step::CreateSubAccount => create_sub_account(api, key, state).await,
            Step::CreateWebhook => create_webhook(api, key, ctx.settings, state).await,
            Step::ListWebhooks => {
                let webhooks = api.list_webhooks(key).await?;
                for webhook in &webhooks {
                    debug!(id = ?webhook.id, url = ?webhook.url, enabled = ?webhook.enabled, "Webhook");
                }
                Ok(StepOutcome::unchanged(
                    format!("Retrieved {} webhook(s)", webhooks.len()),
                    state,
                ))
            }
            Step::AddDomain => add_domain(api, key, ctx.settings, state).await,
            Step::ListDomains => {
                let domains = api.list_domains(key).await?;
                for domain in &domains {
                    debug!(id = ?domain.id, name = ?domain.name, verified = ?domain.verified, "Domain");
                }
                Ok(StepOutcome::unchanged(
                    format!("Retrieved {} domain(s)", domains.len()),
                    state,
                ))
            }
            Step::ListIps => {
                let ips = api.list_ips(key).await?;
                for ip in &ips {
                    debug!(id = ?ip.id, public_ip = ?ip.public_ip, reverse_dns = ?ip.reverse_dns_hostname, "IP");
                }
                Ok(StepOutcome::unchanged(
                    format!("Retrieved {} IP(s)", ips.len()),
                    state,
                ))
            }
            Step::CreateIpPool => create_ip_pool(api, key, state).await,
            Step::ListIpPools => {
                let pools = api.list_ip_pools(key).await?;
                for pool in &pools {
                    debug!(
                        id = ?pool.id,
                        name = ?pool.name,
                        routing = ?pool.routing_strategy,
                        ips = pool.ips.as_ref().map_or(0, Vec::len),
                        "IP pool"
                    );
                }
                Ok(StepOutcome::unchanged(
                    format!("Retrieved {} IP pool(s)", pools.len()),
                    state,
                ))
            }
            Step::SendTransactionalEmail => {
                send_email(api, key, transactional_email(ctx.settings, state), state).await
            }
            Step::SendMarketingEmail => {
                send_email(api, key, marketing_email(ctx.settings, state), state).await
            }
            Step::SubAccountStats => sub_account_stats(api, key, ctx.window, state).await,
            Step::AggregateStats => aggregate_stats(api, key, ctx.window, state).await,
            Step::AccountStats => {
                let stats = api.account_stats(key, ctx.window).await?;
                let totals = StatTotals::from_daily(&stats);
                Ok(StepOutcome::unchanged(
                    format!(
                        "Retrieved {} stat record(s) for {}; processed {}, delivered {}",
                        stats.len(),
                        ctx.window,
                        totals.processed,
                        totals.delivered
                    ),
                    state,
                ))
            }
            Step::MessageDetails => message_details(api, key, state).await,
        }
    }
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Step {}: {}", self.number(), self.name())
    }
}

/// Read-only inputs shared by every step of a run.
pub(crate) struct StepContext<'a> {
    pub credentials: &'a Credentials,
    pub settings: &'a WorkflowSettings,
    pub window: StatsWindow,
}

/// Non-error result of a step.
#[derive(Debug)]
pub(crate) enum StepOutcome {
    /// The call succeeded; `state` replaces the run state.
    Completed { summary: String, state: RunState },
    /// A prerequisite was missing and no call was made.
    Skipped { reason: String },
}

impl StepOutcome {
    fn unchanged(summary: String, state: &RunState) -> Self {
        StepOutcome::Completed {
            summary,
            state: state.clone(),
        }
    }

    fn skipped(reason: &str) -> Self {
        StepOutcome::Skipped {
            reason: reason.to_string(),
        }
    }
}

fn unix_now() -> i64 {
    chrono::Utc::now().timestamp()
}

async fn list_sub_accounts<A: SendPostApi + ?Sized>(
    api: &A,
    key: &ScopedApiKey,
    state: &RunState,
) -> SendPostResult<StepOutcome> {
    let accounts = api.list_sub_accounts(key).await?;
    for account in &accounts {
        debug!(id = ?account.id, name = ?account.name, kind = ?account.kind(), blocked = ?account.blocked, "Sub-account");
    }

    let mut next = state.clone();
    let mut summary = format!("Retrieved {} sub-account(s)", accounts.len());

    // First in API order; the API guarantees no ordering.
    if next.sub_account_id.is_none() {
        if let Some(account) = accounts.iter().find(|account| account.id.is_some()) {
            next.sub_account_id = account.id;
            if let Some(api_key) = &account.api_key {
                next.sub_account_key = Some(api_key.clone());
            }
            if let Some(id) = account.id {
                summary.push_str(&format!("; selected sub-account {}", id));
            }
        }
    }

    Ok(StepOutcome::Completed {
        summary,
        state: next,
    })
}

async fn create_sub_account<A: SendPostApi + ?Sized>(
    api: &A,
    key: &ScopedApiKey,
    state: &RunState,
) -> SendPostResult<StepOutcome> {
    let name = format!("ESP Client - {}", unix_now());
    info!(name = %name, "Creating sub-account");

    let account = api
        .create_sub_account(key, &CreateSubAccountRequest::new(name.as_str()))
        .await?;

    let mut next = state.clone();
    if let Some(id) = account.id {
        next.sub_account_id = Some(id);
    }
    if let Some(api_key) = account.api_key {
        next.sub_account_key = Some(api_key);
    }

    let summary = match account.id {
        Some(id) => format!("Created sub-account '{}' (ID {})", name, id),
        None => format!("Created sub-account '{}'", name),
    };
    Ok(StepOutcome::Completed {
        summary,
        state: next,
    })
}

async fn create_webhook<A: SendPostApi + ?Sized>(
    api: &A,
    key: &ScopedApiKey,
    settings: &WorkflowSettings,
    state: &RunState,
) -> SendPostResult<StepOutcome> {
    info!(url = %settings.webhook_url, "Creating webhook");

    let webhook = api
        .create_webhook(key, &CreateWebhookRequest::all_events(settings.webhook_url.as_str()))
        .await?;

    let mut next = state.clone();
    if let Some(id) = webhook.id {
        next.webhook_id = Some(id);
    }

    let summary = match webhook.id {
        Some(id) => format!("Created webhook {} for {}", id, settings.webhook_url),
        None => format!("Created webhook for {}", settings.webhook_url),
    };
    Ok(StepOutcome::Completed {
        summary,
        state: next,
    })
}

async fn add_domain<A: SendPostApi + ?Sized>(
    api: &A,
    key: &ScopedApiKey,
    settings: &WorkflowSettings,
    state: &RunState,
) -> SendPostResult<StepOutcome> {
    info!(domain = %settings.domain, "Adding domain");

    let domain = api
        .create_domain(key, &CreateDomainRequest::new(settings.domain.as_str()))
        .await?;

    if let Some(dkim) = domain.dkim.as_ref().and_then(|record| record.text_value.as_deref()) {
        info!(dkim = %dkim, "Add the DKIM record to the domain's DNS to verify it");
    }

    let mut next = state.clone();
    if let Some(id) = domain.id {
        next.domain_id = Some(id.to_string());
    }

    let summary = match domain.id {
        Some(id) => format!("Added domain {} (ID {})", settings.domain, id),
        None => format!("Added domain {}", settings.domain),
    };
    Ok(StepOutcome::Completed {
        summary,
        state: next,
    })
}

async fn create_ip_pool<A: SendPostApi + ?Sized>(
    api: &A,
    key: &ScopedApiKey,
    state: &RunState,
) -> SendPostResult<StepOutcome> {
    let ips = api.list_ips(key).await?;
    let Some(first) = ips.first() else {
        return Ok(StepOutcome::skipped("No IPs available; allocate IPs first"));
    };

    let request = IpPoolCreateRequest {
        name: format!("Marketing Pool {}", unix_now()),
        routing_strategy: RoutingStrategy::RoundRobin,
        ips: first
            .public_ip
            .as_deref()
            .filter(|ip| !ip.is_empty())
            .map(PoolIp::new)
            .into_iter()
            .collect(),
        warmup_interval: POOL_WARMUP_HOURS,
        overflow_strategy: OverflowStrategy::None,
    };
    info!(
        name = %request.name,
        routing = %request.routing_strategy,
        ips = request.ips.len(),
        warmup_hours = request.warmup_interval,
        "Creating IP pool"
    );

    let pool = api.create_ip_pool(key, &request).await?;

    let mut next = state.clone();
    if let Some(id) = pool.id {
        next.ip_pool_id = Some(id);
    }
    if let Some(name) = &pool.name {
        next.ip_pool_name = Some(name.clone());
    }

    let summary = format!(
        "Created IP pool '{}' with {} IP(s)",
        pool.name.as_deref().unwrap_or(&request.name),
        pool.ips.as_ref().map_or(request.ips.len(), Vec::len)
    );
    Ok(StepOutcome::Completed {
        summary,
        state: next,
    })
}

fn transactional_email(settings: &WorkflowSettings, state: &RunState) -> EmailMessage {
    EmailMessage::builder(
        EmailAddress::named(settings.from_email.as_str(), "Your Company"),
        "Order Confirmation - Transactional Email",
    )
    .to(Recipient::named(settings.to_email.as_str(), "Customer")
        .custom_field("customer_id", "67890")
        .custom_field("order_value", "99.99"))
    .html_body(
        "<h1>Thank you for your order!</h1>\
         <p>Your order has been confirmed and will be processed shortly.</p>",
    )
    .text_body("Thank you for your order! Your order has been confirmed and will be processed shortly.")
    .track_all()
    .header("X-Order-ID", "12345")
    .header("X-Email-Type", "transactional")
    .ip_pool(state.ip_pool_name.clone())
    .build()
}

fn marketing_email(settings: &WorkflowSettings, state: &RunState) -> EmailMessage {
    EmailMessage::builder(
        EmailAddress::named(settings.from_email.as_str(), "Marketing Team"),
        "Special Offer - 20% Off Everything!",
    )
    .to(Recipient::named(settings.to_email.as_str(), "Customer 1"))
    .html_body(
        "<html><body>\
         <h1>Special Offer!</h1>\
         <p>Get 20% off on all products. Use code: <strong>SAVE20</strong></p>\
         <p><a href=\"https://example.com/shop\">Shop Now</a></p>\
         </body></html>",
    )
    .text_body("Special Offer! Get 20% off on all products. Use code: SAVE20. Visit: https://example.com/shop")
    .track_all()
    .group("marketing")
    .group("promotional")
    .header("X-Email-Type", "marketing")
    .header("X-Campaign-ID", "campaign-001")
    .ip_pool(state.ip_pool_name.clone())
    .build()
}

async fn send_email<A: SendPostApi + ?Sized>(
    api: &A,
    key: &ScopedApiKey,
    message: EmailMessage,
    state: &RunState,
) -> SendPostResult<StepOutcome> {
    info!(
        subject = %message.subject,
        recipients = message.to.len(),
        ip_pool = ?message.ip_pool,
        "Sending email"
    );

    let responses = api.send_email(key, &message).await?;
    let message_id = responses
        .first()
        .and_then(|response| response.message_id.clone());

    let mut next = state.clone();
    if next.sent_message_id.is_none() {
        next.sent_message_id = message_id.clone();
    }

    let summary = match message_id {
        Some(id) => format!("Sent '{}' (message ID {})", message.subject, id),
        None => format!("Sent '{}' (no message ID returned)", message.subject),
    };
    Ok(StepOutcome::Completed {
        summary,
        state: next,
    })
}

async fn sub_account_stats<A: SendPostApi + ?Sized>(
    api: &A,
    key: &ScopedApiKey,
    window: StatsWindow,
    state: &RunState,
) -> SendPostResult<StepOutcome> {
    let Some(id) = state.sub_account_id else {
        return Ok(StepOutcome::skipped(
            "No sub-account ID available; list or create a sub-account first",
        ));
    };

    let stats = api.sub_account_stats(key, id, window).await?;
    let totals = StatTotals::from_daily(&stats);

    Ok(StepOutcome::unchanged(
        format!(
            "Retrieved {} stat record(s) for sub-account {} ({}); processed {}, delivered {}",
            stats.len(),
            id,
            window,
            totals.processed,
            totals.delivered
        ),
        state,
    ))
}

async fn aggregate_stats<A: SendPostApi + ?Sized>(
    api: &A,
    key: &ScopedApiKey,
    window: StatsWindow,
    state: &RunState,
) -> SendPostResult<StepOutcome> {
    let Some(id) = state.sub_account_id else {
        return Ok(StepOutcome::skipped(
            "No sub-account ID available; list or create a sub-account first",
        ));
    };

    let counters = api.sub_account_aggregate_stats(key, id, window).await?;
    debug!(?counters, "Aggregate statistics");

    Ok(StepOutcome::unchanged(
        format!(
            "Aggregate for sub-account {} ({}): processed {}, delivered {}",
            id,
            window,
            counters.processed.unwrap_or(0),
            counters.delivered.unwrap_or(0)
        ),
        state,
    ))
}

async fn message_details<A: SendPostApi + ?Sized>(
    api: &A,
    key: &ScopedApiKey,
    state: &RunState,
) -> SendPostResult<StepOutcome> {
    let Some(message_id) = state.sent_message_id.as_deref() else {
        return Ok(StepOutcome::skipped(
            "No message ID available; no email was sent successfully",
        ));
    };

    let message = api.get_message(key, message_id).await?;
    debug!(
        subject = ?message.subject,
        ip_pool = ?message.ip_pool,
        attempts = ?message.attempt,
        "Message"
    );

    let summary = match message.subject.as_deref() {
        Some(subject) => format!("Retrieved message {} ('{}')", message_id, subject),
        None => format!("Retrieved message {}", message_id),
    };
    Ok(StepOutcome::unchanged(summary, state))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_order() {
        for (index, step) in Step::ALL.iter().enumerate() {
            assert_eq!(usize::from(step.number()), index + 1);
        }
        assert_eq!(Step::ALL.last(), Some(&Step::MessageDetails));
    }

    #[test]
    fn test_scopes() {
        let sub_account_steps: Vec<u8> = Step::ALL
            .iter()
            .filter(|step| step.scope() == AuthScope::SubAccount)
            .map(|step| step.number())
            .collect();

        assert_eq!(sub_account_steps, vec![5, 6, 10, 11]);
    }

    #[test]
    fn test_transactional_email_uses_pool_name() {
        let state = RunState {
            ip_pool_name: Some("Marketing Pool 1".to_string()),
            ..RunState::default()
        };

        let message = transactional_email(&WorkflowSettings::default(), &state);
        let json = serde_json::to_value(&message).unwrap();

        assert_eq!(json["ippool"], "Marketing Pool 1");
        assert_eq!(json["from"]["name"], "Your Company");
        assert_eq!(json["to"][0]["customFields"]["customer_id"], "67890");
        assert_eq!(json["headers"]["X-Order-ID"], "12345");
        assert_eq!(json["trackOpens"], true);
    }

    #[test]
    fn test_marketing_email_without_pool() {
        let message = marketing_email(&WorkflowSettings::default(), &RunState::default());
        let json = serde_json::to_value(&message).unwrap();

        assert!(json.get("ippool").is_none());
        assert_eq!(json["groups"], serde_json::json!(["marketing", "promotional"]));
        assert_eq!(json["headers"]["X-Campaign-ID"], "campaign-001");
    }

    #[test]
    fn test_display() {
        assert_eq!(Step::CreateIpPool.to_string(), "Step 8: Create IP Pool");
    }
}
