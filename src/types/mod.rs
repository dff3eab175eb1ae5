//! Type definitions for the SendPost API.

pub mod domains;
pub mod emails;
pub mod ips;
pub mod messages;
pub mod stats;
pub mod sub_accounts;
pub mod webhooks;

pub use domains::{CreateDomainRequest, DnsRecord, Domain};
pub use emails::{EmailAddress, EmailMessage, EmailMessageBuilder, EmailResponse, Recipient};
pub use ips::{Ip, IpPool, IpPoolCreateRequest, OverflowStrategy, PoolIp, RoutingStrategy};
pub use messages::{Message, MessageParty};
pub use stats::{DailyStat, StatCounters, StatTotals, StatsWindow};
pub use sub_accounts::{CreateSubAccountRequest, SubAccount, SubAccountKind};
pub use webhooks::{CreateWebhookRequest, Webhook};
