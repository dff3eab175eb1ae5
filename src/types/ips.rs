//! Dedicated IP and IP pool types.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A dedicated sending IP.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ip {
    /// IP ID.
    pub id: Option<i64>,
    /// Public address.
    #[serde(rename = "publicIP")]
    pub public_ip: Option<String>,
    /// Reverse DNS hostname.
    #[serde(rename = "reverseDNSHostname")]
    pub reverse_dns_hostname: Option<String>,
    /// Creation timestamp.
    pub created: Option<i64>,
}

/// An IP reference inside a pool request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PoolIp {
    /// Public address.
    #[serde(rename = "publicIP")]
    pub public_ip: String,
}

impl PoolIp {
    /// Creates a pool IP reference.
    pub fn new(public_ip: impl Into<String>) -> Self {
        Self {
            public_ip: public_ip.into(),
        }
    }
}

/// How a pool spreads traffic over its IPs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoutingStrategy {
    /// Rotate through IPs in order.
    RoundRobin,
    /// Route by recipient mailbox provider.
    EmailProvider,
    /// A value this client does not know.
    Other(i64),
}

impl RoutingStrategy {
    /// Returns the wire value.
    pub fn code(self) -> i64 {
        match self {
            RoutingStrategy::RoundRobin => 0,
            RoutingStrategy::EmailProvider => 1,
            RoutingStrategy::Other(code) => code,
        }
    }
}

impl From<i64> for RoutingStrategy {
    fn from(code: i64) -> Self {
        match code {
            0 => RoutingStrategy::RoundRobin,
            1 => RoutingStrategy::EmailProvider,
            other => RoutingStrategy::Other(other),
        }
    }
}

impl std::fmt::Display for RoutingStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RoutingStrategy::RoundRobin => write!(f, "Round Robin"),
            RoutingStrategy::EmailProvider => write!(f, "Email Provider"),
            RoutingStrategy::Other(code) => write!(f, "Strategy {}", code),
        }
    }
}

impl Serialize for RoutingStrategy {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.code())
    }
}

impl<'de> Deserialize<'de> for RoutingStrategy {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        i64::deserialize(deserializer).map(RoutingStrategy::from)
    }
}

/// What happens when a pool's IPs are saturated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverflowStrategy {
    /// No overflow.
    None,
    /// Spill into the overflow pool.
    UseOverflowPool,
}

impl Serialize for OverflowStrategy {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(match self {
            OverflowStrategy::None => 0,
            OverflowStrategy::UseOverflowPool => 1,
        })
    }
}

/// An IP pool.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IpPool {
    /// Pool ID.
    pub id: Option<i64>,
    /// Pool name.
    pub name: Option<String>,
    /// Routing strategy.
    pub routing_strategy: Option<RoutingStrategy>,
    /// Member IPs.
    pub ips: Option<Vec<Ip>>,
    /// Warmup interval in hours.
    pub warmup_interval: Option<i64>,
    /// Creation timestamp.
    pub created: Option<i64>,
}

/// Request to create an IP pool.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IpPoolCreateRequest {
    /// Pool name.
    pub name: String,
    /// Routing strategy.
    pub routing_strategy: RoutingStrategy,
    /// Member IPs.
    pub ips: Vec<PoolIp>,
    /// Warmup interval in hours, must be positive.
    pub warmup_interval: i64,
    /// Overflow strategy.
    pub overflow_strategy: OverflowStrategy,
}
