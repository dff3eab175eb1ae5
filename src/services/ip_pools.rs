//! IP pools service.

use async_trait::async_trait;

use super::{decode, encode};
use crate::auth::{AuthManager, ScopedApiKey};
use crate::errors::SendPostResult;
use crate::transport::{HttpTransport, QueryParams};
use crate::types::ips::{IpPool, IpPoolCreateRequest};

const IP_POOLS_PATH: &str = "/account/ippool";

/// IP pools service trait.
#[async_trait]
pub trait IpPoolsService: Send + Sync {
    /// Creates an IP pool.
    async fn create(&self, key: &ScopedApiKey, request: &IpPoolCreateRequest)
        -> SendPostResult<IpPool>;

    /// Lists all IP pools.
    async fn list(&self, key: &ScopedApiKey) -> SendPostResult<Vec<IpPool>>;
}

/// Default implementation of the IP pools service.
pub struct DefaultIpPoolsService<'a, T: ?Sized> {
    transport: &'a T,
    auth: &'a dyn AuthManager,
}

impl<'a, T: ?Sized> DefaultIpPoolsService<'a, T> {
    /// Creates a new IP pools service.
    pub fn new(transport: &'a T, auth: &'a dyn AuthManager) -> Self {
        Self { transport, auth }
    }
}

#[async_trait]
impl<T> IpPoolsService for DefaultIpPoolsService<'_, T>
where
    T: HttpTransport + ?Sized,
{
    async fn create(
        &self,
        key: &ScopedApiKey,
        request: &IpPoolCreateRequest,
    ) -> SendPostResult<IpPool> {
        let response = self
            .transport
            .post(IP_POOLS_PATH, self.auth.get_headers(key), encode(request)?)
            .await?;

        decode(&response)
    }

    async fn list(&self, key: &ScopedApiKey) -> SendPostResult<Vec<IpPool>> {
        let response = self
            .transport
            .get(IP_POOLS_PATH, QueryParams::new(), self.auth.get_headers(key))
            .await?;

        decode(&response)
    }
}
