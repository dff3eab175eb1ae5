//! Sub-accounts service.

use async_trait::async_trait;

use super::{decode, encode};
use crate::auth::{AuthManager, ScopedApiKey};
use crate::errors::SendPostResult;
use crate::transport::{HttpTransport, QueryParams};
use crate::types::sub_accounts::{CreateSubAccountRequest, SubAccount};

const SUB_ACCOUNTS_PATH: &str = "/account/subaccount/";

/// Sub-accounts service trait.
#[async_trait]
pub trait SubAccountsService: Send + Sync {
    /// Lists all sub-accounts of the account.
    async fn list(&self, key: &ScopedApiKey) -> SendPostResult<Vec<SubAccount>>;

    /// Creates a sub-account.
    async fn create(
        &self,
        key: &ScopedApiKey,
        request: &CreateSubAccountRequest,
    ) -> SendPostResult<SubAccount>;
}

/// Default implementation of the sub-accounts service.
pub struct DefaultSubAccountsService<'a, T: ?Sized> {
    transport: &'a T,
    auth: &'a dyn AuthManager,
}

impl<'a, T: ?Sized> DefaultSubAccountsService<'a, T> {
    /// Creates a new sub-accounts service.
    pub fn new(transport: &'a T, auth: &'a dyn AuthManager) -> Self {
        Self { transport, auth }
    }
}

#[async_trait]
impl<T> SubAccountsService for DefaultSubAccountsService<'_, T>
where
    T: HttpTransport + ?Sized,
{
    async fn list(&self, key: &ScopedApiKey) -> SendPostResult<Vec<SubAccount>> {
        let response = self
            .transport
            .get(SUB_ACCOUNTS_PATH, QueryParams::new(), self.auth.get_headers(key))
            .await?;

        decode(&response)
    }

    async fn create(
        &self,
        key: &ScopedApiKey,
        request: &CreateSubAccountRequest,
    ) -> SendPostResult<SubAccount> {
        let response = self
            .transport
            .post(SUB_ACCOUNTS_PATH, self.auth.get_headers(key), encode(request)?)
            .await?;

        decode(&response)
    }
}
