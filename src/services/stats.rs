//! Statistics service.

use async_trait::async_trait;

use super::decode;
use crate::auth::{AuthManager, ScopedApiKey};
use crate::errors::SendPostResult;
use crate::transport::{HttpTransport, QueryParams};
use crate::types::stats::{DailyStat, StatCounters, StatsWindow};

/// Statistics service trait.
#[async_trait]
pub trait StatsService: Send + Sync {
    /// Daily statistics for one sub-account.
    async fn sub_account_daily(
        &self,
        key: &ScopedApiKey,
        sub_account_id: i64,
        window: StatsWindow,
    ) -> SendPostResult<Vec<DailyStat>>;

    /// Aggregate statistics for one sub-account.
    async fn sub_account_aggregate(
        &self,
        key: &ScopedApiKey,
        sub_account_id: i64,
        window: StatsWindow,
    ) -> SendPostResult<StatCounters>;

    /// Daily statistics for the whole account.
    async fn account_daily(
        &self,
        key: &ScopedApiKey,
        window: StatsWindow,
    ) -> SendPostResult<Vec<DailyStat>>;
}

/// Default implementation of the statistics service.
pub struct DefaultStatsService<'a, T: ?Sized> {
    transport: &'a T,
    auth: &'a dyn AuthManager,
}

impl<'a, T: ?Sized> DefaultStatsService<'a, T> {
    /// Creates a new statistics service.
    pub fn new(transport: &'a T, auth: &'a dyn AuthManager) -> Self {
        Self { transport, auth }
    }
}

fn window_query(window: StatsWindow) -> QueryParams {
    let (from, to) = window.query_dates();
    vec![("from".to_string(), from), ("to".to_string(), to)]
}

#[async_trait]
impl<T> StatsService for DefaultStatsService<'_, T>
where
    T: HttpTransport + ?Sized,
{
    async fn sub_account_daily(
        &self,
        key: &ScopedApiKey,
        sub_account_id: i64,
        window: StatsWindow,
    ) -> SendPostResult<Vec<DailyStat>> {
        let path = format!("/account/subaccount/stat/{}", sub_account_id);
        let response = self
            .transport
            .get(&path, window_query(window), self.auth.get_headers(key))
            .await?;

        decode(&response)
    }

    async fn sub_account_aggregate(
        &self,
        key: &ScopedApiKey,
        sub_account_id: i64,
        window: StatsWindow,
    ) -> SendPostResult<StatCounters> {
        let path = format!("/account/subaccount/stat/{}/aggregate", sub_account_id);
        let response = self
            .transport
            .get(&path, window_query(window), self.auth.get_headers(key))
            .await?;

        decode(&response)
    }

    async fn account_daily(
        &self,
        key: &ScopedApiKey,
        window: StatsWindow,
    ) -> SendPostResult<Vec<DailyStat>> {
        let response = self
            .transport
            .get("/account/stat", window_query(window), self.auth.get_headers(key))
            .await?;

        decode(&response)
    }
}
