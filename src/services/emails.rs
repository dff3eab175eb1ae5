//! Email sending service.

use async_trait::async_trait;

use super::{decode, encode};
use crate::auth::{AuthManager, ScopedApiKey};
use crate::errors::SendPostResult;
use crate::transport::HttpTransport;
use crate::types::emails::{EmailMessage, EmailResponse};

const EMAIL_PATH: &str = "/subaccount/email/";

/// Emails service trait.
#[async_trait]
pub trait EmailsService: Send + Sync {
    /// Sends an email. Returns one entry per recipient.
    async fn send(&self, key: &ScopedApiKey, message: &EmailMessage)
        -> SendPostResult<Vec<EmailResponse>>;
}

/// Default implementation of the emails service.
pub struct DefaultEmailsService<'a, T: ?Sized> {
    transport: &'a T,
    auth: &'a dyn AuthManager,
}

impl<'a, T: ?Sized> DefaultEmailsService<'a, T> {
    /// Creates a new emails service.
    pub fn new(transport: &'a T, auth: &'a dyn AuthManager) -> Self {
        Self { transport, auth }
    }
}

#[async_trait]
impl<T> EmailsService for DefaultEmailsService<'_, T>
where
    T: HttpTransport + ?Sized,
{
    async fn send(
        &self,
        key: &ScopedApiKey,
        message: &EmailMessage,
    ) -> SendPostResult<Vec<EmailResponse>> {
        let response = self
            .transport
            .post(EMAIL_PATH, self.auth.get_headers(key), encode(message)?)
            .await?;

        decode(&response)
    }
}
