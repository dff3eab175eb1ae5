//! Messages service.

use async_trait::async_trait;

use super::{decode, path_segment};
use crate::auth::{AuthManager, ScopedApiKey};
use crate::errors::SendPostResult;
use crate::transport::{HttpTransport, QueryParams};
use crate::types::messages::Message;

/// Messages service trait.
#[async_trait]
pub trait MessagesService: Send + Sync {
    /// Retrieves a sent message by ID.
    async fn get(&self, key: &ScopedApiKey, message_id: &str) -> SendPostResult<Message>;
}

/// Default implementation of the messages service.
pub struct DefaultMessagesService<'a, T: ?Sized> {
    transport: &'a T,
    auth: &'a dyn AuthManager,
}

impl<'a, T: ?Sized> DefaultMessagesService<'a, T> {
    /// Creates a new messages service.
    pub fn new(transport: &'a T, auth: &'a dyn AuthManager) -> Self {
        Self { transport, auth }
    }
}

#[async_trait]
impl<T> MessagesService for DefaultMessagesService<'_, T>
where
    T: HttpTransport + ?Sized,
{
    async fn get(&self, key: &ScopedApiKey, message_id: &str) -> SendPostResult<Message> {
        let path = format!("/account/message/{}", path_segment(message_id)?);
        let response = self
            .transport
            .get(&path, QueryParams::new(), self.auth.get_headers(key))
            .await?;

        decode(&response)
    }
}
