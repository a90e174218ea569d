use std::time::Duration;

use async_trait::async_trait;

use crate::domain::{
    errors::{CacheError, StoreError},
    models::{DeliveryReceipt, Message},
};

#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// Unsent messages, oldest id first, at most `limit` of them.
    async fn fetch_unsent(&self, limit: u32) -> Result<Vec<Message>, StoreError>;

    /// Flips a message from unsent to sent. Marking an already sent message is not an error.
    async fn mark_sent(&self, message_id: i64) -> Result<(), StoreError>;

    async fn list_sent(
        &self,
        limit: u32,
        offset: u32,
    ) -> Result<(Vec<Message>, bool), StoreError>;
}

#[async_trait]
pub trait ReceiptCache: Send + Sync {
    async fn put(&self, receipt: &DeliveryReceipt, ttl: Duration) -> Result<(), CacheError>;
}
