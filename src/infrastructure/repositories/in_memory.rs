use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::{errors::StoreError, models::Message, repositories::MessageRepository};

#[derive(Default)]
pub struct InMemoryMessageRepository {
    messages: Arc<RwLock<BTreeMap<i64, Message>>>,
}

impl InMemoryMessageRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a new unsent message with the next id.
    pub async fn insert(&self, content: impl Into<String>, phone: impl Into<String>) -> Message {
        let mut messages = self.messages.write().await;
        let id = messages.keys().next_back().map_or(1, |last| last + 1);
        let message = Message {
            id,
            content: content.into(),
            phone: phone.into(),
            is_sent: false,
        };
        messages.insert(id, message.clone());
        message
    }

    pub async fn get(&self, message_id: i64) -> Option<Message> {
        let messages = self.messages.read().await;
        messages.get(&message_id).cloned()
    }
}

#[async_trait]
impl MessageRepository for InMemoryMessageRepository {
    async fn fetch_unsent(&self, limit: u32) -> Result<Vec<Message>, StoreError> {
        let messages = self.messages.read().await;
        Ok(messages
            .values()
            .filter(|m| !m.is_sent)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn mark_sent(&self, message_id: i64) -> Result<(), StoreError> {
        let mut messages = self.messages.write().await;
        if let Some(message) = messages.get_mut(&message_id) {
            message.is_sent = true;
        }
        Ok(())
    }

    async fn list_sent(
        &self,
        limit: u32,
        offset: u32,
    ) -> Result<(Vec<Message>, bool), StoreError> {
        let messages = self.messages.read().await;
        let mut sent = messages
            .values()
            .filter(|m| m.is_sent)
            .skip(offset as usize)
            .take(limit as usize + 1)
            .cloned()
            .collect::<Vec<_>>();

        let has_more = sent.len() > limit as usize;
        sent.truncate(limit as usize);
        Ok((sent, has_more))
    }
}
