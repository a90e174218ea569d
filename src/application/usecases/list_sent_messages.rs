use std::sync::Arc;

use crate::domain::{models::Message, repositories::MessageRepository};

const DEFAULT_LIMIT: u32 = 10;
const MAX_LIMIT: u32 = 100;

pub struct SentMessagesPage {
    pub messages: Vec<Message>,
    pub has_more: bool,
    pub next_offset: Option<u32>,
}

pub struct ListSentMessagesUseCase {
    repo: Arc<dyn MessageRepository>,
}

impl ListSentMessagesUseCase {
    pub fn new(repo: Arc<dyn MessageRepository>) -> Self {
        Self { repo }
    }

    pub async fn execute(
        &self,
        limit: Option<u32>,
        offset: Option<u32>,
    ) -> anyhow::Result<SentMessagesPage> {
        let limit = limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
        let offset = offset.unwrap_or(0);

        let (messages, has_more) = self.repo.list_sent(limit, offset).await?;
        let next_offset = has_more.then(|| offset + messages.len() as u32);

        Ok(SentMessagesPage {
            messages,
            has_more,
            next_offset,
        })
    }
}
