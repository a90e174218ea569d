#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use messaging_scheduler::{
    application::{
        handlers::message_dispatcher::{DispatchConfig, MessageDispatchHandler},
        services::webhook::WebhookClient,
    },
    domain::{
        errors::{CacheError, DeliveryError, StoreError},
        models::{DeliveryReceipt, Message, OutboundMessage, WebhookAcceptance},
        repositories::{MessageRepository, ReceiptCache},
    },
    infrastructure::repositories::in_memory::InMemoryMessageRepository,
};

pub const PHONE: &str = "+905551111111";
pub const RECEIPT_TTL: Duration = Duration::from_secs(3600);

/// In-memory store whose reads and writes can be switched to fail.
#[derive(Default)]
pub struct FlakyMessageStore {
    pub inner: InMemoryMessageRepository,
    pub fail_fetch: AtomicBool,
    pub fail_mark_sent: AtomicBool,
    mark_sent_calls: AtomicUsize,
}

impl FlakyMessageStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Inserts `count` unsent messages with contents `message 1..=count`.
    pub async fn seed(&self, count: usize) {
        for n in 1..=count {
            self.inner.insert(format!("message {n}"), PHONE).await;
        }
    }

    pub async fn is_sent(&self, message_id: i64) -> bool {
        self.inner
            .get(message_id)
            .await
            .map(|m| m.is_sent)
            .unwrap_or(false)
    }

    pub fn mark_sent_calls(&self) -> usize {
        self.mark_sent_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MessageRepository for FlakyMessageStore {
    async fn fetch_unsent(&self, limit: u32) -> Result<Vec<Message>, StoreError> {
        if self.fail_fetch.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("connection refused".into()));
        }
        self.inner.fetch_unsent(limit).await
    }

    async fn mark_sent(&self, message_id: i64) -> Result<(), StoreError> {
        self.mark_sent_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_mark_sent.load(Ordering::SeqCst) {
            return Err(StoreError::Database("deadlock detected".into()));
        }
        self.inner.mark_sent(message_id).await
    }

    async fn list_sent(
        &self,
        limit: u32,
        offset: u32,
    ) -> Result<(Vec<Message>, bool), StoreError> {
        self.inner.list_sent(limit, offset).await
    }
}

/// Webhook that replays queued outcomes in order and records every request.
/// An empty queue answers with a transport error.
#[derive(Default)]
pub struct ScriptedWebhook {
    outcomes: Mutex<VecDeque<Result<WebhookAcceptance, DeliveryError>>>,
    requests: Mutex<Vec<OutboundMessage>>,
}

impl ScriptedWebhook {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn accept(&self, receipt_id: &str) {
        self.push(Ok(WebhookAcceptance {
            message_id: receipt_id.to_string(),
        }));
    }

    pub fn reject(&self, status: u16) {
        self.push(Err(DeliveryError::UnexpectedStatus { status }));
    }

    fn push(&self, outcome: Result<WebhookAcceptance, DeliveryError>) {
        self.outcomes.lock().unwrap().push_back(outcome);
    }

    pub fn requests(&self) -> Vec<OutboundMessage> {
        self.requests.lock().unwrap().clone()
    }

    pub fn contents(&self) -> Vec<String> {
        self.requests().into_iter().map(|r| r.content).collect()
    }
}

#[async_trait]
impl WebhookClient for ScriptedWebhook {
    async fn deliver(&self, message: &OutboundMessage) -> Result<WebhookAcceptance, DeliveryError> {
        self.requests.lock().unwrap().push(message.clone());
        self.outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(DeliveryError::Transport("no scripted outcome".into())))
    }
}

/// Cache that is always down.
#[derive(Default)]
pub struct UnavailableReceiptCache {
    attempts: AtomicUsize,
}

impl UnavailableReceiptCache {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ReceiptCache for UnavailableReceiptCache {
    async fn put(&self, _receipt: &DeliveryReceipt, _ttl: Duration) -> Result<(), CacheError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(CacheError::Backend("connection reset by peer".into()))
    }
}

pub fn dispatcher(
    store: Arc<dyn MessageRepository>,
    cache: Arc<dyn ReceiptCache>,
    webhook: Arc<dyn WebhookClient>,
    batch_size: u32,
) -> MessageDispatchHandler {
    MessageDispatchHandler::new(
        store,
        cache,
        webhook,
        DispatchConfig {
            batch_size,
            receipt_ttl: RECEIPT_TTL,
        },
    )
}
