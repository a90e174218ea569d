use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::{sync::RwLock, time::Instant};

use crate::domain::{
    errors::CacheError,
    models::{DeliveryReceipt, receipt_key},
    repositories::ReceiptCache,
};

struct CachedReceipt {
    payload: String,
    expires_at: Instant,
}

/// Process-local receipt cache with the same key and payload layout as Redis.
#[derive(Default)]
pub struct InMemoryReceiptCache {
    entries: Arc<RwLock<HashMap<String, CachedReceipt>>>,
}

impl InMemoryReceiptCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, message_id: &str) -> Option<DeliveryReceipt> {
        let entries = self.entries.read().await;
        entries
            .get(&receipt_key(message_id))
            .filter(|entry| entry.expires_at > Instant::now())
            .and_then(|entry| serde_json::from_str(&entry.payload).ok())
    }

    /// Number of entries that have not expired yet.
    pub async fn len(&self) -> usize {
        let now = Instant::now();
        let entries = self.entries.read().await;
        entries.values().filter(|entry| entry.expires_at > now).count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl ReceiptCache for InMemoryReceiptCache {
    async fn put(&self, receipt: &DeliveryReceipt, ttl: Duration) -> Result<(), CacheError> {
        let payload = serde_json::to_string(receipt)?;
        let mut entries = self.entries.write().await;
        entries.insert(
            receipt.cache_key(),
            CachedReceipt {
                payload,
                expires_at: Instant::now() + ttl,
            },
        );
        Ok(())
    }
}
