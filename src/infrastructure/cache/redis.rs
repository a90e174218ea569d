use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use redis::{Client, aio::ConnectionManager};
use tracing::{debug, info};

use crate::domain::{errors::CacheError, models::DeliveryReceipt, repositories::ReceiptCache};

/// Receipt cache backed by Redis `SET key value PX ttl_ms`.
///
/// The connection manager reconnects on its own, so calls simply fail with
/// [`CacheError::Backend`] while Redis is unreachable.
#[derive(Clone)]
pub struct RedisReceiptCache {
    conn: ConnectionManager,
}

impl RedisReceiptCache {
    pub async fn connect(redis_url: &str) -> Result<Arc<Self>, CacheError> {
        let client = Client::open(redis_url)?;
        let conn = ConnectionManager::new(client).await?;
        info!("redis connection established");
        Ok(Arc::new(Self { conn }))
    }
}

#[async_trait]
impl ReceiptCache for RedisReceiptCache {
    async fn put(&self, receipt: &DeliveryReceipt, ttl: Duration) -> Result<(), CacheError> {
        let payload = serde_json::to_string(receipt)?;
        let key = receipt.cache_key();
        let mut conn = self.conn.clone();

        redis::cmd("SET")
            .arg(&key)
            .arg(payload)
            .arg("PX")
            .arg(expiry_millis(ttl))
            .query_async::<_, ()>(&mut conn)
            .await?;

        debug!(key = %key, ttl_ms = expiry_millis(ttl), "receipt stored in redis");
        Ok(())
    }
}

/// Redis rejects a zero expiry, so anything under a millisecond becomes one.
fn expiry_millis(ttl: Duration) -> u64 {
    u64::try_from(ttl.as_millis()).unwrap_or(u64::MAX).max(1)
}

impl From<redis::RedisError> for CacheError {
    fn from(err: redis::RedisError) -> Self {
        CacheError::Backend(err.to_string())
    }
}
