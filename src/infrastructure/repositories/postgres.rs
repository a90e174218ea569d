use std::{sync::Arc, time::Duration};

use anyhow::Context;
use async_trait::async_trait;
use sqlx::{FromRow, Pool, Postgres, postgres::PgPoolOptions};
use tracing::{debug, info};

use crate::domain::{errors::StoreError, models::Message, repositories::MessageRepository};

pub type PgPool = Pool<Postgres>;

/// Opens the pool and applies pending migrations.
pub async fn connect(database_url: &str) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .acquire_timeout(Duration::from_secs(5))
        .connect(database_url)
        .await
        .context("postgres connection failed")?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("postgres migrations failed")?;

    info!("postgres connection established");
    Ok(pool)
}

#[derive(Clone)]
pub struct PostgresMessageRepository {
    pool: PgPool,
}

impl PostgresMessageRepository {
    pub fn new(pool: PgPool) -> Arc<Self> {
        Arc::new(Self { pool })
    }
}

#[async_trait]
impl MessageRepository for PostgresMessageRepository {
    async fn fetch_unsent(&self, limit: u32) -> Result<Vec<Message>, StoreError> {
        let records = sqlx::query_as::<_, MessageRecord>(
            r#"
            SELECT id, content, phone, is_sent
            FROM messages
            WHERE is_sent = FALSE
            ORDER BY id ASC
            LIMIT $1
            "#,
        )
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await?;

        debug!(count = records.len(), "unsent messages fetched");
        Ok(records.into_iter().map(Message::from).collect())
    }

    async fn mark_sent(&self, message_id: i64) -> Result<(), StoreError> {
        // Only unsent rows are touched.
        let result = sqlx::query(
            r#"
            UPDATE messages
            SET is_sent = TRUE
            WHERE id = $1
              AND is_sent = FALSE
            "#,
        )
        .bind(message_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            debug!(message_id, "message was already marked as sent");
        }
        Ok(())
    }

    async fn list_sent(
        &self,
        limit: u32,
        offset: u32,
    ) -> Result<(Vec<Message>, bool), StoreError> {
        let limit = i64::from(limit);

        // One extra row tells us whether another page exists.
        let records = sqlx::query_as::<_, MessageRecord>(
            r#"
            SELECT id, content, phone, is_sent
            FROM messages
            WHERE is_sent = TRUE
            ORDER BY id ASC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit + 1)
        .bind(i64::from(offset))
        .fetch_all(&self.pool)
        .await?;

        let has_more = records.len() as i64 > limit;
        let messages = records
            .into_iter()
            .take(limit as usize)
            .map(Message::from)
            .collect();

        Ok((messages, has_more))
    }
}

#[derive(FromRow)]
struct MessageRecord {
    id: i64,
    content: String,
    phone: String,
    is_sent: bool,
}

impl From<MessageRecord> for Message {
    fn from(value: MessageRecord) -> Self {
        Self {
            id: value.id,
            content: value.content,
            phone: value.phone,
            is_sent: value.is_sent,
        }
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                StoreError::Unavailable(err.to_string())
            }
            other => StoreError::Database(other.to_string()),
        }
    }
}
