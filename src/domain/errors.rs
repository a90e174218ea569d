use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Cache(#[from] CacheError),
    #[error(transparent)]
    Delivery(#[from] DeliveryError),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Failures raised by a [`MessageRepository`](crate::domain::repositories::MessageRepository).
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("message store query failed: {0}")]
    Database(String),
    #[error("message store unavailable: {0}")]
    Unavailable(String),
}

/// Failures raised by a [`ReceiptCache`](crate::domain::repositories::ReceiptCache).
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("receipt cache backend failed: {0}")]
    Backend(String),
    #[error("receipt could not be serialized: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Failures of a single webhook delivery attempt.
#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("webhook request failed: {0}")]
    Transport(String),
    #[error("webhook did not accept the message: HTTP {status}")]
    UnexpectedStatus { status: u16 },
    #[error("webhook response could not be parsed: {0}")]
    InvalidResponse(String),
}
