use async_trait::async_trait;

use crate::domain::{
    errors::DeliveryError,
    models::{OutboundMessage, WebhookAcceptance},
};

#[async_trait]
pub trait WebhookClient: Send + Sync {
    /// Only a `202 Accepted` with a parseable body counts as delivered.
    async fn deliver(&self, message: &OutboundMessage) -> Result<WebhookAcceptance, DeliveryError>;
}
