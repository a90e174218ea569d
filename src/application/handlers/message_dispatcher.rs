use std::{sync::Arc, time::Duration};

use chrono::Utc;
use tracing::{debug, error, info, warn};

use crate::{
    application::services::webhook::WebhookClient,
    domain::{
        models::{DeliveryReceipt, Message, OutboundMessage},
        repositories::{MessageRepository, ReceiptCache},
    },
};

#[derive(Debug, Clone)]
pub struct DispatchConfig {
    pub batch_size: u32,
    pub receipt_ttl: Duration,
}

/// Counters for one pipeline invocation.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DispatchSummary {
    pub fetched: usize,
    pub delivered: usize,
    pub marked_sent: usize,
    pub cached: usize,
    pub failed: usize,
}

/// Sends one batch of unsent messages to the webhook.
///
/// Messages are handled one after another. A failure on one message is logged
/// and the batch moves on; nothing is retried or rolled back, so a message that
/// was accepted by the webhook but not marked sent is delivered again later.
pub struct MessageDispatchHandler {
    message_repo: Arc<dyn MessageRepository>,
    receipt_cache: Arc<dyn ReceiptCache>,
    webhook: Arc<dyn WebhookClient>,
    config: DispatchConfig,
}

impl MessageDispatchHandler {
    pub fn new(
        message_repo: Arc<dyn MessageRepository>,
        receipt_cache: Arc<dyn ReceiptCache>,
        webhook: Arc<dyn WebhookClient>,
        config: DispatchConfig,
    ) -> Self {
        Self {
            message_repo,
            receipt_cache,
            webhook,
            config,
        }
    }

    pub async fn handle(&self) -> DispatchSummary {
        info!("messaging job started");
        let mut summary = DispatchSummary::default();

        let messages = match self.message_repo.fetch_unsent(self.config.batch_size).await {
            Ok(messages) => messages,
            Err(err) => {
                error!(error = %err, "messages could not be fetched");
                return summary;
            }
        };

        if messages.is_empty() {
            warn!("no new messages");
            return summary;
        }
        summary.fetched = messages.len();

        for message in &messages {
            self.dispatch(message, &mut summary).await;
        }

        info!(
            fetched = summary.fetched,
            delivered = summary.delivered,
            marked_sent = summary.marked_sent,
            cached = summary.cached,
            failed = summary.failed,
            "messaging job finished"
        );
        summary
    }

    async fn dispatch(&self, message: &Message, summary: &mut DispatchSummary) {
        let sent_at = Utc::now();

        let acceptance = match self.webhook.deliver(&OutboundMessage::from(message)).await {
            Ok(acceptance) => acceptance,
            Err(err) => {
                summary.failed += 1;
                error!(message_id = message.id, error = %err, "message could not be sent");
                return;
            }
        };
        summary.delivered += 1;

        if let Err(err) = self.message_repo.mark_sent(message.id).await {
            summary.failed += 1;
            error!(
                message_id = message.id,
                receipt_id = %acceptance.message_id,
                error = %err,
                "message was delivered but could not be marked as sent"
            );
            return;
        }
        summary.marked_sent += 1;

        let receipt = DeliveryReceipt::new(acceptance.message_id, sent_at);
        match self.receipt_cache.put(&receipt, self.config.receipt_ttl).await {
            Ok(()) => {
                summary.cached += 1;
                debug!(message_id = message.id, receipt_id = %receipt.message_id, "receipt cached");
            }
            Err(err) => {
                warn!(
                    message_id = message.id,
                    receipt_id = %receipt.message_id,
                    error = %err,
                    "receipt could not be cached"
                );
            }
        }
    }
}
