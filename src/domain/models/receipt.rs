use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

pub const RECEIPT_KEY_PREFIX: &str = "messages:";

pub fn receipt_key(message_id: &str) -> String {
    format!("{RECEIPT_KEY_PREFIX}{message_id}")
}

/// Proof that the webhook accepted a message.
///
/// `message_id` is the identifier returned by the webhook, not the store id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryReceipt {
    pub message_id: String,
    pub sending_time: String,
}

impl DeliveryReceipt {
    pub fn new(message_id: impl Into<String>, sent_at: DateTime<Utc>) -> Self {
        Self {
            message_id: message_id.into(),
            sending_time: sent_at.to_rfc3339_opts(SecondsFormat::Secs, true),
        }
    }

    pub fn cache_key(&self) -> String {
        receipt_key(&self.message_id)
    }
}
