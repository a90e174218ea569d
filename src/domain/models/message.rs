use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: i64,
    pub content: String,
    pub phone: String,
    pub is_sent: bool,
}

/// Body posted to the webhook for a single message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboundMessage {
    pub content: String,
    #[serde(rename = "to")]
    pub phone: String,
}

impl From<&Message> for OutboundMessage {
    fn from(message: &Message) -> Self {
        Self {
            content: message.content.clone(),
            phone: message.phone.clone(),
        }
    }
}

/// The part of a `202 Accepted` webhook response the pipeline relies on.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WebhookAcceptance {
    #[serde(rename = "messageId")]
    pub message_id: String,
}
