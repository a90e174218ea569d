pub mod message;
pub mod receipt;

pub use message::{Message, OutboundMessage, WebhookAcceptance};
pub use receipt::{DeliveryReceipt, RECEIPT_KEY_PREFIX, receipt_key};
