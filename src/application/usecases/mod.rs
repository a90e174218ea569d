pub mod control_scheduler;
pub mod list_sent_messages;
