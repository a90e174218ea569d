//! Periodic webhook dispatch of pending messages.
//!
//! A [`Scheduler`](application::services::scheduler::Scheduler) fires the
//! [`MessageDispatchHandler`](application::handlers::message_dispatcher::MessageDispatchHandler)
//! on a fixed interval. Each run sends a small batch of unsent messages to the
//! webhook, marks them sent and caches a short-lived delivery receipt.

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod observability;
pub mod presentation;
