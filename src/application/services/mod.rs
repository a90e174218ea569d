pub mod scheduler;
pub mod webhook;
