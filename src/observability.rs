//! Tracing/logging initialization.

use tracing_subscriber::{EnvFilter, filter::LevelFilter};

use crate::config::{Config, Environment};

/// Initialize tracing for the process.
///
/// Development gets human-readable output at debug level. Everything else
/// gets JSON lines filtered by `RUST_LOG`, falling back to `LOG_LEVEL`.
/// Safe to call multiple times (subsequent calls are no-ops).
pub fn init(config: &Config) {
    match config.environment {
        Environment::Development => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(EnvFilter::new("debug"))
                .try_init();
        }
        Environment::Production => {
            let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                EnvFilter::default().add_directive(parse_level(&config.log_level).into())
            });

            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .json()
                .with_timer(tracing_subscriber::fmt::time::SystemTime)
                .with_target(false)
                .try_init();
        }
    }
}

fn parse_level(value: &str) -> LevelFilter {
    value.trim().parse::<LevelFilter>().unwrap_or_else(|_| {
        // The subscriber is not installed yet.
        eprintln!("invalid LOG_LEVEL {value:?}, using default \"info\"");
        LevelFilter::INFO
    })
}
