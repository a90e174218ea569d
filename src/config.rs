use std::env::var;
use std::time::Duration;

use dotenvy::dotenv;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_SCHEDULER_INTERVAL_SECS: i64 = 120;
const DEFAULT_REDIS_TTL_SECS: u64 = 3600;
const DEFAULT_WEBHOOK_TIMEOUT_SECS: u64 = 30;
const DEFAULT_BATCH_SIZE: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub scheme: String,
    pub host: String,
    pub database_url: String,
    pub redis_url: String,
    pub webhook_url: String,
    pub webhook_timeout: Duration,
    /// Kept signed so a non-positive value reaches the scheduler and is rejected there.
    pub scheduler_interval_secs: i64,
    pub receipt_ttl: Duration,
    pub batch_size: u32,
    pub environment: Environment,
    pub log_level: String,
}

impl Config {
    pub fn try_parse() -> Result<Config, &'static str> {
        let _ = dotenv();
        Self::from_lookup(|key| var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Config, &'static str>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup("PORT") {
            Some(value) => value
                .trim()
                .parse::<u16>()
                .map_err(|_| "An error occured while parsing PORT env param")?,
            None => DEFAULT_PORT,
        };

        // Unparseable values fall back to the default, like the interval.
        let receipt_ttl_secs = lookup("REDIS_TTL")
            .and_then(|value| value.trim().parse::<u64>().ok())
            .unwrap_or(DEFAULT_REDIS_TTL_SECS);
        if receipt_ttl_secs == 0 {
            return Err("REDIS_TTL env param must be greater than zero");
        }

        let webhook_timeout_secs = match lookup("WEBHOOK_TIMEOUT") {
            Some(value) => value
                .trim()
                .parse::<u64>()
                .map_err(|_| "An error occured while parsing WEBHOOK_TIMEOUT env param")?,
            None => DEFAULT_WEBHOOK_TIMEOUT_SECS,
        };
        if webhook_timeout_secs == 0 {
            return Err("WEBHOOK_TIMEOUT env param must be greater than zero");
        }

        let batch_size = match lookup("BATCH_SIZE") {
            Some(value) => value
                .trim()
                .parse::<u32>()
                .map_err(|_| "An error occured while parsing BATCH_SIZE env param")?,
            None => DEFAULT_BATCH_SIZE,
        };
        if batch_size == 0 {
            return Err("BATCH_SIZE env param must be greater than zero");
        }

        let environment = match lookup("ENVIRONMENT") {
            Some(value) if value.eq_ignore_ascii_case("development") => Environment::Development,
            _ => Environment::Production,
        };

        Ok(Config {
            port,
            scheme: lookup("SCHEME").unwrap_or_else(|| "http".to_string()),
            host: lookup("HOST").unwrap_or_else(|| "localhost".to_string()),
            database_url: lookup("POSTGRES_URI")
                .ok_or("An error occured while getting POSTGRES_URI env param")?,
            redis_url: lookup("REDIS_URL").unwrap_or_else(|| "redis://127.0.0.1:6379".to_string()),
            webhook_url: lookup("WEBHOOK_URL")
                .ok_or("An error occured while getting WEBHOOK_URL env param")?,
            webhook_timeout: Duration::from_secs(webhook_timeout_secs),
            scheduler_interval_secs: lookup("SCHEDULER_INTERVAL")
                .and_then(|value| value.trim().parse::<i64>().ok())
                .unwrap_or(DEFAULT_SCHEDULER_INTERVAL_SECS),
            receipt_ttl: Duration::from_secs(receipt_ttl_secs),
            batch_size,
            environment,
            log_level: lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
        })
    }

    pub fn server_url(&self) -> String {
        format!("{}://{}:{}", self.scheme, self.host, self.port)
    }
}
