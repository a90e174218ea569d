use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::debug;

use crate::{
    application::services::webhook::WebhookClient,
    domain::{
        errors::DeliveryError,
        models::{OutboundMessage, WebhookAcceptance},
    },
};

#[derive(Debug, Clone)]
pub struct WebhookClientConfig {
    pub url: String,
    pub timeout: Duration,
}

pub struct HttpWebhookClient {
    http: Client,
    url: String,
}

impl HttpWebhookClient {
    pub fn new(config: WebhookClientConfig) -> anyhow::Result<Arc<Self>> {
        let http = Client::builder()
            .user_agent("messaging-scheduler/webhook")
            .timeout(config.timeout)
            .build()
            .context("failed to build webhook client")?;

        Ok(Arc::new(Self {
            http,
            url: config.url,
        }))
    }
}

#[async_trait]
impl WebhookClient for HttpWebhookClient {
    async fn deliver(&self, message: &OutboundMessage) -> Result<WebhookAcceptance, DeliveryError> {
        let response = self
            .http
            .post(&self.url)
            .json(message)
            .send()
            .await
            .map_err(|err| DeliveryError::Transport(err.to_string()))?;

        let status = response.status();
        if status != StatusCode::ACCEPTED {
            return Err(DeliveryError::UnexpectedStatus {
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|err| DeliveryError::Transport(err.to_string()))?;

        let acceptance = serde_json::from_str::<WebhookAcceptance>(&body)
            .map_err(|err| DeliveryError::InvalidResponse(format!("{err}; body={body}")))?;

        debug!(receipt_id = %acceptance.message_id, "webhook accepted message");
        Ok(acceptance)
    }
}
