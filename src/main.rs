use std::{sync::Arc, time::Duration};

use anyhow::Context;
use poem::{Server, listener::TcpListener};
use tokio::main;
use tracing::{error, info, warn};

use messaging_scheduler::{
    application::{
        handlers::message_dispatcher::{DispatchConfig, MessageDispatchHandler},
        services::scheduler::{Scheduler, interval_from_secs},
        usecases::{
            control_scheduler::ControlSchedulerUseCase, list_sent_messages::ListSentMessagesUseCase,
        },
    },
    config::Config,
    infrastructure::{
        cache::redis::RedisReceiptCache,
        messaging::webhook::{HttpWebhookClient, WebhookClientConfig},
        repositories::postgres::{self, PostgresMessageRepository},
    },
    observability,
    presentation::http::{build_app, endpoints::root::ApiState},
};

const HTTP_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(30);

#[main]
async fn main() -> anyhow::Result<()> {
    let config = Config::try_parse().map_err(anyhow::Error::msg)?;
    observability::init(&config);

    let pool = postgres::connect(&config.database_url).await?;
    let message_repo = PostgresMessageRepository::new(pool);
    let receipt_cache = RedisReceiptCache::connect(&config.redis_url)
        .await
        .context("redis connection failed")?;
    let webhook = HttpWebhookClient::new(WebhookClientConfig {
        url: config.webhook_url.clone(),
        timeout: config.webhook_timeout,
    })?;

    let dispatcher = Arc::new(MessageDispatchHandler::new(
        message_repo.clone(),
        receipt_cache,
        webhook,
        DispatchConfig {
            batch_size: config.batch_size,
            receipt_ttl: config.receipt_ttl,
        },
    ));

    let interval = interval_from_secs(config.scheduler_interval_secs)
        .context("could not create scheduler")?;
    let scheduler = Scheduler::new(interval, move |_cancel| {
        let dispatcher = Arc::clone(&dispatcher);
        async move {
            dispatcher.handle().await;
        }
    })
    .context("could not create scheduler")?;

    let control = Arc::new(ControlSchedulerUseCase::new(scheduler));
    let state = Arc::new(ApiState {
        control_scheduler_usecase: Arc::clone(&control),
        list_sent_messages_usecase: Arc::new(ListSentMessagesUseCase::new(message_repo)),
    });

    let outcome = control.start().await;
    if outcome.is_already_running() {
        warn!(status = outcome.message(), "scheduler was not started at boot");
    }

    let server_url = config.server_url();
    let app = build_app(state, &server_url);

    let shutdown = {
        let control = Arc::clone(&control);
        async move {
            shutdown_signal().await;
            info!("shutdown signal received");
            control.stop().await;
        }
    };

    info!(%server_url, "HTTP server listening");
    Server::new(TcpListener::bind(format!("0.0.0.0:{}", config.port)))
        .run_with_graceful_shutdown(app, shutdown, Some(HTTP_SHUTDOWN_TIMEOUT))
        .await?;

    info!("server exited cleanly");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!(error = %err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                error!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}
