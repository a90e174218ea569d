use std::sync::Arc;

use tokio::{sync::Mutex, task::JoinHandle};
use tracing::info;

use crate::application::services::scheduler::{Drain, Scheduler, StartOutcome};

/// Serializes start/stop requests against the shared scheduler.
///
/// The lock only covers state changes. Draining happens after it is released,
/// so `start` and `is_running` answer at once while a stop is in progress.
pub struct ControlSchedulerUseCase {
    scheduler: Arc<Mutex<Scheduler>>,
}

impl ControlSchedulerUseCase {
    pub fn new(scheduler: Scheduler) -> Self {
        Self {
            scheduler: Arc::new(Mutex::new(scheduler)),
        }
    }

    pub async fn start(&self) -> StartOutcome {
        self.scheduler.lock().await.start()
    }

    /// Stops the scheduler and waits for in-flight jobs to drain.
    pub async fn stop(&self) {
        match self.begin_stop().await {
            Some(drain) => drain.wait().await,
            None => info!("scheduler is not running"),
        }
    }

    /// Cancels the timer loop, then drains in a background task.
    ///
    /// The returned handle completes once the drain is over; dropping it
    /// leaves the task running.
    pub async fn request_stop(&self) -> JoinHandle<()> {
        let drain = self.begin_stop().await;
        tokio::spawn(async move {
            if let Some(drain) = drain {
                drain.wait().await;
                info!("background scheduler stop finished");
            }
        })
    }

    /// True until a stopped loop has fully drained.
    pub async fn is_running(&self) -> bool {
        self.scheduler.lock().await.is_running()
    }

    async fn begin_stop(&self) -> Option<Drain> {
        let drain = self.scheduler.lock().await.begin_stop();
        if let Some(drain) = &drain {
            info!(in_flight = drain.in_flight(), "scheduler stop requested");
        }
        drain
    }
}
