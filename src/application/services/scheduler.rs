//! Fixed-interval job scheduler.
//!
//! Every tick launches the job as its own tracked task without waiting for the
//! previous one, so invocations overlap when a job outlives the interval.
//! [`Scheduler::stop`] cancels the timer loop and then drains every invocation
//! that was already launched.

use std::{future::Future, panic::AssertUnwindSafe, sync::Arc, time::Duration};

use futures::{FutureExt, future::BoxFuture};
use tokio::time::{self, Instant, MissedTickBehavior};
use tokio_util::{sync::CancellationToken, task::TaskTracker};
use tracing::{debug, error, info};

use crate::domain::errors::DomainError;

type Job = Arc<dyn Fn(CancellationToken) -> BoxFuture<'static, ()> + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    Started,
    AlreadyRunning,
}

impl StartOutcome {
    pub fn message(&self) -> &'static str {
        match self {
            StartOutcome::Started => "scheduler started",
            StartOutcome::AlreadyRunning => "scheduler already running",
        }
    }

    pub fn is_already_running(&self) -> bool {
        matches!(self, StartOutcome::AlreadyRunning)
    }
}

/// Converts a configured interval in seconds, rejecting non-positive values.
pub fn interval_from_secs(secs: i64) -> Result<Duration, DomainError> {
    if secs <= 0 {
        return Err(DomainError::InvalidConfig(format!(
            "interval must be > 0, got {secs}s"
        )));
    }
    Ok(Duration::from_secs(secs as u64))
}

/// The timer loop and every job it launched share one tracker.
struct ActiveLoop {
    cancel: CancellationToken,
    tracker: TaskTracker,
}

/// A cancelled loop whose jobs may still be running.
///
/// Returned by [`Scheduler::begin_stop`] so the wait can happen without
/// holding whatever guards the scheduler.
#[must_use = "a drain does nothing unless waited on"]
pub struct Drain {
    tracker: TaskTracker,
}

impl Drain {
    /// Number of tasks still running, the timer loop included.
    pub fn in_flight(&self) -> usize {
        self.tracker.len()
    }

    /// Waits, without a deadline, until the loop and every launched job are done.
    pub async fn wait(self) {
        debug!(in_flight = self.tracker.len(), "draining scheduled jobs");
        self.tracker.wait().await;
        info!("scheduler stopped");
    }
}

pub struct Scheduler {
    interval: Duration,
    job: Job,
    active: Option<ActiveLoop>,
    draining: Option<TaskTracker>,
}

impl Scheduler {
    pub fn new<F, Fut>(interval: Duration, job: F) -> Result<Self, DomainError>
    where
        F: Fn(CancellationToken) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        if interval.is_zero() {
            return Err(DomainError::InvalidConfig(format!(
                "interval must be > 0, got {interval:?}"
            )));
        }

        let job: Job = Arc::new(move |cancel| job(cancel).boxed());
        Ok(Self {
            interval,
            job,
            active: None,
            draining: None,
        })
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// True from `start` until the last job of a stopped loop has finished.
    pub fn is_running(&self) -> bool {
        self.active.is_some() || self.is_draining()
    }

    fn is_draining(&self) -> bool {
        self.draining
            .as_ref()
            .is_some_and(|tracker| !tracker.is_empty())
    }

    /// Starts the timer loop. Has no effect while a loop is active or still draining.
    pub fn start(&mut self) -> StartOutcome {
        if self.is_running() {
            info!("scheduler already running");
            return StartOutcome::AlreadyRunning;
        }

        let cancel = CancellationToken::new();
        let tracker = TaskTracker::new();
        tracker.spawn(run_loop(
            self.interval,
            Arc::clone(&self.job),
            cancel.clone(),
            tracker.clone(),
        ));

        self.draining = None;
        self.active = Some(ActiveLoop { cancel, tracker });

        info!(interval_secs = self.interval.as_secs(), "scheduler started");
        StartOutcome::Started
    }

    /// Cancels the timer loop without waiting for it.
    ///
    /// Returns the drain of the loop just cancelled, or of an earlier loop that
    /// is still draining. `None` when there is nothing to wait for.
    pub fn begin_stop(&mut self) -> Option<Drain> {
        if let Some(active) = self.active.take() {
            active.cancel.cancel();
            active.tracker.close();
            self.draining = Some(active.tracker.clone());
            return Some(Drain {
                tracker: active.tracker,
            });
        }

        self.draining
            .as_ref()
            .filter(|tracker| !tracker.is_empty())
            .map(|tracker| Drain {
                tracker: tracker.clone(),
            })
    }

    /// Cancels the timer loop and waits, without a deadline, until the loop
    /// has exited and every launched job has finished.
    ///
    /// Dropping the returned future part way leaves the loop cancelled; a
    /// later call waits for the remaining jobs.
    pub async fn stop(&mut self) {
        match self.begin_stop() {
            Some(drain) => {
                drain.wait().await;
                self.draining = None;
            }
            None => info!("scheduler is not running"),
        }
    }
}

impl Drop for Scheduler {
    fn drop(&mut self) {
        if let Some(active) = &self.active {
            active.cancel.cancel();
        }
    }
}

async fn run_loop(period: Duration, job: Job, cancel: CancellationToken, tracker: TaskTracker) {
    let mut ticker = time::interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut tick: u64 = 0;

    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            _ = ticker.tick() => {
                tick += 1;
                debug!(tick, in_flight = tracker.len(), "scheduler tick");

                let job_fn = Arc::clone(&job);
                let token = cancel.clone();
                tracker.spawn(async move {
                    let run = AssertUnwindSafe(async move { job_fn(token).await });
                    if run.catch_unwind().await.is_err() {
                        error!(tick, "scheduled job panicked");
                    }
                });
            }
        }
    }

    debug!(ticks = tick, "scheduler loop exited");
}
