//! Cron-style job scheduler using tokio-cron-scheduler.

use std::future::Future;

use tokio_cron_scheduler::{Job, JobScheduler, JobSchedulerError};

use crate::state::AppState;

/// Sweep expired visitor state every ten minutes.
const CACHE_PURGE_CRON: &str = "0 */10 * * * *";

/// Cron job scheduler wrapper.
pub struct Scheduler {
    inner: JobScheduler,
}

impl Scheduler {
    pub async fn new() -> Result<Self, JobSchedulerError> {
        Ok(Self {
            inner: JobScheduler::new().await?,
        })
    }

    /// Add a cron job. Schedules have six fields, seconds first.
    pub async fn add_cron<F, Fut>(
        &self,
        schedule: &str,
        task: F,
    ) -> Result<uuid::Uuid, JobSchedulerError>
    where
        F: Fn() -> Fut + Send + Sync + Clone + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let job = Job::new_async(schedule, move |_uuid, _lock| {
            let task = task.clone();
            Box::pin(async move {
                task().await;
            })
        })?;

        let id = self.inner.add(job).await?;
        tracing::info!(schedule = %schedule, job_id = %id, "Cron job registered");
        Ok(id)
    }

    pub async fn start(&self) -> Result<(), JobSchedulerError> {
        self.inner.start().await?;
        tracing::info!("Scheduler started");
        Ok(())
    }

    pub async fn shutdown(&mut self) -> Result<(), JobSchedulerError> {
        self.inner.shutdown().await?;
        tracing::info!("Scheduler stopped");
        Ok(())
    }
}

/// Register the content refresh and cache purge jobs and start them.
///
/// The refresh re-reads everything from storage, so edits made outside the
/// API show up on the next run. The latest fetch wins.
pub async fn start_background_jobs(
    state: &AppState,
    refresh_cron: &str,
) -> Result<Scheduler, JobSchedulerError> {
    let scheduler = Scheduler::new().await?;

    let content = state.content.clone();
    scheduler
        .add_cron(refresh_cron, move || {
            let content = content.clone();
            async move {
                match content.load().await {
                    Ok(posts) => tracing::debug!(posts, "Scheduled content refresh done"),
                    Err(e) => tracing::error!(error = %e, "Scheduled content refresh failed"),
                }
            }
        })
        .await?;

    let cache = state.cache.clone();
    scheduler
        .add_cron(CACHE_PURGE_CRON, move || {
            let cache = cache.clone();
            async move {
                let purged = cache.purge_expired().await;
                if purged > 0 {
                    tracing::debug!(purged, "Expired visitor state purged");
                }
            }
        })
        .await?;

    scheduler.start().await?;
    Ok(scheduler)
}
