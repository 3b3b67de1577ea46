//! Scheduled background tasks using tokio-cron-scheduler.
//!
//! The only periodic job is the Feedly sync, which runs the same action as
//! `POST /functions/sync-feedly`. It is registered only when
//! `FEEDLY_SYNC_CRON` is set.

use anyhow::Result;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::domains::stories::actions::sync_feedly;
use crate::kernel::ServerDeps;

/// Start the scheduler with a Feedly sync job on `cron` (six-field syntax).
pub async fn start_scheduler(deps: ServerDeps, cron: &str) -> Result<JobScheduler> {
    let scheduler = JobScheduler::new().await?;

    let sync_job = Job::new_async(cron, move |_uuid, _lock| {
        let deps = deps.clone();
        Box::pin(async move {
            match sync_feedly(&deps).await {
                Ok(report) => tracing::info!(
                    fetched = report.fetched,
                    added = report.added,
                    "Scheduled Feedly sync finished"
                ),
                Err(e) => tracing::error!("Scheduled Feedly sync failed: {}", e),
            }
        })
    })?;

    scheduler.add(sync_job).await?;
    scheduler.start().await?;

    tracing::info!(cron, "Scheduled tasks started (Feedly sync)");
    Ok(scheduler)
}
