mod review_sweep;

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::Mutex;
use tokio_cron_scheduler::{Job, JobScheduler, JobSchedulerError};
use tracing::info;

use crate::config::PracticePolicy;
use crate::store::PlanStore;

#[derive(Debug, Error)]
pub enum WorkerError {
    #[error("scheduler error: {0}")]
    Scheduler(#[from] JobSchedulerError),
}

/// Owns the cron scheduler running the engine's background jobs. The only
/// job today is the learned -> review due-date sweep.
pub struct WorkerManager {
    scheduler: Mutex<JobScheduler>,
    plans: Arc<dyn PlanStore>,
    policy: PracticePolicy,
}

impl WorkerManager {
    pub async fn new(
        plans: Arc<dyn PlanStore>,
        policy: PracticePolicy,
    ) -> Result<Self, WorkerError> {
        let scheduler = JobScheduler::new().await?;
        Ok(Self {
            scheduler: Mutex::new(scheduler),
            plans,
            policy,
        })
    }

    pub async fn start(&self) -> Result<(), WorkerError> {
        let enable_sweep = std::env::var("ENABLE_REVIEW_SWEEP_WORKER")
            .map(|v| v != "false" && v != "0")
            .unwrap_or(true);

        if !enable_sweep {
            info!("review sweep worker disabled");
            return Ok(());
        }

        let scheduler = self.scheduler.lock().await;

        let plans = Arc::clone(&self.plans);
        let policy = self.policy.clone();
        let cron = self.policy.review_sweep_cron.clone();
        let job = Job::new_async(cron.as_str(), move |_id, _lock| {
            let plans = Arc::clone(&plans);
            let policy = policy.clone();
            Box::pin(async move {
                review_sweep::sweep_all_plans(plans, &policy).await;
            })
        })?;
        scheduler.add(job).await?;
        scheduler.start().await?;

        info!(cron = %cron, "review sweep worker started");
        Ok(())
    }

    pub async fn stop(&self) {
        let mut scheduler = self.scheduler.lock().await;
        if let Err(err) = scheduler.shutdown().await {
            tracing::warn!(error = %err, "scheduler shutdown failed");
        }
    }
}
