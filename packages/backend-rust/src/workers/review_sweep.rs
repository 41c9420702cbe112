//! Periodic sweep moving elapsed learned items into the review queue.
//!
//! Runs over every plan; each plan is updated through the same optimistic
//! read-modify-write path as user submissions, so the sweep can overlap
//! them safely. Re-running on an already-swept plan moves nothing.

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use tracing::{error, info};

use crate::config::PracticePolicy;
use crate::services::session;
use crate::store::PlanStore;

#[derive(Debug, Default)]
struct SweepStats {
    plans_scanned: usize,
    items_moved: usize,
    failures: usize,
    duration_secs: f64,
}

pub async fn sweep_all_plans(plans: Arc<dyn PlanStore>, policy: &PracticePolicy) {
    let start = Instant::now();
    let now = Utc::now();
    let mut stats = SweepStats::default();

    for plan_id in plans.plan_ids() {
        stats.plans_scanned += 1;
        match session::sweep_plan(plans.as_ref(), policy, &plan_id, now) {
            Ok(moved) => stats.items_moved += moved.len(),
            Err(err) => {
                stats.failures += 1;
                error!(plan_id = %plan_id, error = %err, "review sweep failed for plan");
            }
        }
    }

    stats.duration_secs = start.elapsed().as_secs_f64();
    info!(
        plans_scanned = stats.plans_scanned,
        items_moved = stats.items_moved,
        failures = stats.failures,
        duration_secs = format!("{:.2}", stats.duration_secs),
        "review sweep completed"
    );
}
