use std::sync::Arc;

use crate::config::PracticePolicy;
use crate::store::{ContentStore, MemoryStore, PlanStore};

/// Shared handles passed to every request handler.
#[derive(Clone)]
pub struct AppState {
    pub content: Arc<dyn ContentStore>,
    pub plans: Arc<dyn PlanStore>,
    pub policy: Arc<PracticePolicy>,
}

impl AppState {
    pub fn new(
        content: Arc<dyn ContentStore>,
        plans: Arc<dyn PlanStore>,
        policy: PracticePolicy,
    ) -> Self {
        Self {
            content,
            plans,
            policy: Arc::new(policy),
        }
    }

    /// Both storage seams served by one in-memory store.
    pub fn with_memory_store(store: Arc<MemoryStore>, policy: PracticePolicy) -> Self {
        Self::new(store.clone(), store, policy)
    }
}
