//! Storage seams of the engine.
//!
//! The content store is read-only; the plan store is the engine's sole
//! write target and exposes versioned reads plus compare-and-swap writes
//! so graded responses can be applied as bounded optimistic
//! read-modify-write cycles.

mod memory;

pub use memory::MemoryStore;

use thiserror::Error;

use crate::model::{CurriculumPlan, GrammarStructure, LessonContent, VocabularyItem};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("plan {0} not found")]
    PlanNotFound(String),
    #[error("plan {0} was modified concurrently")]
    VersionConflict(String),
}

/// A curriculum plan together with the version it was read at.
#[derive(Debug, Clone)]
pub struct VersionedPlan {
    pub plan: CurriculumPlan,
    pub version: u64,
}

/// Read-only access to content authored by the content pipeline.
pub trait ContentStore: Send + Sync {
    fn vocabulary(&self, id: &str) -> Option<VocabularyItem>;
    fn structure(&self, id: &str) -> Option<GrammarStructure>;
    fn lesson(&self, id: &str) -> Option<LessonContent>;
}

/// Transactional access to curriculum plans.
pub trait PlanStore: Send + Sync {
    fn plan(&self, id: &str) -> Result<VersionedPlan, StoreError>;

    /// Ids of every stored plan; used by the review sweep.
    fn plan_ids(&self) -> Vec<String>;

    /// Write `plan` if the stored version still equals `expected_version`.
    /// Returns the new version on success.
    fn compare_and_swap(
        &self,
        plan: CurriculumPlan,
        expected_version: u64,
    ) -> Result<u64, StoreError>;
}
