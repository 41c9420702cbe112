//! In-memory store backing both storage traits.
//!
//! Content lives in id-indexed maps; plans carry a monotonically
//! increasing version so concurrent writers lose cleanly at
//! compare-and-swap instead of clobbering each other.

use std::collections::HashMap;

use parking_lot::RwLock;

use crate::model::{CurriculumPlan, GrammarStructure, LessonContent, VocabularyItem};
use crate::store::{ContentStore, PlanStore, StoreError, VersionedPlan};

#[derive(Default)]
pub struct MemoryStore {
    vocabulary: RwLock<HashMap<String, VocabularyItem>>,
    structures: RwLock<HashMap<String, GrammarStructure>>,
    lessons: RwLock<HashMap<String, LessonContent>>,
    plans: RwLock<HashMap<String, (CurriculumPlan, u64)>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_vocabulary(&self, item: VocabularyItem) {
        self.vocabulary.write().insert(item.id.clone(), item);
    }

    pub fn insert_structure(&self, item: GrammarStructure) {
        self.structures.write().insert(item.id.clone(), item);
    }

    pub fn insert_lesson(&self, lesson: LessonContent) {
        self.lessons.write().insert(lesson.id.clone(), lesson);
    }

    pub fn insert_plan(&self, plan: CurriculumPlan) {
        self.plans.write().insert(plan.id.clone(), (plan, 0));
    }
}

impl ContentStore for MemoryStore {
    fn vocabulary(&self, id: &str) -> Option<VocabularyItem> {
        self.vocabulary.read().get(id).cloned()
    }

    fn structure(&self, id: &str) -> Option<GrammarStructure> {
        self.structures.read().get(id).cloned()
    }

    fn lesson(&self, id: &str) -> Option<LessonContent> {
        self.lessons.read().get(id).cloned()
    }
}

impl PlanStore for MemoryStore {
    fn plan(&self, id: &str) -> Result<VersionedPlan, StoreError> {
        self.plans
            .read()
            .get(id)
            .map(|(plan, version)| VersionedPlan {
                plan: plan.clone(),
                version: *version,
            })
            .ok_or_else(|| StoreError::PlanNotFound(id.to_string()))
    }

    fn plan_ids(&self) -> Vec<String> {
        self.plans.read().keys().cloned().collect()
    }

    fn compare_and_swap(
        &self,
        plan: CurriculumPlan,
        expected_version: u64,
    ) -> Result<u64, StoreError> {
        let mut plans = self.plans.write();
        let entry = plans
            .get_mut(&plan.id)
            .ok_or_else(|| StoreError::PlanNotFound(plan.id.clone()))?;
        if entry.1 != expected_version {
            return Err(StoreError::VersionConflict(plan.id.clone()));
        }
        let next_version = expected_version + 1;
        *entry = (plan, next_version);
        Ok(next_version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_plan(id: &str) -> CurriculumPlan {
        CurriculumPlan {
            id: id.to_string(),
            student_id: "student-1".to_string(),
            lessons: vec![],
            learned: vec![],
            review: vec![],
        }
    }

    #[test]
    fn cas_succeeds_on_matching_version() {
        let store = MemoryStore::new();
        store.insert_plan(empty_plan("p1"));
        let read = store.plan("p1").unwrap();
        let version = store.compare_and_swap(read.plan, read.version).unwrap();
        assert_eq!(version, 1);
    }

    #[test]
    fn cas_rejects_stale_version() {
        let store = MemoryStore::new();
        store.insert_plan(empty_plan("p1"));
        let first = store.plan("p1").unwrap();
        let second = store.plan("p1").unwrap();
        store.compare_and_swap(first.plan, first.version).unwrap();
        let err = store
            .compare_and_swap(second.plan, second.version)
            .unwrap_err();
        assert!(matches!(err, StoreError::VersionConflict(_)));
    }

    #[test]
    fn missing_plan_is_not_found() {
        let store = MemoryStore::new();
        assert!(matches!(
            store.plan("nope").unwrap_err(),
            StoreError::PlanNotFound(_)
        ));
    }
}
