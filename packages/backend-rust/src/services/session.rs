//! Session assembler: builds one day's practice session for a plan and
//! applies graded responses with per-plan optimistic concurrency.

use chrono::{DateTime, Utc};
use rand::Rng;
use thiserror::Error;
use tracing::warn;

use lingua_algo::{mode_for_day, Grade, Modality, SchedulingState};

use crate::config::PracticePolicy;
use crate::model::{DailyPracticeSession, ItemType, PracticeItem, QueueEntry};
use crate::services::compiler::{self, SourceRecord};
use crate::services::mastery::{self, CycleOutcome, ItemQueue, MasteryError};
use crate::store::{ContentStore, PlanStore, StoreError};

#[derive(Debug, Error)]
pub enum EngineError {
    /// Recoverable: the UI renders an empty "no lesson today" state.
    #[error("no practice content available: {0}")]
    ContentUnavailable(String),
    #[error("plan {0} not found")]
    PlanNotFound(String),
    #[error("lesson {0} is not part of the plan")]
    LessonNotFound(String),
    #[error("item {0} is not tracked by the plan")]
    ItemNotFound(String),
    /// Retryable: optimistic writes kept losing; nothing was persisted.
    #[error("plan {0} is being updated concurrently")]
    UpdateConflict(String),
}

impl From<StoreError> for EngineError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::PlanNotFound(id) => EngineError::PlanNotFound(id),
            StoreError::VersionConflict(id) => EngineError::UpdateConflict(id),
        }
    }
}

impl From<MasteryError> for EngineError {
    fn from(err: MasteryError) -> Self {
        match err {
            MasteryError::ItemNotFound(id) => EngineError::ItemNotFound(id),
            MasteryError::LessonNotFound(id) => EngineError::LessonNotFound(id),
        }
    }
}

/// Result of applying one graded response.
#[derive(Debug, Clone)]
pub struct SubmitOutcome {
    pub scheduling: SchedulingState,
    pub queue: ItemQueue,
}

/// Assemble the day's session: today's modality applied to the current
/// lesson's active queues, followed by every due review item compiled
/// under the generic review modality.
pub fn build_session<R: Rng + ?Sized>(
    content: &dyn ContentStore,
    plans: &dyn PlanStore,
    plan_id: &str,
    now: DateTime<Utc>,
    rng: &mut R,
) -> Result<DailyPracticeSession, EngineError> {
    let plan = plans.plan(plan_id)?.plan;

    let lesson_index = plan
        .current_lesson_index()
        .ok_or_else(|| EngineError::ContentUnavailable("plan has no lessons".to_string()))?;
    let plan_lesson = &plan.lessons[lesson_index];

    let day_index = plan_lesson.completed_cycle_days as i64 + 1;
    let modality = mode_for_day(day_index);

    if modality.requires_primary_content()
        && plan_lesson.active_vocabulary.is_empty()
        && plan_lesson.active_structures.is_empty()
    {
        return Err(EngineError::ContentUnavailable(format!(
            "lesson {} has no active items",
            plan_lesson.lesson_id
        )));
    }

    let lesson_content = content.lesson(&plan_lesson.lesson_id);

    let mut items: Vec<PracticeItem> = Vec::new();
    match modality {
        Modality::ComprehensiveQuiz | Modality::ListeningChoice => {
            if let Some(lesson) = lesson_content.as_ref() {
                items.extend(compiler::compile_quiz(lesson, modality));
            } else {
                warn!(lesson_id = %plan_lesson.lesson_id, "lesson content missing on quiz day");
            }
        }
        _ => {
            for entry in plan_lesson
                .active_vocabulary
                .iter()
                .chain(plan_lesson.active_structures.iter())
            {
                if let Some(item) =
                    compile_entry(content, entry, modality, lesson_content.as_ref(), rng)
                {
                    items.push(item);
                }
            }
        }
    }

    // Due review items ride along with every session.
    for entry in &plan.review {
        let due = entry
            .scheduling
            .as_ref()
            .map(|s| s.is_due(now))
            .unwrap_or(true);
        if !due {
            continue;
        }
        if let Some(item) =
            compile_entry(content, entry, Modality::Review, lesson_content.as_ref(), rng)
        {
            items.push(item);
        }
    }

    Ok(DailyPracticeSession {
        plan_id: plan.id.clone(),
        lesson_id: plan_lesson.lesson_id.clone(),
        day_index,
        modality,
        items,
    })
}

fn compile_entry<R: Rng + ?Sized>(
    content: &dyn ContentStore,
    entry: &QueueEntry,
    modality: Modality,
    lesson: Option<&crate::model::LessonContent>,
    rng: &mut R,
) -> Option<PracticeItem> {
    let compiled = match entry.item_type {
        ItemType::Vocabulary => {
            let record = content.vocabulary(&entry.item_id);
            match record.as_ref() {
                Some(v) => compiler::compile(SourceRecord::Vocabulary(v), modality, lesson, rng),
                None => {
                    warn!(item_id = %entry.item_id, "vocabulary record missing, skipping");
                    return None;
                }
            }
        }
        ItemType::Structure => {
            let record = content.structure(&entry.item_id);
            match record.as_ref() {
                Some(s) => compiler::compile(SourceRecord::Structure(s), modality, lesson, rng),
                None => {
                    warn!(item_id = %entry.item_id, "structure record missing, skipping");
                    return None;
                }
            }
        }
    };

    match compiled {
        Ok(mut item) => {
            item.scheduling = entry.scheduling.clone();
            Some(item)
        }
        Err(err) => {
            warn!(item_id = %entry.item_id, error = %err, "record failed to compile, skipping");
            None
        }
    }
}

/// Apply one graded response as a bounded optimistic read-modify-write:
/// re-read the plan and reapply on version conflicts, up to the policy's
/// retry budget. Scheduling state and queue membership always land in the
/// same plan write.
pub fn submit_response(
    plans: &dyn PlanStore,
    policy: &PracticePolicy,
    plan_id: &str,
    lesson_id: &str,
    item_id: &str,
    grade: Grade,
    now: DateTime<Utc>,
) -> Result<SubmitOutcome, EngineError> {
    with_plan_retry(plans, policy, plan_id, |plan| {
        let (scheduling, queue) =
            mastery::apply_graded_response(plan, lesson_id, item_id, grade, now)?;
        Ok(SubmitOutcome { scheduling, queue })
    })
}

/// Record the completion of a practice day, promoting qualifying items
/// when the cycle finishes.
pub fn complete_day(
    plans: &dyn PlanStore,
    policy: &PracticePolicy,
    plan_id: &str,
    lesson_id: &str,
    now: DateTime<Utc>,
) -> Result<CycleOutcome, EngineError> {
    with_plan_retry(plans, policy, plan_id, |plan| {
        Ok(mastery::complete_cycle_day(
            plan,
            lesson_id,
            policy.promotion_min_repetition,
            now,
        )?)
    })
}

/// Move a plan's elapsed learned items into review. Used by the periodic
/// sweep; returns the moved item ids.
pub fn sweep_plan(
    plans: &dyn PlanStore,
    policy: &PracticePolicy,
    plan_id: &str,
    now: DateTime<Utc>,
) -> Result<Vec<String>, EngineError> {
    with_plan_retry(plans, policy, plan_id, |plan| Ok(mastery::sweep_due(plan, now)))
}

fn with_plan_retry<T>(
    plans: &dyn PlanStore,
    policy: &PracticePolicy,
    plan_id: &str,
    mut apply: impl FnMut(&mut crate::model::CurriculumPlan) -> Result<T, EngineError>,
) -> Result<T, EngineError> {
    let attempts = policy.plan_write_retries.max(1);
    for attempt in 0..attempts {
        let versioned = plans.plan(plan_id)?;
        let mut plan = versioned.plan;
        let outcome = apply(&mut plan)?;
        match plans.compare_and_swap(plan, versioned.version) {
            Ok(_) => return Ok(outcome),
            Err(StoreError::VersionConflict(_)) => {
                warn!(plan_id, attempt, "plan write conflict, retrying");
                continue;
            }
            Err(other) => return Err(other.into()),
        }
    }
    Err(EngineError::UpdateConflict(plan_id.to_string()))
}
