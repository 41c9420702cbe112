//! Mastery pipeline: the active -> learned -> review state machine over a
//! curriculum plan's queues.
//!
//! Queue membership is mutated only here, through explicit move
//! operations that remove an entry from wherever it lives before
//! re-inserting it, so an item id is always in exactly one queue. Every
//! move happens together with the scheduling-state write on the same plan
//! value; the caller persists the whole plan in one compare-and-swap.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use lingua_algo::{advance, Grade, SchedulingState, CYCLE_LENGTH_DAYS};

use crate::model::{CurriculumPlan, ItemType, QueueEntry};

/// Which of the three plan queues an item currently occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ItemQueue {
    Active,
    Learned,
    Review,
}

#[derive(Debug, Error)]
pub enum MasteryError {
    #[error("item {0} is not in any queue of the plan")]
    ItemNotFound(String),
    #[error("lesson {0} is not part of the plan")]
    LessonNotFound(String),
}

/// Result of completing a cycle day for a lesson.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CycleOutcome {
    pub completed_cycle_days: u8,
    pub cycle_finished: bool,
    /// Item ids promoted from active to learned
    pub promoted: Vec<String>,
}

enum Location {
    ActiveVocabulary { lesson: usize, index: usize },
    ActiveStructures { lesson: usize, index: usize },
    Learned(usize),
    Review(usize),
}

fn locate(plan: &CurriculumPlan, item_id: &str) -> Option<Location> {
    for (li, lesson) in plan.lessons.iter().enumerate() {
        if let Some(i) = lesson
            .active_vocabulary
            .iter()
            .position(|e| e.item_id == item_id)
        {
            return Some(Location::ActiveVocabulary { lesson: li, index: i });
        }
        if let Some(i) = lesson
            .active_structures
            .iter()
            .position(|e| e.item_id == item_id)
        {
            return Some(Location::ActiveStructures { lesson: li, index: i });
        }
    }
    if let Some(i) = plan.learned.iter().position(|e| e.item_id == item_id) {
        return Some(Location::Learned(i));
    }
    if let Some(i) = plan.review.iter().position(|e| e.item_id == item_id) {
        return Some(Location::Review(i));
    }
    None
}

fn take(plan: &mut CurriculumPlan, location: &Location) -> QueueEntry {
    match *location {
        Location::ActiveVocabulary { lesson, index } => {
            plan.lessons[lesson].active_vocabulary.remove(index)
        }
        Location::ActiveStructures { lesson, index } => {
            plan.lessons[lesson].active_structures.remove(index)
        }
        Location::Learned(index) => plan.learned.remove(index),
        Location::Review(index) => plan.review.remove(index),
    }
}

fn push_active(plan: &mut CurriculumPlan, lesson: usize, entry: QueueEntry) {
    let target = &mut plan.lessons[lesson];
    match entry.item_type {
        ItemType::Vocabulary => target.active_vocabulary.push(entry),
        ItemType::Structure => target.active_structures.push(entry),
    }
}

/// Queue an item id currently occupies, if any. Mostly used to assert the
/// one-queue invariant.
pub fn queue_of(plan: &CurriculumPlan, item_id: &str) -> Option<ItemQueue> {
    locate(plan, item_id).map(|loc| match loc {
        Location::ActiveVocabulary { .. } | Location::ActiveStructures { .. } => ItemQueue::Active,
        Location::Learned(_) => ItemQueue::Learned,
        Location::Review(_) => ItemQueue::Review,
    })
}

/// Number of queues containing `item_id`; 1 for every tracked item when
/// the invariant holds.
pub fn membership_count(plan: &CurriculumPlan, item_id: &str) -> usize {
    let mut count = 0;
    for lesson in &plan.lessons {
        count += lesson
            .active_vocabulary
            .iter()
            .filter(|e| e.item_id == item_id)
            .count();
        count += lesson
            .active_structures
            .iter()
            .filter(|e| e.item_id == item_id)
            .count();
    }
    count += plan.learned.iter().filter(|e| e.item_id == item_id).count();
    count += plan.review.iter().filter(|e| e.item_id == item_id).count();
    count
}

/// Apply one graded response: advance the item's scheduling state and move
/// it between queues according to the pipeline rules.
///
/// - Active items stay active (promotion happens at cycle completion).
/// - Review items stay in review on a pass; a fail remediates them into
///   the practiced lesson's active queue so they are re-taught.
/// - Learned items behave like review items when graded directly.
pub fn apply_graded_response(
    plan: &mut CurriculumPlan,
    lesson_id: &str,
    item_id: &str,
    grade: Grade,
    now: DateTime<Utc>,
) -> Result<(SchedulingState, ItemQueue), MasteryError> {
    let location =
        locate(plan, item_id).ok_or_else(|| MasteryError::ItemNotFound(item_id.to_string()))?;

    // The remediation target must resolve before the entry leaves its
    // queue; erroring after `take` would strand the item in zero queues.
    let remediation_lesson = match location {
        Location::Review(_) | Location::Learned(_) if !grade.is_pass() => Some(
            plan.lessons
                .iter()
                .position(|l| l.lesson_id == lesson_id)
                .ok_or_else(|| MasteryError::LessonNotFound(lesson_id.to_string()))?,
        ),
        _ => None,
    };

    let mut entry = take(plan, &location);
    let next = advance(entry.scheduling.as_ref(), grade, now);
    entry.scheduling = Some(next.clone());
    entry.updated_at = now;

    let destination = if let Some(lesson) = remediation_lesson {
        // Remediation: back into the current lesson to be re-taught.
        push_active(plan, lesson, entry);
        ItemQueue::Active
    } else {
        match location {
            Location::ActiveVocabulary { lesson, .. }
            | Location::ActiveStructures { lesson, .. } => {
                push_active(plan, lesson, entry);
                ItemQueue::Active
            }
            Location::Review(_) => {
                plan.review.push(entry);
                ItemQueue::Review
            }
            Location::Learned(_) => {
                plan.learned.push(entry);
                ItemQueue::Learned
            }
        }
    };

    Ok((next, destination))
}

/// Record the completion of one practice day for a lesson. When the cycle
/// counter reaches its sixth day, items whose repetition streak meets
/// `promotion_min_repetition` move from the lesson's active queues to the
/// plan-level learned queue; the rest stay active for another cycle.
pub fn complete_cycle_day(
    plan: &mut CurriculumPlan,
    lesson_id: &str,
    promotion_min_repetition: i32,
    now: DateTime<Utc>,
) -> Result<CycleOutcome, MasteryError> {
    let lesson_index = plan
        .lessons
        .iter()
        .position(|l| l.lesson_id == lesson_id)
        .ok_or_else(|| MasteryError::LessonNotFound(lesson_id.to_string()))?;

    let lesson = &mut plan.lessons[lesson_index];
    let day = (lesson.completed_cycle_days + 1).min(CYCLE_LENGTH_DAYS);
    lesson.completed_cycle_days = day;

    if day < CYCLE_LENGTH_DAYS {
        return Ok(CycleOutcome {
            completed_cycle_days: day,
            cycle_finished: false,
            promoted: Vec::new(),
        });
    }

    let qualifies = |entry: &QueueEntry| {
        entry
            .scheduling
            .as_ref()
            .map(|s| s.repetition >= promotion_min_repetition)
            .unwrap_or(false)
    };

    let mut promoted = Vec::new();
    let mut promote = |entries: Vec<QueueEntry>, learned: &mut Vec<QueueEntry>| {
        let mut kept = Vec::with_capacity(entries.len());
        for mut entry in entries {
            if qualifies(&entry) {
                entry.updated_at = now;
                promoted.push(entry.item_id.clone());
                learned.push(entry);
            } else {
                kept.push(entry);
            }
        }
        kept
    };

    let vocabulary = std::mem::take(&mut plan.lessons[lesson_index].active_vocabulary);
    plan.lessons[lesson_index].active_vocabulary = promote(vocabulary, &mut plan.learned);
    let structures = std::mem::take(&mut plan.lessons[lesson_index].active_structures);
    plan.lessons[lesson_index].active_structures = promote(structures, &mut plan.learned);

    let lesson = &mut plan.lessons[lesson_index];
    let remaining = lesson.active_vocabulary.len() + lesson.active_structures.len();
    if remaining > 0 {
        // Non-qualifying items run through another full cycle.
        lesson.completed_cycle_days = 0;
    }

    debug!(
        plan_id = %plan.id,
        lesson_id,
        promoted = promoted.len(),
        remaining,
        "cycle day completed"
    );

    Ok(CycleOutcome {
        completed_cycle_days: plan.lessons[lesson_index].completed_cycle_days,
        cycle_finished: true,
        promoted,
    })
}

/// Move every learned item whose due date has elapsed into the review
/// queue. Idempotent: membership is checked by construction, so re-running
/// on the same plan moves nothing twice.
pub fn sweep_due(plan: &mut CurriculumPlan, now: DateTime<Utc>) -> Vec<String> {
    let mut moved = Vec::new();
    let mut index = 0;
    while index < plan.learned.len() {
        let due = plan.learned[index]
            .scheduling
            .as_ref()
            .map(|s| s.is_due(now))
            .unwrap_or(false);
        if due {
            let mut entry = plan.learned.remove(index);
            entry.updated_at = now;
            moved.push(entry.item_id.clone());
            plan.review.push(entry);
        } else {
            index += 1;
        }
    }
    moved
}
