//! Data model for the adaptive practice engine.
//!
//! Content records (vocabulary, grammar structures, lessons) are owned by
//! the content pipeline and are read-only here; curriculum plans are the
//! sole write target of the engine. Plans reference lessons, and lessons
//! reference items, by id only.

use std::collections::HashSet;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use lingua_algo::{Modality, SchedulingState, CYCLE_LENGTH_DAYS};

// ==================== Content records ====================

/// CEFR proficiency level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LanguageLevel {
    A1,
    A2,
    B1,
    B2,
    C1,
    C2,
}

/// One contextual meaning of a vocabulary item.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sense {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub definition: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example_translation: Option<String>,
}

/// Atomic lexical unit, immutable to this engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VocabularyItem {
    pub id: String,
    pub language: String,
    pub level: LanguageLevel,
    /// Grammatical category (noun, verb, ...)
    pub category: String,
    /// Primary text as practiced
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phonetic: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub senses: Vec<Sense>,
}

/// One token of a decomposed example sentence.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SentenceToken {
    pub word: String,
    /// Back-reference to a vocabulary item, when the token is one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vocabulary_id: Option<String>,
    pub position: i32,
    pub role: String,
}

/// Example sentence with its ordered token decomposition.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExampleSentence {
    pub text: String,
    #[serde(default)]
    pub tokens: Vec<SentenceToken>,
}

/// A syntactic pattern, immutable to this engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrammarStructure {
    pub id: String,
    pub language: String,
    pub level: LanguageLevel,
    /// Pattern tag, e.g. "passé composé" or "conditional II"
    pub pattern: String,
    #[serde(default)]
    pub examples: Vec<ExampleSentence>,
}

/// Timestamped slice of a lesson's audio transcript.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscriptSegment {
    /// Seconds from the start of the audio
    pub start: f64,
    pub end: f64,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speaker: Option<String>,
    #[serde(default)]
    pub vocabulary_ids: HashSet<String>,
    #[serde(default)]
    pub structure_ids: HashSet<String>,
}

impl TranscriptSegment {
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    pub fn references(&self, item_id: &str) -> bool {
        self.vocabulary_ids.contains(item_id) || self.structure_ids.contains(item_id)
    }
}

/// One comprehension question.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    pub text: String,
    pub options: Vec<String>,
    pub correct_index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    /// Vocabulary or structure id this question exercises
    #[serde(skip_serializing_if = "Option::is_none")]
    pub related_id: Option<String>,
}

/// A titled group of quiz questions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizSection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub questions: Vec<QuizQuestion>,
}

/// Content unit referencing items by id, with optional audio, transcript
/// and comprehension quiz.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonContent {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub vocabulary_ids: Vec<String>,
    #[serde(default)]
    pub structure_ids: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transcript: Option<Vec<TranscriptSegment>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quiz: Option<Vec<QuizSection>>,
}

// ==================== Curriculum plan ====================

/// Whether an id names a vocabulary item or a grammar structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ItemType {
    Vocabulary,
    Structure,
}

/// Entry in any plan queue: the item id, its lazily created scheduling
/// state, and when it last moved or was graded.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueEntry {
    pub item_id: String,
    pub item_type: ItemType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduling: Option<SchedulingState>,
    pub updated_at: DateTime<Utc>,
}

impl QueueEntry {
    pub fn new(item_id: impl Into<String>, item_type: ItemType, now: DateTime<Utc>) -> Self {
        Self {
            item_id: item_id.into(),
            item_type,
            scheduling: None,
            updated_at: now,
        }
    }
}

/// One lesson inside a student's plan, with its 6-day cycle counter and
/// the per-lesson active queues.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanLesson {
    pub lesson_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_ref: Option<String>,
    /// Completed practice days in the current cycle, 0-6
    pub completed_cycle_days: u8,
    #[serde(default)]
    pub active_vocabulary: Vec<QueueEntry>,
    #[serde(default)]
    pub active_structures: Vec<QueueEntry>,
}

impl PlanLesson {
    pub fn cycle_complete(&self) -> bool {
        self.completed_cycle_days >= CYCLE_LENGTH_DAYS
    }
}

/// Per-student ordered list of lessons plus the plan-level learned and
/// review queues.
///
/// Invariant: a given item id belongs to exactly one of
/// {lesson-active, learned, review} across the whole plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurriculumPlan {
    pub id: String,
    pub student_id: String,
    #[serde(default)]
    pub lessons: Vec<PlanLesson>,
    #[serde(default)]
    pub learned: Vec<QueueEntry>,
    #[serde(default)]
    pub review: Vec<QueueEntry>,
}

impl CurriculumPlan {
    /// The lesson currently being taught: the first one whose cycle is
    /// not yet complete, else the last lesson of the plan.
    pub fn current_lesson_index(&self) -> Option<usize> {
        if self.lessons.is_empty() {
            return None;
        }
        Some(
            self.lessons
                .iter()
                .position(|l| !l.cycle_complete())
                .unwrap_or(self.lessons.len() - 1),
        )
    }
}

// ==================== Compiled practice items ====================

/// Audio window to play for a practice item, in seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioWindow {
    pub start: f64,
    pub end: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
}

/// Modality-specific payload of a compiled practice item. Exactly one
/// variant per item; adding a modality extends this enum.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum PracticePayload {
    #[serde(rename_all = "camelCase")]
    Flashcard {
        front: String,
        back: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        image_url: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        phonetic: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    GapFill {
        /// Segment text with the matched word replaced by the blank marker
        prompt: String,
        answer: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        audio: Option<AudioWindow>,
    },
    #[serde(rename_all = "camelCase")]
    Scramble {
        /// Uniform-random permutation shown to the student
        scrambled: Vec<String>,
        /// Tokens in correct order
        answer: Vec<String>,
    },
    #[serde(rename_all = "camelCase")]
    MultipleChoice {
        question: String,
        options: Vec<String>,
        correct_index: usize,
        #[serde(skip_serializing_if = "Option::is_none")]
        explanation: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        audio: Option<AudioWindow>,
    },
    /// No payload resolved yet; renderers treat this as a placeholder.
    Pending,
}

/// Compiled, renderable practice unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PracticeItem {
    pub item_id: String,
    pub item_type: ItemType,
    pub modality: Modality,
    /// Primary text of the source record
    pub text: String,
    pub payload: PracticePayload,
    /// Snapshot of the current scheduling state, for UI and debugging
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduling: Option<SchedulingState>,
}

/// One day's assembled practice session for one plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyPracticeSession {
    pub plan_id: String,
    pub lesson_id: String,
    /// 1-based cycle-day index being practiced
    pub day_index: i64,
    pub modality: Modality,
    pub items: Vec<PracticeItem>,
}
