//! Common Types and Constants
//!
//! Shared scheduling data structures used across the practice engine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ==================== Constants ====================

/// Ease factor assigned to an item that has never been practiced
pub const INITIAL_EASE_FACTOR: f64 = 2.5;

/// Floor below which the ease factor never drops
pub const MIN_EASE_FACTOR: f64 = 1.3;

/// Interval after the first successful repetition (days)
pub const FIRST_INTERVAL_DAYS: i64 = 1;

/// Interval after the second successful repetition (days)
pub const SECOND_INTERVAL_DAYS: i64 = 6;

/// Lowest grade that counts as a successful recall
pub const PASS_GRADE: u8 = 3;

/// Number of practice days in one lesson cycle
pub const CYCLE_LENGTH_DAYS: u8 = 6;

// ==================== Grade ====================

/// A graded response on the 0-5 SM-2 quality scale.
///
/// Construction is validated; anything outside 0..=5 is rejected so the
/// retention engine never sees an out-of-range grade.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Grade(u8);

impl Grade {
    pub fn new(value: u8) -> Option<Self> {
        if value <= 5 {
            Some(Self(value))
        } else {
            None
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// Grades of 3 and above count as a successful recall.
    pub fn is_pass(self) -> bool {
        self.0 >= PASS_GRADE
    }
}

// ==================== Modality ====================

/// The interaction format used to practice an item on a given cycle day.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Modality {
    /// Flashcard with illustration (cycle day 1)
    FlashcardImage,
    /// Listening fill-in-the-blank (cycle day 2)
    ListeningGapFill,
    /// Sentence scramble (cycle day 3)
    SentenceScramble,
    /// Text-only recall flashcard (cycle day 4)
    FlashcardRecall,
    /// Comprehensive quiz over the lesson (cycle day 5)
    ComprehensiveQuiz,
    /// Listening multiple-choice (cycle day 6)
    ListeningChoice,
    /// Generic review of previously learned items (outside the cycle)
    Review,
}

impl Modality {
    /// Whether this modality needs lesson items to render at all.
    /// Only the generic review modality can produce an empty-but-valid day.
    pub fn requires_primary_content(self) -> bool {
        !matches!(self, Modality::Review)
    }
}

// ==================== Scheduling state ====================

/// Per-item, per-plan retention record, mutated exclusively by [`advance`].
///
/// [`advance`]: crate::sm2::advance
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchedulingState {
    /// Current inter-repetition interval in calendar days
    pub interval_days: i64,
    /// Consecutive successful repetitions
    pub repetition: i32,
    /// SM-2 ease factor, floored at [`MIN_EASE_FACTOR`]
    pub ease_factor: f64,
    /// Date at which the item should next be presented
    pub due_date: DateTime<Utc>,
}

impl SchedulingState {
    /// Identity state for an item that has never been practiced:
    /// due immediately, no accumulated interval or repetitions.
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            interval_days: 0,
            repetition: 0,
            ease_factor: INITIAL_EASE_FACTOR,
            due_date: now,
        }
    }

    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.due_date <= now
    }
}
