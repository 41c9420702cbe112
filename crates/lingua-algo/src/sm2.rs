//! SM-2-derived retention engine.
//!
//! Pure function of (state, grade, now); no I/O, no hidden state. The
//! hosting service decides when to call it and where the result is stored.

use chrono::{DateTime, Duration, Utc};

use crate::types::{
    Grade, SchedulingState, FIRST_INTERVAL_DAYS, MIN_EASE_FACTOR, SECOND_INTERVAL_DAYS,
};

/// Advance an item's scheduling state from a graded response.
///
/// `state` of `None` means the item has never been practiced and is treated
/// as the identity state (interval 0, repetition 0, ease 2.5, due now).
///
/// Failing grades (< 3) reset the repetition streak and schedule the item
/// for tomorrow without touching the ease factor. Passing grades extend the
/// interval along the 1, 6, round(interval x ease) progression and nudge
/// the ease factor by the SM-2 quality formula, floored at 1.3.
pub fn advance(
    state: Option<&SchedulingState>,
    grade: Grade,
    now: DateTime<Utc>,
) -> SchedulingState {
    let current = match state {
        Some(s) => s.clone(),
        None => SchedulingState::new(now),
    };

    if !grade.is_pass() {
        return SchedulingState {
            interval_days: FIRST_INTERVAL_DAYS,
            repetition: 0,
            ease_factor: current.ease_factor,
            due_date: now + Duration::days(FIRST_INTERVAL_DAYS),
        };
    }

    let repetition = current.repetition + 1;
    let interval_days = match repetition {
        1 => FIRST_INTERVAL_DAYS,
        2 => SECOND_INTERVAL_DAYS,
        _ => (current.interval_days as f64 * current.ease_factor).round() as i64,
    };

    let q = grade.value() as f64;
    let ease_factor =
        (current.ease_factor + (0.1 - (5.0 - q) * (0.08 + (5.0 - q) * 0.02))).max(MIN_EASE_FACTOR);

    SchedulingState {
        interval_days,
        repetition,
        ease_factor,
        due_date: now + Duration::days(interval_days),
    }
}
