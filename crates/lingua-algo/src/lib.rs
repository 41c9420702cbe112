//! # lingua-algo - core scheduling algorithms for language practice
//!
//! Pure-Rust building blocks for the adaptive practice engine:
//!
//! - **SM-2 retention** - interval/ease/repetition scheduling from graded recall
//! - **Cycle rotation** - fixed day-to-modality mapping for the 6-day lesson cycle
//! - **Scramble shuffling** - uniform permutations with an injected random source
//!
//! Design goals:
//! - **Pure** - no I/O, no clocks read internally, no hidden state
//! - **Reusable** - independent of transport and persistence
//! - **Fully tested** - every algorithm carries its unit tests
//!
//! ## Modules
//!
//! - [`sm2`] - SM-2-derived retention engine
//! - [`schedule`] - cycle-day to modality mapping
//! - [`scramble`] - deterministic uniform shuffling
//! - [`types`] - shared types and constants

pub mod schedule;
pub mod scramble;
pub mod sm2;
pub mod types;

pub use schedule::mode_for_day;
pub use scramble::scramble;
pub use sm2::advance;
pub use types::{
    Grade, Modality, SchedulingState, CYCLE_LENGTH_DAYS, FIRST_INTERVAL_DAYS, INITIAL_EASE_FACTOR,
    MIN_EASE_FACTOR, PASS_GRADE, SECOND_INTERVAL_DAYS,
};
