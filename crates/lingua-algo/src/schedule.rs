//! Cycle-day to modality mapping.

use crate::types::Modality;

/// Map a 1-based cycle-day index to the day's practice modality.
///
/// Days 1-6 follow a fixed rotation; any index outside that range falls
/// back to the generic review modality. Total for all inputs.
pub fn mode_for_day(day: i64) -> Modality {
    match day {
        1 => Modality::FlashcardImage,
        2 => Modality::ListeningGapFill,
        3 => Modality::SentenceScramble,
        4 => Modality::FlashcardRecall,
        5 => Modality::ComprehensiveQuiz,
        6 => Modality::ListeningChoice,
        _ => Modality::Review,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_sequence_for_cycle_days() {
        assert_eq!(mode_for_day(1), Modality::FlashcardImage);
        assert_eq!(mode_for_day(2), Modality::ListeningGapFill);
        assert_eq!(mode_for_day(3), Modality::SentenceScramble);
        assert_eq!(mode_for_day(4), Modality::FlashcardRecall);
        assert_eq!(mode_for_day(5), Modality::ComprehensiveQuiz);
        assert_eq!(mode_for_day(6), Modality::ListeningChoice);
    }

    #[test]
    fn out_of_range_days_fall_back_to_review() {
        assert_eq!(mode_for_day(0), Modality::Review);
        assert_eq!(mode_for_day(7), Modality::Review);
        assert_eq!(mode_for_day(-3), Modality::Review);
        assert_eq!(mode_for_day(100), Modality::Review);
    }
}
