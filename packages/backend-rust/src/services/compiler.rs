//! Content compiler: turns a raw vocabulary/grammar record into a
//! modality-specific practice payload.
//!
//! Missing optional content never fails a compile; every modality carries
//! an explicit fallback chain down to a plain flashcard. The only error is
//! a record whose required primary text is absent entirely.

use std::sync::OnceLock;

use rand::Rng;
use regex::{Regex, RegexBuilder};
use thiserror::Error;
use tracing::warn;

use lingua_algo::{scramble, Modality};

use crate::model::{
    AudioWindow, GrammarStructure, ItemType, LessonContent, PracticeItem, PracticePayload,
    QuizQuestion, TranscriptSegment, VocabularyItem,
};

/// Marker substituted for the blanked word in gap-fill prompts.
pub const BLANK_MARKER: &str = "____";

/// Segments shorter than this are widened to their neighbours so the clip
/// stays intelligible.
const MIN_SEGMENT_SECONDS: f64 = 3.0;

#[derive(Debug, Error)]
pub enum CompileError {
    #[error("{item_type:?} record {item_id} has no primary text")]
    MissingPrimaryText {
        item_id: String,
        item_type: ItemType,
    },
}

/// Borrowed view over the two practicable record kinds.
#[derive(Clone, Copy)]
pub enum SourceRecord<'a> {
    Vocabulary(&'a VocabularyItem),
    Structure(&'a GrammarStructure),
}

impl<'a> SourceRecord<'a> {
    pub fn item_id(&self) -> &str {
        match self {
            SourceRecord::Vocabulary(v) => &v.id,
            SourceRecord::Structure(s) => &s.id,
        }
    }

    pub fn item_type(&self) -> ItemType {
        match self {
            SourceRecord::Vocabulary(_) => ItemType::Vocabulary,
            SourceRecord::Structure(_) => ItemType::Structure,
        }
    }

    /// Primary text: the word itself for vocabulary, the first example
    /// sentence for structures.
    fn primary_text(&self) -> Option<&str> {
        match self {
            SourceRecord::Vocabulary(v) => {
                if v.text.trim().is_empty() {
                    None
                } else {
                    Some(&v.text)
                }
            }
            SourceRecord::Structure(s) => s
                .examples
                .first()
                .map(|e| e.text.as_str())
                .filter(|t| !t.trim().is_empty()),
        }
    }

    fn missing_text(&self) -> CompileError {
        CompileError::MissingPrimaryText {
            item_id: self.item_id().to_string(),
            item_type: self.item_type(),
        }
    }
}

/// Compile one record for one modality.
///
/// `lesson` supplies transcript and audio context for the listening
/// modalities; when it is absent the fallback chains apply. The random
/// source drives scramble generation and is injected for deterministic
/// tests.
pub fn compile<R: Rng + ?Sized>(
    record: SourceRecord<'_>,
    modality: Modality,
    lesson: Option<&LessonContent>,
    rng: &mut R,
) -> Result<PracticeItem, CompileError> {
    match modality {
        Modality::FlashcardImage => flashcard(record, modality, true),
        Modality::FlashcardRecall | Modality::Review => flashcard(record, modality, false),
        Modality::ListeningGapFill => gap_fill(record, lesson, rng),
        Modality::SentenceScramble => scramble_item(record, modality, rng),
        // Quiz days are compiled per lesson question via `compile_quiz`;
        // a stray per-record call degrades to a recall card.
        Modality::ComprehensiveQuiz | Modality::ListeningChoice => {
            flashcard(record, modality, false)
        }
    }
}

/// Compile one practice item per question in the lesson's quiz sections.
pub fn compile_quiz(lesson: &LessonContent, modality: Modality) -> Vec<PracticeItem> {
    let Some(sections) = lesson.quiz.as_ref() else {
        return Vec::new();
    };

    let mut items = Vec::new();
    let mut question_no = 0usize;
    for section in sections {
        for question in &section.questions {
            question_no += 1;
            let item_id = question
                .related_id
                .clone()
                .unwrap_or_else(|| format!("{}-q{}", lesson.id, question_no));
            let item_type = match &question.related_id {
                Some(id) if lesson.structure_ids.iter().any(|s| s == id) => ItemType::Structure,
                _ => ItemType::Vocabulary,
            };
            let audio = resolve_question_audio(lesson, question);
            items.push(PracticeItem {
                item_id,
                item_type,
                modality,
                text: question.text.clone(),
                payload: PracticePayload::MultipleChoice {
                    question: question.text.clone(),
                    options: question.options.clone(),
                    correct_index: question.correct_index,
                    explanation: question.explanation.clone(),
                    audio,
                },
                scheduling: None,
            });
        }
    }
    items
}

// ==================== Flashcards ====================

fn flashcard(
    record: SourceRecord<'_>,
    modality: Modality,
    with_image: bool,
) -> Result<PracticeItem, CompileError> {
    let text = record.primary_text().ok_or_else(|| record.missing_text())?;

    let payload = match record {
        SourceRecord::Vocabulary(v) => {
            let back = v
                .senses
                .first()
                .and_then(|s| s.translation.clone().or_else(|| s.definition.clone()))
                .unwrap_or_default();
            PracticePayload::Flashcard {
                front: v.text.clone(),
                back,
                image_url: if with_image { v.image_url.clone() } else { None },
                phonetic: v.phonetic.clone(),
            }
        }
        SourceRecord::Structure(s) => PracticePayload::Flashcard {
            front: text.to_string(),
            back: s.pattern.clone(),
            image_url: None,
            phonetic: None,
        },
    };

    Ok(make_item(record, modality, text, payload))
}

// ==================== Gap fill ====================

fn gap_fill<R: Rng + ?Sized>(
    record: SourceRecord<'_>,
    lesson: Option<&LessonContent>,
    rng: &mut R,
) -> Result<PracticeItem, CompileError> {
    let text = record.primary_text().ok_or_else(|| record.missing_text())?;

    if let Some(lesson) = lesson {
        if let Some(item) = try_gap_fill(record, text, lesson) {
            return Ok(item);
        }
    }

    // No usable segment: vocabulary re-renders as an illustrated
    // flashcard, structures as a scramble (a structure has no single
    // "back" translation to put on a card).
    match record {
        SourceRecord::Vocabulary(_) => flashcard(record, Modality::ListeningGapFill, true),
        SourceRecord::Structure(_) => scramble_item(record, Modality::ListeningGapFill, rng),
    }
}

fn try_gap_fill(
    record: SourceRecord<'_>,
    text: &str,
    lesson: &LessonContent,
) -> Option<PracticeItem> {
    let segments = sane_segments(lesson);
    if segments.is_empty() {
        return None;
    }

    let word_re = whole_word_regex(match record {
        // Blank the word itself, not a whole example sentence.
        SourceRecord::Vocabulary(v) => &v.text,
        SourceRecord::Structure(_) => text,
    })?;

    let index = find_segment(&segments, record.item_id(), &word_re)?;
    let segment = segments[index];

    // Even a related-id hit must contain the word literally, otherwise
    // there is nothing to blank and the fallback chain applies.
    let matched = word_re.find(&segment.text)?;
    let answer = matched.as_str().to_string();
    let mut prompt = segment.text.clone();
    prompt.replace_range(matched.range(), BLANK_MARKER);

    let audio = Some(widened_window(&segments, index, lesson.audio_url.clone()));

    Some(make_item(
        record,
        Modality::ListeningGapFill,
        text,
        PracticePayload::GapFill {
            prompt,
            answer,
            audio,
        },
    ))
}

fn find_segment(segments: &[&TranscriptSegment], item_id: &str, word_re: &Regex) -> Option<usize> {
    segments
        .iter()
        .position(|seg| seg.references(item_id))
        .or_else(|| segments.iter().position(|seg| word_re.is_match(&seg.text)))
}

/// Audio window for `segments[index]`, widened to the previous segment's
/// start and the next segment's end when the clip runs under three
/// seconds.
fn widened_window(
    segments: &[&TranscriptSegment],
    index: usize,
    audio_url: Option<String>,
) -> AudioWindow {
    let segment = segments[index];
    let mut start = segment.start;
    let mut end = segment.end;

    if segment.duration() < MIN_SEGMENT_SECONDS {
        if index > 0 {
            start = segments[index - 1].start;
        }
        if index + 1 < segments.len() {
            end = segments[index + 1].end;
        }
    }

    AudioWindow {
        start,
        end,
        audio_url,
    }
}

/// Transcript segments with consistent boundaries. Inconsistent ones are
/// logged and skipped, which downgrades them to "segment not found".
fn sane_segments(lesson: &LessonContent) -> Vec<&TranscriptSegment> {
    let Some(transcript) = lesson.transcript.as_ref() else {
        return Vec::new();
    };

    transcript
        .iter()
        .enumerate()
        .filter(|(idx, seg)| {
            let ok = seg.start.is_finite() && seg.end.is_finite() && seg.end > seg.start;
            if !ok {
                warn!(
                    lesson_id = %lesson.id,
                    segment = idx,
                    start = seg.start,
                    end = seg.end,
                    "malformed transcript segment, treating as absent"
                );
            }
            ok
        })
        .map(|(_, seg)| seg)
        .collect()
}

fn whole_word_regex(word: &str) -> Option<Regex> {
    if word.trim().is_empty() {
        return None;
    }
    RegexBuilder::new(&format!(r"\b{}\b", regex::escape(word)))
        .case_insensitive(true)
        .build()
        .ok()
}

// ==================== Scramble ====================

fn scramble_item<R: Rng + ?Sized>(
    record: SourceRecord<'_>,
    modality: Modality,
    rng: &mut R,
) -> Result<PracticeItem, CompileError> {
    let text = record.primary_text().ok_or_else(|| record.missing_text())?;

    let answer: Option<Vec<String>> = match record {
        SourceRecord::Structure(s) => s.examples.first().map(|example| {
            if example.tokens.is_empty() {
                whitespace_tokens(&example.text)
            } else {
                let mut tokens: Vec<_> = example.tokens.iter().collect();
                tokens.sort_by_key(|t| t.position);
                tokens.into_iter().map(|t| t.word.clone()).collect()
            }
        }),
        SourceRecord::Vocabulary(v) => v
            .senses
            .first()
            .and_then(|s| s.example.as_deref())
            .map(whitespace_tokens)
            .filter(|tokens| !tokens.is_empty()),
    };

    match answer {
        Some(answer) => {
            let scrambled = scramble(&answer, rng);
            Ok(make_item(
                record,
                modality,
                text,
                PracticePayload::Scramble { scrambled, answer },
            ))
        }
        // A vocabulary item without an example sentence has nothing to
        // scramble; it degrades to an illustrated flashcard.
        None => flashcard(record, modality, true),
    }
}

fn whitespace_tokens(text: &str) -> Vec<String> {
    text.split_whitespace().map(|t| t.to_string()).collect()
}

// ==================== Quiz audio ====================

fn inline_range_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(\d{1,2}):([0-5]\d)\s*-\s*(\d{1,2}):([0-5]\d)").expect("valid pattern")
    })
}

/// Attach an audio window to a quiz question: first a transcript segment
/// related to the question's item, else an inline "mm:ss - mm:ss" range in
/// the question text, else none (a valid state, not an error).
fn resolve_question_audio(lesson: &LessonContent, question: &QuizQuestion) -> Option<AudioWindow> {
    if let Some(related_id) = question.related_id.as_deref() {
        let segments = sane_segments(lesson);
        if let Some(seg) = segments.iter().find(|seg| seg.references(related_id)) {
            return Some(AudioWindow {
                start: seg.start,
                end: seg.end,
                audio_url: lesson.audio_url.clone(),
            });
        }
    }

    let caps = inline_range_regex().captures(&question.text)?;
    let minutes_start: f64 = caps[1].parse().ok()?;
    let seconds_start: f64 = caps[2].parse().ok()?;
    let minutes_end: f64 = caps[3].parse().ok()?;
    let seconds_end: f64 = caps[4].parse().ok()?;
    let start = minutes_start * 60.0 + seconds_start;
    let end = minutes_end * 60.0 + seconds_end;
    if end <= start {
        return None;
    }
    Some(AudioWindow {
        start,
        end,
        audio_url: lesson.audio_url.clone(),
    })
}

fn make_item(
    record: SourceRecord<'_>,
    modality: Modality,
    text: &str,
    payload: PracticePayload,
) -> PracticeItem {
    PracticeItem {
        item_id: record.item_id().to_string(),
        item_type: record.item_type(),
        modality,
        text: text.to_string(),
        payload,
        scheduling: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ExampleSentence, LanguageLevel, QuizSection, Sense, SentenceToken};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::collections::HashSet;

    fn vocab(id: &str, text: &str) -> VocabularyItem {
        VocabularyItem {
            id: id.to_string(),
            language: "fr".to_string(),
            level: LanguageLevel::A2,
            category: "noun".to_string(),
            text: text.to_string(),
            phonetic: None,
            image_url: Some("img://fromage.png".to_string()),
            senses: vec![Sense {
                context: None,
                definition: Some("a dairy product".to_string()),
                translation: Some("cheese".to_string()),
                example: Some("Je mange du fromage tous les jours".to_string()),
                example_translation: None,
            }],
        }
    }

    fn structure(id: &str) -> GrammarStructure {
        GrammarStructure {
            id: id.to_string(),
            language: "fr".to_string(),
            level: LanguageLevel::B1,
            pattern: "ne ... pas".to_string(),
            examples: vec![ExampleSentence {
                text: "Je ne parle pas anglais".to_string(),
                tokens: vec!["Je", "ne", "parle", "pas", "anglais"]
                    .into_iter()
                    .enumerate()
                    .map(|(i, w)| SentenceToken {
                        word: w.to_string(),
                        vocabulary_id: None,
                        position: i as i32,
                        role: "word".to_string(),
                    })
                    .collect(),
            }],
        }
    }

    fn segment(start: f64, end: f64, text: &str) -> TranscriptSegment {
        TranscriptSegment {
            start,
            end,
            text: text.to_string(),
            speaker: None,
            vocabulary_ids: HashSet::new(),
            structure_ids: HashSet::new(),
        }
    }

    fn lesson_with_transcript(segments: Vec<TranscriptSegment>) -> LessonContent {
        LessonContent {
            id: "lesson-1".to_string(),
            title: None,
            vocabulary_ids: vec!["v1".to_string()],
            structure_ids: vec!["s1".to_string()],
            audio_url: Some("audio://lesson-1.mp3".to_string()),
            transcript: Some(segments),
            quiz: None,
        }
    }

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(99)
    }

    #[test]
    fn flashcard_prefers_translation_over_definition() {
        let v = vocab("v1", "fromage");
        let item = compile(
            SourceRecord::Vocabulary(&v),
            Modality::FlashcardImage,
            None,
            &mut rng(),
        )
        .unwrap();
        match item.payload {
            PracticePayload::Flashcard {
                front,
                back,
                image_url,
                ..
            } => {
                assert_eq!(front, "fromage");
                assert_eq!(back, "cheese");
                assert!(image_url.is_some());
            }
            other => panic!("expected flashcard, got {other:?}"),
        }
    }

    #[test]
    fn flashcard_with_no_senses_degrades_to_empty_back() {
        let mut v = vocab("v1", "fromage");
        v.senses.clear();
        let item = compile(
            SourceRecord::Vocabulary(&v),
            Modality::FlashcardRecall,
            None,
            &mut rng(),
        )
        .unwrap();
        match item.payload {
            PracticePayload::Flashcard { back, image_url, .. } => {
                assert_eq!(back, "");
                assert!(image_url.is_none(), "recall cards carry no image");
            }
            other => panic!("expected flashcard, got {other:?}"),
        }
    }

    #[test]
    fn structure_flashcard_uses_first_example_front() {
        let s = structure("s1");
        let item = compile(
            SourceRecord::Structure(&s),
            Modality::FlashcardImage,
            None,
            &mut rng(),
        )
        .unwrap();
        match item.payload {
            PracticePayload::Flashcard { front, back, .. } => {
                assert_eq!(front, "Je ne parle pas anglais");
                assert_eq!(back, "ne ... pas");
            }
            other => panic!("expected flashcard, got {other:?}"),
        }
    }

    #[test]
    fn structure_without_examples_is_missing_primary_text() {
        let mut s = structure("s1");
        s.examples.clear();
        let err = compile(
            SourceRecord::Structure(&s),
            Modality::FlashcardImage,
            None,
            &mut rng(),
        )
        .unwrap_err();
        assert!(matches!(err, CompileError::MissingPrimaryText { .. }));
    }

    #[test]
    fn gap_fill_matches_whole_word_case_insensitively() {
        let v = vocab("v1", "fromage");
        let lesson = lesson_with_transcript(vec![
            segment(0.0, 4.0, "Le fromagerie est ouverte"),
            segment(4.0, 9.0, "J'adore le Fromage de chèvre"),
        ]);
        let item = compile(
            SourceRecord::Vocabulary(&v),
            Modality::ListeningGapFill,
            Some(&lesson),
            &mut rng(),
        )
        .unwrap();
        match item.payload {
            PracticePayload::GapFill {
                prompt,
                answer,
                audio,
            } => {
                assert_eq!(prompt, "J'adore le ____ de chèvre");
                assert_eq!(answer, "Fromage");
                let audio = audio.unwrap();
                assert_eq!(audio.start, 4.0);
                assert_eq!(audio.end, 9.0);
            }
            other => panic!("expected gap fill, got {other:?}"),
        }
    }

    #[test]
    fn gap_fill_prefers_related_id_segment() {
        let v = vocab("v1", "fromage");
        let mut tagged = segment(10.0, 14.0, "Du fromage, s'il vous plaît");
        tagged.vocabulary_ids.insert("v1".to_string());
        let lesson = lesson_with_transcript(vec![
            segment(0.0, 5.0, "On parle de fromage ici aussi"),
            tagged,
        ]);
        let item = compile(
            SourceRecord::Vocabulary(&v),
            Modality::ListeningGapFill,
            Some(&lesson),
            &mut rng(),
        )
        .unwrap();
        match item.payload {
            PracticePayload::GapFill { audio, .. } => {
                assert_eq!(audio.unwrap().start, 10.0);
            }
            other => panic!("expected gap fill, got {other:?}"),
        }
    }

    #[test]
    fn short_segment_widens_to_neighbours() {
        let v = vocab("v1", "fromage");
        let lesson = lesson_with_transcript(vec![
            segment(8.0, 10.0, "Bonjour à tous"),
            segment(10.0, 11.5, "Voici le fromage"),
            segment(11.5, 14.0, "Et voilà le dessert"),
        ]);
        let item = compile(
            SourceRecord::Vocabulary(&v),
            Modality::ListeningGapFill,
            Some(&lesson),
            &mut rng(),
        )
        .unwrap();
        match item.payload {
            PracticePayload::GapFill { audio, .. } => {
                let audio = audio.unwrap();
                assert_eq!(audio.start, 8.0);
                assert_eq!(audio.end, 14.0);
            }
            other => panic!("expected gap fill, got {other:?}"),
        }
    }

    #[test]
    fn vocabulary_gap_fill_without_segment_falls_back_to_flashcard() {
        let v = vocab("v1", "fromage");
        let lesson = lesson_with_transcript(vec![segment(0.0, 5.0, "Rien à voir ici")]);
        let item = compile(
            SourceRecord::Vocabulary(&v),
            Modality::ListeningGapFill,
            Some(&lesson),
            &mut rng(),
        )
        .unwrap();
        match item.payload {
            PracticePayload::Flashcard { image_url, .. } => assert!(image_url.is_some()),
            other => panic!("expected flashcard fallback, got {other:?}"),
        }
    }

    #[test]
    fn structure_gap_fill_without_segment_falls_back_to_scramble() {
        let s = structure("s1");
        let lesson = lesson_with_transcript(vec![segment(0.0, 5.0, "Rien à voir ici")]);
        let item = compile(
            SourceRecord::Structure(&s),
            Modality::ListeningGapFill,
            Some(&lesson),
            &mut rng(),
        )
        .unwrap();
        assert!(matches!(item.payload, PracticePayload::Scramble { .. }));
    }

    #[test]
    fn malformed_segments_are_skipped() {
        let v = vocab("v1", "fromage");
        let lesson = lesson_with_transcript(vec![
            segment(5.0, 2.0, "J'adore le fromage"), // end before start
            segment(f64::NAN, 4.0, "du fromage encore"),
        ]);
        let item = compile(
            SourceRecord::Vocabulary(&v),
            Modality::ListeningGapFill,
            Some(&lesson),
            &mut rng(),
        )
        .unwrap();
        // Both segments are malformed, so the compile falls through.
        assert!(matches!(item.payload, PracticePayload::Flashcard { .. }));
    }

    #[test]
    fn scramble_is_permutation_of_token_order() {
        let s = structure("s1");
        let item = compile(
            SourceRecord::Structure(&s),
            Modality::SentenceScramble,
            None,
            &mut rng(),
        )
        .unwrap();
        match item.payload {
            PracticePayload::Scramble { scrambled, answer } => {
                assert_eq!(answer, vec!["Je", "ne", "parle", "pas", "anglais"]);
                let mut a = scrambled.clone();
                let mut b = answer.clone();
                a.sort();
                b.sort();
                assert_eq!(a, b);
            }
            other => panic!("expected scramble, got {other:?}"),
        }
    }

    #[test]
    fn scramble_orders_tokens_by_position_index() {
        let mut s = structure("s1");
        s.examples[0].tokens.reverse(); // stored out of order
        let item = compile(
            SourceRecord::Structure(&s),
            Modality::SentenceScramble,
            None,
            &mut rng(),
        )
        .unwrap();
        match item.payload {
            PracticePayload::Scramble { answer, .. } => {
                assert_eq!(answer, vec!["Je", "ne", "parle", "pas", "anglais"]);
            }
            other => panic!("expected scramble, got {other:?}"),
        }
    }

    #[test]
    fn vocabulary_scramble_splits_example_sentence() {
        let v = vocab("v1", "fromage");
        let item = compile(
            SourceRecord::Vocabulary(&v),
            Modality::SentenceScramble,
            None,
            &mut rng(),
        )
        .unwrap();
        match item.payload {
            PracticePayload::Scramble { answer, .. } => {
                assert_eq!(
                    answer,
                    vec!["Je", "mange", "du", "fromage", "tous", "les", "jours"]
                );
            }
            other => panic!("expected scramble, got {other:?}"),
        }
    }

    #[test]
    fn vocabulary_scramble_without_example_falls_back_to_flashcard() {
        let mut v = vocab("v1", "fromage");
        v.senses[0].example = None;
        let item = compile(
            SourceRecord::Vocabulary(&v),
            Modality::SentenceScramble,
            None,
            &mut rng(),
        )
        .unwrap();
        assert!(matches!(item.payload, PracticePayload::Flashcard { .. }));
    }

    #[test]
    fn quiz_audio_resolution_priority() {
        let mut tagged = segment(20.0, 26.0, "La réponse est ici");
        tagged.vocabulary_ids.insert("v1".to_string());
        let mut lesson = lesson_with_transcript(vec![tagged]);
        lesson.quiz = Some(vec![QuizSection {
            title: Some("Comprehension".to_string()),
            questions: vec![
                QuizQuestion {
                    text: "Qu'est-ce qu'on mange?".to_string(),
                    options: vec!["pain".to_string(), "fromage".to_string()],
                    correct_index: 1,
                    explanation: None,
                    related_id: Some("v1".to_string()),
                },
                QuizQuestion {
                    text: "Écoutez 01:05 - 01:30 et répondez".to_string(),
                    options: vec!["oui".to_string(), "non".to_string()],
                    correct_index: 0,
                    explanation: None,
                    related_id: None,
                },
                QuizQuestion {
                    text: "Question sans audio".to_string(),
                    options: vec!["a".to_string(), "b".to_string()],
                    correct_index: 0,
                    explanation: None,
                    related_id: None,
                },
            ],
        }]);

        let items = compile_quiz(&lesson, Modality::ComprehensiveQuiz);
        assert_eq!(items.len(), 3);

        match &items[0].payload {
            PracticePayload::MultipleChoice { audio, .. } => {
                let audio = audio.as_ref().unwrap();
                assert_eq!(audio.start, 20.0);
                assert_eq!(audio.end, 26.0);
            }
            other => panic!("expected multiple choice, got {other:?}"),
        }
        match &items[1].payload {
            PracticePayload::MultipleChoice { audio, .. } => {
                let audio = audio.as_ref().unwrap();
                assert_eq!(audio.start, 65.0);
                assert_eq!(audio.end, 90.0);
            }
            other => panic!("expected multiple choice, got {other:?}"),
        }
        match &items[2].payload {
            PracticePayload::MultipleChoice { audio, .. } => assert!(audio.is_none()),
            other => panic!("expected multiple choice, got {other:?}"),
        }
    }

    #[test]
    fn quiz_items_without_related_id_get_synthetic_ids() {
        let mut lesson = lesson_with_transcript(vec![]);
        lesson.quiz = Some(vec![QuizSection {
            title: None,
            questions: vec![QuizQuestion {
                text: "Une question".to_string(),
                options: vec!["a".to_string()],
                correct_index: 0,
                explanation: None,
                related_id: None,
            }],
        }]);
        let items = compile_quiz(&lesson, Modality::ListeningChoice);
        assert_eq!(items[0].item_id, "lesson-1-q1");
    }
}
