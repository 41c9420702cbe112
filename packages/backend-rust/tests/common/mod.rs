#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::Arc;

use axum::Router;
use chrono::Utc;

use lingua_backend_rust::config::PracticePolicy;
use lingua_backend_rust::create_app;
use lingua_backend_rust::model::{
    CurriculumPlan, ExampleSentence, GrammarStructure, ItemType, LanguageLevel, LessonContent,
    PlanLesson, QueueEntry, QuizQuestion, QuizSection, Sense, SentenceToken, TranscriptSegment,
    VocabularyItem,
};
use lingua_backend_rust::state::AppState;
use lingua_backend_rust::store::MemoryStore;

pub fn seeded_store() -> Arc<MemoryStore> {
    let now = Utc::now();
    let store = Arc::new(MemoryStore::new());

    store.insert_vocabulary(VocabularyItem {
        id: "v1".to_string(),
        language: "es".to_string(),
        level: LanguageLevel::A1,
        category: "noun".to_string(),
        text: "manzana".to_string(),
        phonetic: Some("manˈθana".to_string()),
        image_url: Some("img://manzana.png".to_string()),
        senses: vec![Sense {
            context: Some("food".to_string()),
            definition: Some("a round fruit".to_string()),
            translation: Some("apple".to_string()),
            example: Some("Como una manzana cada día".to_string()),
            example_translation: Some("I eat an apple every day".to_string()),
        }],
    });

    store.insert_structure(GrammarStructure {
        id: "s1".to_string(),
        language: "es".to_string(),
        level: LanguageLevel::A2,
        pattern: "ir + a + infinitive".to_string(),
        examples: vec![ExampleSentence {
            text: "Voy a comer una manzana".to_string(),
            tokens: vec!["Voy", "a", "comer", "una", "manzana"]
                .into_iter()
                .enumerate()
                .map(|(i, w)| SentenceToken {
                    word: w.to_string(),
                    vocabulary_id: if w == "manzana" {
                        Some("v1".to_string())
                    } else {
                        None
                    },
                    position: i as i32,
                    role: "word".to_string(),
                })
                .collect(),
        }],
    });

    let mut tagged_segment = TranscriptSegment {
        start: 12.0,
        end: 17.5,
        text: "Hoy como una manzana roja".to_string(),
        speaker: Some("narrator".to_string()),
        vocabulary_ids: HashSet::new(),
        structure_ids: HashSet::new(),
    };
    tagged_segment.vocabulary_ids.insert("v1".to_string());

    store.insert_lesson(LessonContent {
        id: "lesson-1".to_string(),
        title: Some("La comida".to_string()),
        vocabulary_ids: vec!["v1".to_string()],
        structure_ids: vec!["s1".to_string()],
        audio_url: Some("audio://lesson-1.mp3".to_string()),
        transcript: Some(vec![
            TranscriptSegment {
                start: 0.0,
                end: 12.0,
                text: "Bienvenidos a la lección".to_string(),
                speaker: Some("narrator".to_string()),
                vocabulary_ids: HashSet::new(),
                structure_ids: HashSet::new(),
            },
            tagged_segment,
        ]),
        quiz: Some(vec![QuizSection {
            title: Some("Comprensión".to_string()),
            questions: vec![QuizQuestion {
                text: "¿Qué come hoy?".to_string(),
                options: vec!["una manzana".to_string(), "pan".to_string()],
                correct_index: 0,
                explanation: Some("Se menciona la manzana".to_string()),
                related_id: Some("v1".to_string()),
            }],
        }]),
    });

    store.insert_plan(CurriculumPlan {
        id: "plan-1".to_string(),
        student_id: "student-1".to_string(),
        lessons: vec![PlanLesson {
            lesson_id: "lesson-1".to_string(),
            scheduled_date: None,
            class_ref: None,
            completed_cycle_days: 0,
            active_vocabulary: vec![QueueEntry::new("v1", ItemType::Vocabulary, now)],
            active_structures: vec![QueueEntry::new("s1", ItemType::Structure, now)],
        }],
        learned: vec![],
        review: vec![],
    });

    store
}

pub fn create_test_app() -> Router {
    create_app(AppState::with_memory_store(
        seeded_store(),
        PracticePolicy::default(),
    ))
}
