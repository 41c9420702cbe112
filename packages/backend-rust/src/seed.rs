//! Startup seeding: load a JSON fixture of content and plans into the
//! in-memory store so the engine is exercisable without external stores.

use serde::Deserialize;
use thiserror::Error;

use crate::model::{CurriculumPlan, GrammarStructure, LessonContent, VocabularyItem};
use crate::store::MemoryStore;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SeedData {
    pub vocabulary: Vec<VocabularyItem>,
    pub structures: Vec<GrammarStructure>,
    pub lessons: Vec<LessonContent>,
    pub plans: Vec<CurriculumPlan>,
}

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("failed to read seed file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse seed file: {0}")]
    Parse(#[from] serde_json::Error),
}

pub fn load_seed_file(store: &MemoryStore, path: &str) -> Result<(), SeedError> {
    let raw = std::fs::read_to_string(path)?;
    let data: SeedData = serde_json::from_str(&raw)?;
    let counts = (
        data.vocabulary.len(),
        data.structures.len(),
        data.lessons.len(),
        data.plans.len(),
    );

    for item in data.vocabulary {
        store.insert_vocabulary(item);
    }
    for item in data.structures {
        store.insert_structure(item);
    }
    for lesson in data.lessons {
        store.insert_lesson(lesson);
    }
    for plan in data.plans {
        store.insert_plan(plan);
    }

    tracing::info!(
        vocabulary = counts.0,
        structures = counts.1,
        lessons = counts.2,
        plans = counts.3,
        path,
        "seed fixture loaded"
    );
    Ok(())
}
