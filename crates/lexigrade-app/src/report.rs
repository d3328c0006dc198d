use std::collections::HashMap;

use serde::Serialize;

use lexigrade_core::scorer::score_band;
use lexigrade_lang_english::EnglishPipeline;
use lexigrade_types::{
    CefrLevel, ClassificationStats, DifficultyLevel, WordClassification,
};

/// JSON payload for the `classify` command
#[derive(Debug, Serialize)]
pub struct ClassifyReport {
    pub words: Vec<WordClassification>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<ClassificationStats>,
}

/// JSON payload for the `score` command
#[derive(Debug, Serialize)]
pub struct ScoreReport {
    pub level: DifficultyLevel,
    pub score: u32,
    /// Six-way band the score lands in, finer than `level`
    pub band: CefrLevel,
    pub breakdown: HashMap<CefrLevel, f64>,
}

pub fn classify(pipeline: &mut EnglishPipeline, text: &str, with_stats: bool) -> ClassifyReport {
    let words = pipeline.classify_text(text);
    let stats = with_stats.then(|| pipeline.statistics(&words));
    ClassifyReport { words, stats }
}

pub fn score(
    pipeline: &mut EnglishPipeline,
    text: &str,
    genres: Option<&[String]>,
) -> ScoreReport {
    let result = pipeline.score_text(text, genres);
    ScoreReport {
        level: result.level,
        band: score_band(result.score),
        score: result.score,
        breakdown: result.breakdown,
    }
}
