use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use lexigrade_config::Config;
use lexigrade_config::classifier::EmbeddingConfig;
use lexigrade_core::classifier::{CefrClassifier, get_statistics};
use lexigrade_core::embedding::EmbeddingClassifier;
use lexigrade_core::language::{EmbeddingLookup, ZipfLookup};
use lexigrade_core::preprocess;
use lexigrade_core::scorer::DifficultyScorer;
use lexigrade_core::wordlist::WordlistStore;
use lexigrade_types::{
    CefrLevel, ClassificationSource, ClassificationStats, DifficultyLevel, DifficultyResult,
    WordClassification, WordData,
};

use crate::lemmatizer::EnglishLemmatizer;
use crate::zipf::EnglishZipf;

/// Long-lived service object wiring the English capability stack into one
/// classifier and one scorer. Construct once at process start and share;
/// caches grow with distinct vocabulary seen and are never evicted.
pub struct EnglishPipeline {
    classifier: CefrClassifier,
    scorer: DifficultyScorer,
    zipf: Arc<EnglishZipf>,
    embedding_config: EmbeddingConfig,
}

impl EnglishPipeline {
    pub fn from_config(config: &Config) -> Self {
        let zipf = Arc::new(EnglishZipf::with_defaults());
        let lemmatizer = Arc::new(EnglishLemmatizer::with_vocabulary(zipf.words()));

        let mut store = WordlistStore::new();
        for filename in &config.wordlists.filenames {
            let Some(source) = source_for_filename(filename) else {
                tracing::warn!("No known source tag for wordlist '{}', skipping", filename);
                continue;
            };

            let content = match resolve_wordlist(config.wordlists.data_dir.as_deref(), filename) {
                Some(content) => content,
                None => continue,
            };

            if let Err(e) = store.load_str(&content, source, lemmatizer.as_ref()) {
                tracing::warn!("Failed to parse wordlist '{}': {}", filename, e);
            }
        }

        for path in &config.wordlists.additional_paths {
            let filename = Path::new(path)
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default();
            let Some(source) = source_for_filename(&filename) else {
                tracing::warn!("No known source tag for wordlist '{}', skipping", path);
                continue;
            };
            match std::fs::read_to_string(path) {
                Ok(content) => {
                    if let Err(e) = store.load_str(&content, source, lemmatizer.as_ref()) {
                        tracing::warn!("Failed to parse wordlist '{}': {}", path, e);
                    }
                }
                Err(e) => tracing::warn!("Failed to read wordlist '{}': {}", path, e),
            }
        }

        tracing::info!(
            "Wordlists ready: {} lemmas, {} phrases",
            store.lemma_count(),
            store.phrase_count()
        );

        let mut classifier = CefrClassifier::new(store, lemmatizer, zipf.clone());

        if !config.classifier.threshold_overrides.is_empty() {
            let mut bounds = HashMap::new();
            for (key, range) in &config.classifier.threshold_overrides {
                match CefrLevel::parse(key) {
                    Some(level) => {
                        bounds.insert(level, *range);
                    }
                    None => tracing::warn!("Ignoring threshold override for '{}'", key),
                }
            }
            classifier.update_thresholds(&bounds);
        }

        if config.classifier.embedding.enabled {
            tracing::warn!(
                "Embedding stage enabled in config but no backend attached; call with_embedding_backend to activate it"
            );
        }

        Self {
            classifier,
            scorer: DifficultyScorer::new(&config.scorer),
            zipf,
            embedding_config: config.classifier.embedding.clone(),
        }
    }

    /// Attach a word-vector backend and activate the embedding fallback
    /// stage over the loaded wordlists.
    pub fn with_embedding_backend(self, backend: Arc<dyn EmbeddingLookup>) -> Self {
        let Self {
            classifier,
            scorer,
            zipf,
            embedding_config,
        } = self;

        let embedding = EmbeddingClassifier::new(
            backend,
            classifier.wordlists(),
            embedding_config.top_k,
            embedding_config.similarity_floor,
        );

        Self {
            classifier: classifier.with_embedding(embedding),
            scorer,
            zipf,
            embedding_config,
        }
    }

    /// One classification per distinct lemma, first-appearance order
    pub fn classify_text(&mut self, text: &str) -> Vec<WordClassification> {
        self.classifier.classify_text(text)
    }

    pub fn classify_word(&mut self, word: &str) -> WordClassification {
        self.classifier.classify_word(word)
    }

    /// Classify then score in one pass. Unlike `classify_text`, scoring
    /// sees one entry per token occurrence (repetition matters for the
    /// percentage signals) and the raw text feeds the readability signal.
    pub fn score_text(&mut self, text: &str, genres: Option<&[String]>) -> DifficultyResult {
        let normalized = preprocess::normalize(text);

        let mut words = Vec::new();
        for token in normalized
            .split_whitespace()
            .filter(|t| preprocess::is_valid_token(t))
        {
            let classification = self.classifier.classify_word(token);
            let mut data = WordData::from(&classification);
            data.zipf_score = self.zipf.zipf(&classification.lemma);
            words.push(data);
        }

        self.scorer
            .compute_difficulty_advanced(&words, genres, Some(text))
    }

    /// Score externally-assembled per-word data
    pub fn score_words(
        &self,
        words: &[WordData],
        genres: Option<&[String]>,
        text: Option<&str>,
    ) -> DifficultyResult {
        self.scorer.compute_difficulty_advanced(words, genres, text)
    }

    /// Legacy scoring mode for a bare count-per-level distribution
    pub fn score_distribution(
        &self,
        level_counts: &HashMap<CefrLevel, usize>,
    ) -> (DifficultyLevel, u32, HashMap<CefrLevel, usize>) {
        self.scorer.compute_difficulty(level_counts)
    }

    pub fn statistics(&self, classifications: &[WordClassification]) -> ClassificationStats {
        get_statistics(classifications)
    }

    pub fn update_thresholds(&mut self, bounds: &HashMap<CefrLevel, (u32, u32)>) {
        self.classifier.update_thresholds(bounds);
    }
}

fn source_for_filename(filename: &str) -> Option<ClassificationSource> {
    let name = filename.to_lowercase();
    if name.contains("oxford_3000") || name.contains("oxford3000") {
        Some(ClassificationSource::Oxford3000)
    } else if name.contains("oxford_5000") || name.contains("oxford5000") {
        Some(ClassificationSource::Oxford5000)
    } else if name.contains("efllex") {
        Some(ClassificationSource::Efllex)
    } else if name.contains("evp") {
        Some(ClassificationSource::Evp)
    } else {
        None
    }
}

/// Read a wordlist from the data directory, falling back to the embedded
/// sample when the file (or the directory itself) is absent. Never fatal.
fn resolve_wordlist(data_dir: Option<&str>, filename: &str) -> Option<String> {
    if let Some(dir) = data_dir {
        let path = Path::new(dir).join(filename);
        match std::fs::read_to_string(&path) {
            Ok(content) => return Some(content),
            Err(e) => {
                tracing::warn!(
                    "Cannot read {}: {}; using embedded sample list",
                    path.display(),
                    e
                );
            }
        }
    }

    embedded_wordlist(filename).map(str::to_string)
}

fn embedded_wordlist(filename: &str) -> Option<&'static str> {
    match filename {
        "oxford_3000.json" => Some(include_str!("../data/oxford_3000.json")),
        "oxford_5000.json" => Some(include_str!("../data/oxford_5000.json")),
        "efllex.json" => Some(include_str!("../data/efllex.json")),
        "evp.json" => Some(include_str!("../data/evp.json")),
        _ => {
            tracing::warn!("No embedded fallback for wordlist '{}'", filename);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pipeline() -> EnglishPipeline {
        EnglishPipeline::from_config(&Config::default())
    }

    #[test]
    fn embedded_wordlists_load_without_a_data_dir() {
        let mut p = pipeline();
        let result = p.classify_word("cat");
        assert_eq!(result.cefr_level, CefrLevel::A1);
        assert_eq!(result.source, ClassificationSource::Oxford3000);
        assert_eq!(result.confidence, 1.0);
    }

    #[test]
    fn inflected_forms_hit_the_dictionary_through_lemmas() {
        let mut p = pipeline();
        assert_eq!(p.classify_word("ran").cefr_level, CefrLevel::A1);
        assert_eq!(p.classify_word("ran").lemma, "run");
        assert_eq!(p.classify_word("jumped").lemma, "jump");
        assert_eq!(p.classify_word("jumped").cefr_level, CefrLevel::A2);
    }

    #[test]
    fn classify_text_yields_one_record_per_distinct_lemma() {
        let mut p = pipeline();
        let results = p.classify_text("the cat ran and the cat jumped");
        let lemmas: Vec<&str> = results.iter().map(|r| r.lemma.as_str()).collect();
        assert_eq!(lemmas, vec!["the", "cat", "run", "and", "jump"]);
    }

    #[test]
    fn phrases_win_over_single_word_lookups() {
        let mut p = pipeline();
        let result = p.classify_word("look after");
        assert_eq!(result.cefr_level, CefrLevel::B1);
        assert!(result.is_multi_word);
        assert_eq!(result.source, ClassificationSource::Evp);
    }

    #[test]
    fn simple_text_scores_in_the_elementary_range() {
        let mut p = pipeline();
        let result = p.score_text("The cat and the dog run to the house. The family is happy.", None);
        assert!(result.score <= 40, "score was {}", result.score);
        assert_eq!(result.level, DifficultyLevel::Elementary);
    }

    #[test]
    fn dense_academic_text_scores_harder_than_simple_text() {
        let mut p = pipeline();
        let simple = p.score_text("The cat and the dog run to the house.", None);
        let dense = p.score_text(
            "Notwithstanding pervasive empirical scrutiny, the ubiquitous paradigm \
             remains intrinsically ambiguous; preliminary discourse must contemplate \
             inherent contradictions and elaborate plausible analogies.",
            None,
        );
        assert!(dense.score > simple.score);
    }

    #[test]
    fn kids_genres_ease_the_final_score() {
        let mut p = pipeline();
        let text = "Preliminary analysis must acknowledge the significant hypothesis \
                    and assess the academic context with considerable emphasis.";
        let plain = p.score_text(text, None);
        let genres = vec!["animation".to_string(), "family".to_string()];
        let eased = p.score_text(text, Some(&genres));
        assert!(eased.score <= plain.score);
    }

    #[test]
    fn statistics_report_dictionary_coverage() {
        let mut p = pipeline();
        let classifications = p.classify_text("the cat zxqvwblorp");
        let stats = p.statistics(&classifications);
        assert_eq!(stats.total_words, 3);
        assert!(stats.wordlist_coverage > 0.5);
        assert_eq!(
            stats.source_distribution[&ClassificationSource::Fallback],
            1
        );
    }
}
