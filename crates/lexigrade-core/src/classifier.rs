use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use lexigrade_types::{
    CefrLevel, ClassificationSource, ClassificationStats, WordClassification,
};

use crate::embedding::EmbeddingClassifier;
use crate::frequency::{FrequencyOracle, FrequencyThresholds};
use crate::language::{Lemmatizer, ZipfLookup};
use crate::preprocess;
use crate::wordlist::WordlistStore;

// Frequency-backoff confidence by rank magnitude
const FREQ_CONFIDENCE_HIGH: f32 = 0.7;
const FREQ_CONFIDENCE_MID: f32 = 0.5;
const FREQ_CONFIDENCE_LOW: f32 = 0.3;
const FREQ_RANK_HIGH: u32 = 3_000;
const FREQ_RANK_MID: u32 = 10_000;

/// Frequency guesses below this are held in reserve rather than returned
/// immediately, giving the embedding stage a chance to do better
const FREQ_ACCEPT_THRESHOLD: f32 = 0.5;

const FALLBACK_CONFIDENCE: f32 = 0.2;

/// Hybrid CEFR classifier: staged fallback per lemma, with an in-process
/// cache that grows with distinct vocabulary seen (unbounded by design;
/// callers keep one long-lived instance).
///
/// Stage order per word, terminating at first success:
/// multi-word phrase match, dictionary match, frequency backoff (accepted
/// only at confidence >= 0.5), embedding similarity (when enabled), the
/// held low-confidence frequency result, and finally the C2 fallback
/// (unknown words are assumed advanced).
pub struct CefrClassifier {
    wordlists: WordlistStore,
    thresholds: FrequencyThresholds,
    oracle: FrequencyOracle,
    lemmatizer: Arc<dyn Lemmatizer>,
    embedding: Option<EmbeddingClassifier>,
    cache: HashMap<String, WordClassification>,
}

impl CefrClassifier {
    pub fn new(
        wordlists: WordlistStore,
        lemmatizer: Arc<dyn Lemmatizer>,
        zipf: Arc<dyn ZipfLookup>,
    ) -> Self {
        if wordlists.is_empty() {
            tracing::warn!(
                "No wordlist entries loaded; classification will rely on frequency backoff and fallback only"
            );
        }

        Self {
            wordlists,
            thresholds: FrequencyThresholds::default(),
            oracle: FrequencyOracle::new(zipf),
            lemmatizer,
            embedding: None,
            cache: HashMap::new(),
        }
    }

    /// Enable the embedding similarity stage
    pub fn with_embedding(mut self, embedding: EmbeddingClassifier) -> Self {
        self.embedding = Some(embedding);
        self
    }

    /// Merge new band bounds into the frequency threshold table. Cached
    /// classifications predate the new bounds, so the cache is cleared.
    pub fn update_thresholds(&mut self, bounds: &HashMap<CefrLevel, (u32, u32)>) {
        self.thresholds.update(bounds);
        self.cache.clear();
    }

    pub fn wordlists(&self) -> &WordlistStore {
        &self.wordlists
    }

    /// Classify a single surface token (or an exact multi-word phrase).
    /// Never fails: every stage has a fallback.
    pub fn classify_word(&mut self, surface: &str) -> WordClassification {
        let raw = surface.to_lowercase();

        // Stage 1: exact multi-word phrase match on the raw span
        if raw.contains(' ') {
            if let Some((level, source)) = self.wordlists.phrase_level(&raw) {
                return WordClassification {
                    word: surface.to_string(),
                    lemma: raw,
                    cefr_level: level,
                    confidence: 1.0,
                    source,
                    frequency_rank: None,
                    is_multi_word: true,
                };
            }
        }

        let lemma = self.lemmatizer.lemma(&raw);
        self.classify_lemma(surface, &lemma)
    }

    /// Classify a full text. Output carries one record per distinct lemma
    /// surviving the validity filter, in order of first appearance, not
    /// one per token. Classification cost scales with vocabulary size.
    pub fn classify_text(&mut self, text: &str) -> Vec<WordClassification> {
        let normalized = preprocess::normalize(text);

        // Unique surface words, first-appearance order
        let mut surfaces: Vec<String> = Vec::new();
        let mut seen_surfaces: HashSet<&str> = HashSet::new();
        for token in normalized.split_whitespace() {
            if preprocess::is_valid_token(token) && seen_surfaces.insert(token) {
                surfaces.push(token.to_string());
            }
        }

        if surfaces.is_empty() {
            return Vec::new();
        }

        // One lemmatizer call per unique surface word
        let lemmas = self.lemmatizer.lemma_batch(&surfaces);

        // Classify each unique lemma exactly once
        let mut results = Vec::new();
        let mut seen_lemmas: HashSet<String> = HashSet::new();
        for (surface, lemma) in surfaces.iter().zip(&lemmas) {
            if seen_lemmas.insert(lemma.clone()) {
                results.push(self.classify_lemma(surface, lemma));
            }
        }

        results
    }

    fn classify_lemma(&mut self, surface: &str, lemma: &str) -> WordClassification {
        if let Some(hit) = self.cache.get(lemma) {
            return hit.clone();
        }

        let result = self.run_stages(surface, lemma);
        self.cache.insert(lemma.to_string(), result.clone());
        result
    }

    fn run_stages(&mut self, surface: &str, lemma: &str) -> WordClassification {
        let rank = self.oracle.rank(lemma);

        // Stage 2: dictionary match
        if let Some((level, source)) = self.wordlists.lemma_level(lemma) {
            return WordClassification {
                word: surface.to_string(),
                lemma: lemma.to_string(),
                cefr_level: level,
                confidence: 1.0,
                source,
                frequency_rank: rank,
                is_multi_word: false,
            };
        }

        // Stage 3: frequency backoff; short-circuit only on confident ranks
        let frequency_guess = rank.map(|r| {
            let confidence = if r < FREQ_RANK_HIGH {
                FREQ_CONFIDENCE_HIGH
            } else if r < FREQ_RANK_MID {
                FREQ_CONFIDENCE_MID
            } else {
                FREQ_CONFIDENCE_LOW
            };
            WordClassification {
                word: surface.to_string(),
                lemma: lemma.to_string(),
                cefr_level: self.thresholds.level_for_rank(r),
                confidence,
                source: ClassificationSource::FrequencyBackoff,
                frequency_rank: Some(r),
                is_multi_word: false,
            }
        });

        if let Some(guess) = &frequency_guess {
            if guess.confidence >= FREQ_ACCEPT_THRESHOLD {
                return guess.clone();
            }
        }

        // Stage 4: embedding similarity, when enabled
        if let Some(embedding) = &self.embedding {
            if let Some((level, confidence)) = embedding.classify(lemma) {
                return WordClassification {
                    word: surface.to_string(),
                    lemma: lemma.to_string(),
                    cefr_level: level,
                    confidence,
                    source: ClassificationSource::EmbeddingClassifier,
                    frequency_rank: rank,
                    is_multi_word: false,
                };
            }
        }

        // Stage 5: a low-confidence frequency guess beats no guess
        if let Some(guess) = frequency_guess {
            return guess;
        }

        // Stage 6: unknown words are assumed advanced
        WordClassification {
            word: surface.to_string(),
            lemma: lemma.to_string(),
            cefr_level: CefrLevel::C2,
            confidence: FALLBACK_CONFIDENCE,
            source: ClassificationSource::Fallback,
            frequency_rank: None,
            is_multi_word: false,
        }
    }
}

/// Aggregate statistics over a classification run. Distribution values are
/// counts, not fractions; they sum to the input length.
pub fn get_statistics(classifications: &[WordClassification]) -> ClassificationStats {
    let total_words = classifications.len();

    let mut level_distribution: HashMap<CefrLevel, usize> = HashMap::new();
    let mut source_distribution: HashMap<ClassificationSource, usize> = HashMap::new();
    let mut confidence_sum = 0.0f32;
    let mut dictionary_hits = 0usize;

    for c in classifications {
        *level_distribution.entry(c.cefr_level).or_insert(0) += 1;
        *source_distribution.entry(c.source).or_insert(0) += 1;
        confidence_sum += c.confidence;
        if c.source.is_dictionary() {
            dictionary_hits += 1;
        }
    }

    let average_confidence = if total_words > 0 {
        confidence_sum / total_words as f32
    } else {
        0.0
    };
    let wordlist_coverage = if total_words > 0 {
        dictionary_hits as f32 / total_words as f32
    } else {
        0.0
    };

    ClassificationStats {
        total_words,
        level_distribution,
        source_distribution,
        average_confidence,
        wordlist_coverage,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::IdentityLemmatizer;

    struct NoZipf;

    impl ZipfLookup for NoZipf {
        fn zipf(&self, _word: &str) -> Option<f64> {
            None
        }
    }

    struct MapZipf(HashMap<String, f64>);

    impl MapZipf {
        fn new(entries: &[(&str, f64)]) -> Self {
            Self(entries.iter().map(|(w, z)| (w.to_string(), *z)).collect())
        }
    }

    impl ZipfLookup for MapZipf {
        fn zipf(&self, word: &str) -> Option<f64> {
            self.0.get(word).copied()
        }
    }

    struct MapLemmatizer(HashMap<String, String>);

    impl MapLemmatizer {
        fn new(entries: &[(&str, &str)]) -> Self {
            Self(
                entries
                    .iter()
                    .map(|(w, l)| (w.to_string(), l.to_string()))
                    .collect(),
            )
        }
    }

    impl Lemmatizer for MapLemmatizer {
        fn lemma(&self, word: &str) -> String {
            self.0
                .get(word)
                .cloned()
                .unwrap_or_else(|| word.to_lowercase())
        }
    }

    fn store_with(json: &str) -> WordlistStore {
        let mut store = WordlistStore::new();
        store
            .load_str(json, ClassificationSource::Oxford3000, &IdentityLemmatizer)
            .unwrap();
        store
    }

    #[test]
    fn dictionary_always_beats_frequency_backoff() {
        let store = store_with(r#"[{"word": "cat", "cefr_level": "A2"}]"#);
        // Ultra-common Zipf score would put "cat" in the A1 band
        let mut classifier = CefrClassifier::new(
            store,
            Arc::new(IdentityLemmatizer),
            Arc::new(MapZipf::new(&[("cat", 6.5)])),
        );

        let result = classifier.classify_word("cat");
        assert_eq!(result.cefr_level, CefrLevel::A2);
        assert_eq!(result.confidence, 1.0);
        assert_eq!(result.source, ClassificationSource::Oxford3000);
        assert!(result.frequency_rank.is_some());
    }

    #[test]
    fn nonsense_words_fall_back_to_c2() {
        let mut classifier = CefrClassifier::new(
            WordlistStore::new(),
            Arc::new(IdentityLemmatizer),
            Arc::new(NoZipf),
        );

        let result = classifier.classify_word("zxqvwblorp");
        assert_eq!(result.cefr_level, CefrLevel::C2);
        assert_eq!(result.confidence, 0.2);
        assert_eq!(result.source, ClassificationSource::Fallback);
        assert_eq!(result.frequency_rank, None);
    }

    #[test]
    fn confident_frequency_rank_short_circuits() {
        // Zipf 4.6 -> rank ~251 -> A1 band, confidence 0.7
        let mut classifier = CefrClassifier::new(
            WordlistStore::new(),
            Arc::new(IdentityLemmatizer),
            Arc::new(MapZipf::new(&[("cat", 4.6)])),
        );

        let result = classifier.classify_word("cat");
        assert_eq!(result.source, ClassificationSource::FrequencyBackoff);
        assert_eq!(result.cefr_level, CefrLevel::A1);
        assert_eq!(result.confidence, 0.7);
    }

    #[test]
    fn low_confidence_frequency_guess_is_held_then_returned() {
        // Zipf 3.0 -> rank 10000 -> C1 band, confidence 0.3: not accepted
        // at stage 3, but better than the blind fallback
        let mut classifier = CefrClassifier::new(
            WordlistStore::new(),
            Arc::new(IdentityLemmatizer),
            Arc::new(MapZipf::new(&[("sesquipedalian", 3.0)])),
        );

        let result = classifier.classify_word("sesquipedalian");
        assert_eq!(result.source, ClassificationSource::FrequencyBackoff);
        assert_eq!(result.cefr_level, CefrLevel::C1);
        assert_eq!(result.confidence, 0.3);
    }

    #[test]
    fn multi_word_phrases_match_exactly() {
        let store = store_with(r#"[{"word": "look after", "cefr_level": "B1"}]"#);
        let mut classifier =
            CefrClassifier::new(store, Arc::new(IdentityLemmatizer), Arc::new(NoZipf));

        let result = classifier.classify_word("Look after");
        assert_eq!(result.cefr_level, CefrLevel::B1);
        assert_eq!(result.confidence, 1.0);
        assert!(result.is_multi_word);
    }

    #[test]
    fn classify_text_dedupes_by_lemma() {
        let lemmatizer = MapLemmatizer::new(&[("ran", "run"), ("jumped", "jump")]);
        let mut classifier =
            CefrClassifier::new(WordlistStore::new(), Arc::new(lemmatizer), Arc::new(NoZipf));

        let results = classifier.classify_text("the cat ran and the cat jumped");
        let lemmas: Vec<&str> = results.iter().map(|r| r.lemma.as_str()).collect();
        assert_eq!(lemmas, vec!["the", "cat", "run", "and", "jump"]);
    }

    #[test]
    fn classify_text_is_deterministic() {
        let store = store_with(r#"[{"word": "cat", "cefr_level": "A1"}]"#);
        let mut classifier = CefrClassifier::new(
            store,
            Arc::new(IdentityLemmatizer),
            Arc::new(MapZipf::new(&[("the", 7.0), ("sat", 4.5)])),
        );

        let text = "The cat sat, the cat slept.";
        let first = classifier.classify_text(text);
        let second = classifier.classify_text(text);
        assert_eq!(first, second);
    }

    #[test]
    fn every_filtered_token_gets_a_concrete_level() {
        let mut classifier = CefrClassifier::new(
            WordlistStore::new(),
            Arc::new(IdentityLemmatizer),
            Arc::new(NoZipf),
        );

        let results = classifier.classify_text("gibberish flooble 42 ! words");
        assert!(!results.is_empty());
        for r in &results {
            assert_ne!(r.cefr_level, CefrLevel::Unknown);
        }
        // "42" and "!" never reach classification
        assert!(results.iter().all(|r| r.word != "42" && r.word != "!"));
    }

    #[test]
    fn empty_text_classifies_to_empty_list() {
        let mut classifier = CefrClassifier::new(
            WordlistStore::new(),
            Arc::new(IdentityLemmatizer),
            Arc::new(NoZipf),
        );
        assert!(classifier.classify_text("").is_empty());
        assert!(classifier.classify_text("  \n\t ").is_empty());
    }

    #[test]
    fn shared_lemmas_reuse_the_cached_classification() {
        let lemmatizer = MapLemmatizer::new(&[("running", "run"), ("ran", "run")]);
        let store = store_with(r#"[{"word": "run", "cefr_level": "A1"}]"#);
        let mut classifier = CefrClassifier::new(store, Arc::new(lemmatizer), Arc::new(NoZipf));

        let first = classifier.classify_word("running");
        let second = classifier.classify_word("ran");
        assert_eq!(first, second);
        assert_eq!(second.word, "running"); // cached record from first sight
    }

    #[test]
    fn statistics_counts_sum_to_total() {
        let store = store_with(r#"[{"word": "cat", "cefr_level": "A1"}, {"word": "dog", "cefr_level": "A1"}]"#);
        let mut classifier =
            CefrClassifier::new(store, Arc::new(IdentityLemmatizer), Arc::new(NoZipf));

        let results = classifier.classify_text("cat dog flooble");
        let stats = get_statistics(&results);

        assert_eq!(stats.total_words, results.len());
        let level_sum: usize = stats.level_distribution.values().sum();
        assert_eq!(level_sum, results.len());
        let source_sum: usize = stats.source_distribution.values().sum();
        assert_eq!(source_sum, results.len());

        // Two of three words came from a curated list
        assert!((stats.wordlist_coverage - 2.0 / 3.0).abs() < 1e-6);
        let expected_avg = (1.0 + 1.0 + 0.2) / 3.0;
        assert!((stats.average_confidence - expected_avg).abs() < 1e-6);
    }

    #[test]
    fn threshold_update_shifts_backoff_bands() {
        // Zipf 4.6 -> rank ~251: A1 under defaults
        let mut classifier = CefrClassifier::new(
            WordlistStore::new(),
            Arc::new(IdentityLemmatizer),
            Arc::new(MapZipf::new(&[("cat", 4.6)])),
        );
        assert_eq!(classifier.classify_word("cat").cefr_level, CefrLevel::A1);

        let mut bounds = HashMap::new();
        bounds.insert(CefrLevel::A1, (0, 100));
        bounds.insert(CefrLevel::A2, (100, 2_000));
        classifier.update_thresholds(&bounds);

        assert_eq!(classifier.classify_word("cat").cefr_level, CefrLevel::A2);
    }
}
