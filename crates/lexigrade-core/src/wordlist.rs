use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use lexigrade_types::{CefrLevel, ClassificationSource};

use crate::error::WordlistError;
use crate::language::Lemmatizer;

/// One wordlist file and the provenance tag its entries get
#[derive(Debug, Clone)]
pub struct WordlistSource {
    pub path: PathBuf,
    pub source: ClassificationSource,
}

// Source files differ in what they call the level field ("cefr_level",
// "cefr" or "level"); aliases cover all three.
#[derive(Debug, Deserialize)]
struct WordlistEntry {
    word: String,
    #[serde(alias = "cefr", alias = "level")]
    cefr_level: String,
}

/// Merged CEFR dictionaries. Single-word entries are keyed by lemma;
/// multi-word phrases are kept separate and matched as exact lowercased
/// spans. Immutable after load.
pub struct WordlistStore {
    lemmas: HashMap<String, (CefrLevel, ClassificationSource)>,
    phrases: HashMap<String, (CefrLevel, ClassificationSource)>,
}

impl WordlistStore {
    pub fn new() -> Self {
        Self {
            lemmas: HashMap::new(),
            phrases: HashMap::new(),
        }
    }

    /// Load and merge an ordered list of source files. The first source to
    /// provide a lemma wins; callers control precedence via load order.
    /// Unreadable files are logged and skipped; classification proceeds
    /// with whatever did load, even zero lists.
    pub fn load(sources: &[WordlistSource], lemmatizer: &dyn Lemmatizer) -> Self {
        let mut store = Self::new();

        for source in sources {
            match store.load_file(&source.path, source.source, lemmatizer) {
                Ok(count) => {
                    tracing::info!(
                        "Loaded {} entries from {} ({})",
                        count,
                        source.path.display(),
                        source.source.as_str()
                    );
                }
                Err(e) => {
                    tracing::warn!(
                        "Skipping wordlist {}: {}",
                        source.path.display(),
                        e
                    );
                }
            }
        }

        store
    }

    fn load_file(
        &mut self,
        path: &Path,
        source: ClassificationSource,
        lemmatizer: &dyn Lemmatizer,
    ) -> Result<usize, WordlistError> {
        if !path.exists() {
            return Err(WordlistError::FileNotFound(path.display().to_string()));
        }
        let json = std::fs::read_to_string(path)?;
        self.load_str(&json, source, lemmatizer)
    }

    /// Merge entries from a JSON string (a list of `{word, level}` objects).
    /// Entries with unrecognized level strings are skipped, never stored.
    pub fn load_str(
        &mut self,
        json: &str,
        source: ClassificationSource,
        lemmatizer: &dyn Lemmatizer,
    ) -> Result<usize, WordlistError> {
        let entries: Vec<WordlistEntry> =
            serde_json::from_str(json).map_err(|e| WordlistError::ParseError(e.to_string()))?;

        let mut stored = 0;
        for entry in entries {
            let Some(level) = CefrLevel::parse(&entry.cefr_level) else {
                tracing::debug!(
                    "Skipping '{}': unrecognized level '{}'",
                    entry.word,
                    entry.cefr_level
                );
                continue;
            };

            let word = entry.word.trim().to_lowercase();
            if word.is_empty() {
                continue;
            }

            if word.contains(' ') {
                // Phrases are matched against raw token spans, not lemmas
                self.phrases.entry(word).or_insert((level, source));
            } else {
                let lemma = lemmatizer.lemma(&word);
                self.lemmas.entry(lemma).or_insert((level, source));
            }
            stored += 1;
        }

        Ok(stored)
    }

    pub fn lemma_level(&self, lemma: &str) -> Option<(CefrLevel, ClassificationSource)> {
        self.lemmas.get(lemma).copied()
    }

    pub fn phrase_level(&self, phrase: &str) -> Option<(CefrLevel, ClassificationSource)> {
        self.phrases.get(phrase).copied()
    }

    pub fn lemma_count(&self) -> usize {
        self.lemmas.len()
    }

    pub fn phrase_count(&self) -> usize {
        self.phrases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lemmas.is_empty() && self.phrases.is_empty()
    }

    /// All single-word entries; the embedding stage builds its vector
    /// cache from this.
    pub fn iter_lemmas(&self) -> impl Iterator<Item = (&str, CefrLevel)> {
        self.lemmas.iter().map(|(w, (level, _))| (w.as_str(), *level))
    }
}

impl Default for WordlistStore {
    fn default() -> Self {
        Self::new()
    }
}
