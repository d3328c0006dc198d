use std::collections::HashMap;

use lexigrade_core::language::ZipfLookup;

/// English word commonality provider on the Zipf scale (log10 of
/// occurrences per billion words; ~7 is ultra-common, below 3 is rare).
pub struct EnglishZipf {
    scores: HashMap<String, f64>,
}

impl EnglishZipf {
    /// Create empty frequency database
    pub fn new() -> Self {
        Self {
            scores: HashMap::new(),
        }
    }

    /// Create with embedded high-frequency words
    pub fn with_defaults() -> Self {
        let mut scores = HashMap::new();

        // Common English words with approximate Zipf scores, derived from
        // a film-subtitle corpus (simplified)
        let common_words = [
            ("the", 7.0),
            ("be", 6.7),
            ("and", 6.9),
            ("of", 6.8),
            ("to", 6.9),
            ("in", 6.8),
            ("have", 6.4),
            ("it", 6.6),
            ("that", 6.5),
            ("for", 6.5),
            ("you", 6.7),
            ("he", 6.4),
            ("with", 6.4),
            ("on", 6.4),
            ("do", 6.3),
            ("say", 6.0),
            ("this", 6.3),
            ("they", 6.2),
            ("at", 6.2),
            ("but", 6.3),
            ("we", 6.3),
            ("his", 6.1),
            ("from", 6.1),
            ("not", 6.4),
            ("by", 6.1),
            ("she", 6.0),
            ("or", 6.1),
            ("as", 6.2),
            ("what", 6.1),
            ("go", 5.9),
            ("their", 5.9),
            ("can", 6.0),
            ("who", 5.9),
            ("get", 5.9),
            ("if", 6.0),
            ("would", 5.9),
            ("her", 6.0),
            ("all", 6.1),
            ("my", 6.2),
            ("make", 5.8),
            ("about", 5.9),
            ("know", 5.9),
            ("will", 6.0),
            ("up", 6.1),
            ("one", 6.0),
            ("time", 5.8),
            ("there", 6.0),
            ("year", 5.5),
            ("so", 6.2),
            ("think", 5.8),
            ("when", 6.0),
            ("which", 5.8),
            ("them", 5.9),
            ("some", 5.8),
            ("me", 6.2),
            ("person", 5.3),
            ("take", 5.7),
            ("out", 6.0),
            ("into", 5.7),
            ("just", 6.0),
            ("see", 5.9),
            ("him", 5.9),
            ("your", 6.1),
            ("come", 5.8),
            ("could", 5.8),
            ("now", 5.9),
            ("than", 5.7),
            ("like", 5.9),
            ("other", 5.7),
            ("how", 5.9),
            ("then", 5.7),
            ("its", 5.5),
            ("our", 5.7),
            ("two", 5.6),
            ("more", 5.8),
            ("these", 5.5),
            ("want", 5.7),
            ("way", 5.6),
            ("look", 5.7),
            ("first", 5.6),
            ("also", 5.6),
            ("new", 5.6),
            ("because", 5.6),
            ("day", 5.7),
            ("use", 5.4),
            ("no", 6.0),
            ("man", 5.6),
            ("find", 5.4),
            ("here", 5.7),
            ("thing", 5.5),
            ("give", 5.5),
            ("many", 5.5),
            ("well", 5.7),
            ("good", 5.8),
            ("house", 5.0),
            ("water", 5.1),
            ("school", 5.1),
            ("family", 5.1),
            ("friend", 5.2),
            ("book", 5.2),
            ("run", 5.2),
            ("eat", 5.1),
            ("dog", 4.9),
            ("cat", 4.6),
            ("happy", 5.0),
            ("play", 5.3),
            ("read", 5.2),
            ("write", 5.0),
            ("jump", 4.2),
            ("create", 4.7),
            ("provide", 4.7),
            ("consider", 4.4),
            ("develop", 4.5),
            ("environment", 4.5),
            ("significant", 4.3),
            ("particular", 4.3),
            ("achieve", 4.2),
            ("benefit", 4.3),
            ("analysis", 4.0),
            ("paradigm", 3.6),
            ("quintessential", 3.0),
            ("ubiquitous", 2.9),
            ("esoteric", 2.9),
            ("ephemeral", 2.7),
            ("serendipity", 2.5),
            ("ameliorate", 2.3),
            ("alacrity", 2.0),
        ];

        for (word, score) in common_words {
            scores.insert(word.to_string(), score);
        }

        Self { scores }
    }

    /// Load Zipf scores from TSV data (word\tscore format); malformed
    /// lines are skipped
    pub fn from_tsv(content: &str) -> Self {
        let mut scores = HashMap::new();

        for line in content.lines() {
            let parts: Vec<&str> = line.split('\t').collect();
            if parts.len() >= 2 {
                if let Ok(score) = parts[1].trim().parse::<f64>() {
                    scores.insert(parts[0].trim().to_lowercase(), score);
                }
            }
        }

        Self { scores }
    }

    /// Load Zipf scores from a TSV file
    pub fn load_from_file(path: &str) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::from_tsv(&content))
    }

    /// Merge another table into this one; existing entries win
    pub fn merge(mut self, other: EnglishZipf) -> Self {
        for (word, score) in other.scores {
            self.scores.entry(word).or_insert(score);
        }
        self
    }

    pub fn word_count(&self) -> usize {
        self.scores.len()
    }

    /// All known words; feeds the lemmatizer's stem disambiguation
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.scores.keys().map(String::as_str)
    }
}

impl ZipfLookup for EnglishZipf {
    fn zipf(&self, word: &str) -> Option<f64> {
        self.scores.get(word).copied()
    }
}

impl Default for EnglishZipf {
    fn default() -> Self {
        Self::new()
    }
}
