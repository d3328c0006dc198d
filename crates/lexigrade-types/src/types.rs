use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// CEFR proficiency band, A1 (beginner) through C2 (proficient).
///
/// `Unknown` only exists as a parse intermediate for wordlist entries with
/// unrecognized level strings; classification output never carries it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CefrLevel {
    A1,
    A2,
    B1,
    B2,
    C1,
    C2,
    Unknown,
}

impl CefrLevel {
    /// Parse level from string ("A1".."C2", case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "A1" => Some(CefrLevel::A1),
            "A2" => Some(CefrLevel::A2),
            "B1" => Some(CefrLevel::B1),
            "B2" => Some(CefrLevel::B2),
            "C1" => Some(CefrLevel::C1),
            "C2" => Some(CefrLevel::C2),
            _ => None,
        }
    }

    /// Ordinal position on the 1-6 scale. Ordering logic goes through this,
    /// never through string comparison.
    pub fn ordinal(&self) -> u8 {
        match self {
            CefrLevel::A1 => 1,
            CefrLevel::A2 => 2,
            CefrLevel::B1 => 3,
            CefrLevel::B2 => 4,
            CefrLevel::C1 => 5,
            CefrLevel::C2 => 6,
            CefrLevel::Unknown => 0,
        }
    }

    pub fn from_ordinal(ordinal: u8) -> Option<Self> {
        match ordinal {
            1 => Some(CefrLevel::A1),
            2 => Some(CefrLevel::A2),
            3 => Some(CefrLevel::B1),
            4 => Some(CefrLevel::B2),
            5 => Some(CefrLevel::C1),
            6 => Some(CefrLevel::C2),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CefrLevel::A1 => "A1",
            CefrLevel::A2 => "A2",
            CefrLevel::B1 => "B1",
            CefrLevel::B2 => "B2",
            CefrLevel::C1 => "C1",
            CefrLevel::C2 => "C2",
            CefrLevel::Unknown => "UNKNOWN",
        }
    }

    /// All six real bands, easiest first
    pub fn all() -> [CefrLevel; 6] {
        [
            CefrLevel::A1,
            CefrLevel::A2,
            CefrLevel::B1,
            CefrLevel::B2,
            CefrLevel::C1,
            CefrLevel::C2,
        ]
    }
}

/// Provenance of a classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClassificationSource {
    #[serde(rename = "OXFORD_3000")]
    Oxford3000,
    #[serde(rename = "OXFORD_5000")]
    Oxford5000,
    Efllex,
    Evp,
    FrequencyBackoff,
    EmbeddingClassifier,
    Fallback,
}

impl ClassificationSource {
    /// True for the four curated dictionary sources (used for coverage stats)
    pub fn is_dictionary(&self) -> bool {
        matches!(
            self,
            ClassificationSource::Oxford3000
                | ClassificationSource::Oxford5000
                | ClassificationSource::Efllex
                | ClassificationSource::Evp
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ClassificationSource::Oxford3000 => "OXFORD_3000",
            ClassificationSource::Oxford5000 => "OXFORD_5000",
            ClassificationSource::Efllex => "EFLLEX",
            ClassificationSource::Evp => "EVP",
            ClassificationSource::FrequencyBackoff => "FREQUENCY_BACKOFF",
            ClassificationSource::EmbeddingClassifier => "EMBEDDING_CLASSIFIER",
            ClassificationSource::Fallback => "FALLBACK",
        }
    }
}

/// Result of classifying one token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordClassification {
    /// Original surface token, case as given
    pub word: String,
    /// Dictionary form
    pub lemma: String,
    pub cefr_level: CefrLevel,
    /// 0.0-1.0, reflects source reliability
    pub confidence: f32,
    pub source: ClassificationSource,
    /// Approximate corpus rank, lower = more common
    pub frequency_rank: Option<u32>,
    /// True if matched as a multi-word expression ("look after")
    pub is_multi_word: bool,
}

/// Per-word input to the difficulty scorer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordData {
    pub word: String,
    pub cefr_level: CefrLevel,
    pub confidence: f32,
    pub frequency_rank: Option<u32>,
    pub zipf_score: Option<f64>,
}

impl From<&WordClassification> for WordData {
    fn from(c: &WordClassification) -> Self {
        Self {
            word: c.word.clone(),
            cefr_level: c.cefr_level,
            confidence: c.confidence,
            frequency_rank: c.frequency_rank,
            zipf_score: None,
        }
    }
}

/// Public difficulty bucket. Elementary covers A1/A2 and Intermediate
/// covers B1/B2; the finer six-way split stays internal to the scorer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DifficultyLevel {
    Elementary,
    Intermediate,
    Advanced,
    Proficient,
}

impl DifficultyLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            DifficultyLevel::Elementary => "Elementary",
            DifficultyLevel::Intermediate => "Intermediate",
            DifficultyLevel::Advanced => "Advanced",
            DifficultyLevel::Proficient => "Proficient",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            DifficultyLevel::Elementary => "Elementary (A1-A2)",
            DifficultyLevel::Intermediate => "Intermediate (B1-B2)",
            DifficultyLevel::Advanced => "Advanced (C1)",
            DifficultyLevel::Proficient => "Proficient (C2)",
        }
    }
}

/// Output of the difficulty scorer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DifficultyResult {
    pub level: DifficultyLevel,
    /// 0-100, higher = harder
    pub score: u32,
    /// Per-level fraction of total words; only non-zero levels present
    pub breakdown: HashMap<CefrLevel, f64>,
}

/// Aggregate view over a classification run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassificationStats {
    pub total_words: usize,
    /// Counts per level (counts, not fractions; sums to total_words)
    pub level_distribution: HashMap<CefrLevel, usize>,
    pub source_distribution: HashMap<ClassificationSource, usize>,
    pub average_confidence: f32,
    /// Fraction of classifications backed by a curated dictionary source
    pub wordlist_coverage: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordinal_round_trip() {
        for level in CefrLevel::all() {
            assert_eq!(CefrLevel::from_ordinal(level.ordinal()), Some(level));
        }
        assert_eq!(CefrLevel::from_ordinal(0), None);
        assert_eq!(CefrLevel::from_ordinal(7), None);
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(CefrLevel::parse("b2"), Some(CefrLevel::B2));
        assert_eq!(CefrLevel::parse(" C1 "), Some(CefrLevel::C1));
        assert_eq!(CefrLevel::parse("native"), None);
    }

    #[test]
    fn level_ordering_follows_ordinals() {
        let mut levels = CefrLevel::all();
        levels.sort_by_key(|l| l.ordinal());
        assert_eq!(levels[0], CefrLevel::A1);
        assert_eq!(levels[5], CefrLevel::C2);
        assert!(CefrLevel::A2.ordinal() < CefrLevel::C1.ordinal());
    }

    #[test]
    fn dictionary_sources_counted_for_coverage() {
        assert!(ClassificationSource::Oxford3000.is_dictionary());
        assert!(ClassificationSource::Evp.is_dictionary());
        assert!(!ClassificationSource::FrequencyBackoff.is_dictionary());
        assert!(!ClassificationSource::Fallback.is_dictionary());
    }
}
