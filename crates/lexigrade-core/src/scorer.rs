use std::collections::{HashMap, HashSet};

use lexigrade_config::scorer::ScorerConfig;
use lexigrade_types::{CefrLevel, DifficultyLevel, DifficultyResult, WordData};

// Composite signal weights; sum to exactly 1.00
const W_COMPLEXITY: f64 = 0.30;
const W_GAP: f64 = 0.18;
const W_MEDIAN: f64 = 0.12;
const W_ZIPF: f64 = 0.10;
const W_DIVERSITY: f64 = 0.08;
const W_READABILITY: f64 = 0.07;
const W_SPREAD: f64 = 0.06;
const W_SYLLABLES: f64 = 0.04;
const W_PHRASAL: f64 = 0.03;
const W_REPETITION: f64 = 0.02;

// Per-level weights for the complexity signal, indexed A1..C2
const COMPLEXITY_WEIGHTS: [f64; 6] = [0.0, 1.0, 1.2, 1.5, 2.0, 2.5];
// Adjusted weights for the CEFR gap signal
const GAP_WEIGHTS: [f64; 6] = [0.0, 1.0, 1.4, 1.2, 3.0, 4.0];

// Vocabulary safety clamp: without a real C1/C2 presence, stylistic
// signals alone cannot push a text past this
const SAFETY_CLAMP_CEILING: f64 = 0.55;
const ADVANCED_PRESENCE_MIN: f64 = 0.01;

// Coarse vocabulary bands and their score clamps
const BAND_C_ADVANCED_FRACTION: f64 = 0.07;
const BAND_B_B2_FRACTION: f64 = 0.08;
const BAND_B_RANGE: (f64, f64) = (0.35, 0.70);
const BAND_A_RANGE: (f64, f64) = (0.0, 0.40);

const DEFAULT_MEAN_ZIPF: f64 = 4.0;
const DEFAULT_READABILITY_SIGNAL: f64 = 0.5;

/// Difficulty scorer: folds a bag of per-word classifications into one
/// difficulty label, a 0-100 score and a per-level breakdown. Ten weighted
/// signals feed the composite, but the vocabulary-band clamps have the
/// last word: signal arithmetic can never override what the actual CEFR
/// composition implies.
pub struct DifficultyScorer {
    genre_weights: HashMap<String, f64>,
    kids_genres: HashSet<String>,
    particles: HashSet<String>,
}

impl DifficultyScorer {
    pub fn new(config: &ScorerConfig) -> Self {
        Self {
            genre_weights: config
                .genre_weights
                .iter()
                .map(|(g, w)| (g.to_lowercase(), *w))
                .collect(),
            kids_genres: config.kids_genres.iter().map(|g| g.to_lowercase()).collect(),
            particles: config
                .phrasal_particles
                .iter()
                .map(|p| p.to_lowercase())
                .collect(),
        }
    }

    /// Primary scoring path. `words` is per-occurrence (not deduplicated;
    /// frequency of occurrence feeds the percentage signals), `text` feeds
    /// the readability signal when available.
    pub fn compute_difficulty_advanced(
        &self,
        words: &[WordData],
        genres: Option<&[String]>,
        text: Option<&str>,
    ) -> DifficultyResult {
        if words.is_empty() {
            return DifficultyResult {
                level: DifficultyLevel::Elementary,
                score: 0,
                breakdown: HashMap::new(),
            };
        }

        let total = words.len() as f64;
        let mut counts = [0usize; 6];
        for w in words {
            let ordinal = w.cefr_level.ordinal();
            if ordinal > 0 {
                counts[(ordinal - 1) as usize] += 1;
            }
        }

        // Renormalize so the six fractions sum to exactly 1.0
        let mut fractions = [0.0f64; 6];
        for (i, count) in counts.iter().enumerate() {
            fractions[i] = *count as f64 / total;
        }
        let fraction_sum: f64 = fractions.iter().sum();
        if fraction_sum > 0.0 {
            for f in fractions.iter_mut() {
                *f /= fraction_sum;
            }
        }

        let advanced_fraction = fractions[4] + fractions[5];

        // Unique words (lowercase surface) drive the diversity signals
        let mut seen: HashSet<String> = HashSet::new();
        let mut unique_ordinals: Vec<u8> = Vec::new();
        for w in words {
            if seen.insert(w.word.to_lowercase()) {
                let ordinal = w.cefr_level.ordinal();
                if ordinal > 0 {
                    unique_ordinals.push(ordinal);
                }
            }
        }
        let unique = seen.len();

        let complexity = weighted_fraction_sum(&fractions, &COMPLEXITY_WEIGHTS);

        let mut gap = (weighted_fraction_sum(&fractions, &GAP_WEIGHTS) / 4.0).clamp(0.0, 1.0);
        if advanced_fraction < 0.02 {
            gap *= 0.25; // advanced-rarity dampening
        }

        let median = median_level_signal(&mut unique_ordinals);
        let diversity = herdan_c(unique, words.len());
        let syllables = syllable_signal(words);
        let phrasal = self.phrasal_density(words);
        let repetition = unique as f64 / total;
        let spread = spread_signal(&fractions, advanced_fraction);
        let zipf_rarity = zipf_rarity_signal(words);
        let readability = text
            .map(readability_signal)
            .unwrap_or(DEFAULT_READABILITY_SIGNAL);

        let mut raw = W_COMPLEXITY * complexity
            + W_GAP * gap
            + W_MEDIAN * median
            + W_ZIPF * zipf_rarity
            + W_DIVERSITY * diversity
            + W_READABILITY * readability
            + W_SPREAD * spread
            + W_SYLLABLES * syllables
            + W_PHRASAL * phrasal
            + W_REPETITION * repetition;

        // Vocabulary safety clamp
        if advanced_fraction < ADVANCED_PRESENCE_MIN {
            raw = raw.min(SAFETY_CLAMP_CEILING);
        }

        // Band clamping, applied before numeric scaling. The B floor
        // carries into the advanced band: crossing the 7% threshold by
        // gaining C1/C2 words must not drop a score the B2 presence
        // already guaranteed.
        if advanced_fraction > BAND_C_ADVANCED_FRACTION {
            if fractions[3] > BAND_B_B2_FRACTION {
                raw = raw.max(BAND_B_RANGE.0);
            }
        } else if fractions[3] > BAND_B_B2_FRACTION {
            raw = raw.clamp(BAND_B_RANGE.0, BAND_B_RANGE.1);
        } else {
            raw = raw.clamp(BAND_A_RANGE.0, BAND_A_RANGE.1);
        }

        let mut score = (raw * 100.0).floor().clamp(0.0, 100.0) as u32;

        // Genre adjustment happens after integer scaling
        if let Some(genres) = genres {
            let multiplier = self.genre_multiplier(genres);
            score = ((score as f64 * multiplier).floor().clamp(0.0, 100.0)) as u32;
        }

        let breakdown: HashMap<CefrLevel, f64> = CefrLevel::all()
            .iter()
            .enumerate()
            .filter(|(i, _)| counts[*i] > 0)
            .map(|(i, level)| (*level, fractions[i]))
            .collect();

        DifficultyResult {
            level: bucket_for(score_band(score)),
            score,
            breakdown,
        }
    }

    /// Legacy scoring mode for inputs lacking per-word detail: a plain
    /// count-per-level distribution, fixed percentage thresholds and a
    /// weighted average. Kept for backward-compatible inputs only.
    pub fn compute_difficulty(
        &self,
        level_counts: &HashMap<CefrLevel, usize>,
    ) -> (DifficultyLevel, u32, HashMap<CefrLevel, usize>) {
        let total: usize = level_counts.values().sum();
        if total == 0 {
            return (DifficultyLevel::Elementary, 0, level_counts.clone());
        }

        let frac = |level: CefrLevel| -> f64 {
            *level_counts.get(&level).unwrap_or(&0) as f64 / total as f64
        };

        let score = (frac(CefrLevel::A1) * 10.0
            + frac(CefrLevel::A2) * 25.0
            + frac(CefrLevel::B1) * 45.0
            + frac(CefrLevel::B2) * 65.0
            + frac(CefrLevel::C1) * 85.0
            + frac(CefrLevel::C2) * 100.0)
            .round()
            .clamp(0.0, 100.0) as u32;

        let advanced = frac(CefrLevel::C1) + frac(CefrLevel::C2);
        let upper_mid = frac(CefrLevel::B1) + frac(CefrLevel::B2);
        let level = if advanced >= 0.20 {
            DifficultyLevel::Proficient
        } else if advanced >= 0.08 {
            DifficultyLevel::Advanced
        } else if upper_mid >= 0.30 || frac(CefrLevel::B2) >= 0.15 {
            DifficultyLevel::Intermediate
        } else {
            DifficultyLevel::Elementary
        };

        (level, score, level_counts.clone())
    }

    /// Multiplier in [0.70, 1.20] from the genre weight table. Kids/family
    /// genres dominate toward the easiest multiplier present; otherwise a
    /// 70/30 blend biased toward the most extreme weight present.
    fn genre_multiplier(&self, genres: &[String]) -> f64 {
        let mut weights: Vec<f64> = Vec::new();
        let mut has_kids = false;
        for genre in genres {
            let genre = genre.to_lowercase();
            if let Some(weight) = self.genre_weights.get(&genre) {
                weights.push(*weight);
            }
            if self.kids_genres.contains(&genre) {
                has_kids = true;
            }
        }

        if weights.is_empty() {
            return 1.0;
        }

        let multiplier = if has_kids {
            weights.iter().copied().fold(f64::INFINITY, f64::min)
        } else {
            let extreme = weights
                .iter()
                .copied()
                .max_by(|a, b| (a - 1.0).abs().total_cmp(&(b - 1.0).abs()))
                .unwrap_or(1.0);
            let mean = weights.iter().sum::<f64>() / weights.len() as f64;
            0.7 * extreme + 0.3 * mean
        };

        multiplier.clamp(0.70, 1.20)
    }

    fn phrasal_density(&self, words: &[WordData]) -> f64 {
        let hits = words
            .iter()
            .filter(|w| self.particles.contains(&w.word.to_lowercase()))
            .count();
        hits as f64 / words.len() as f64
    }
}

/// Six-way score thresholds. The public result collapses these into four
/// buckets, but the finer split stays visible for callers that want it.
pub fn score_band(score: u32) -> CefrLevel {
    match score {
        0..=24 => CefrLevel::A1,
        25..=39 => CefrLevel::A2,
        40..=54 => CefrLevel::B1,
        55..=69 => CefrLevel::B2,
        70..=84 => CefrLevel::C1,
        _ => CefrLevel::C2,
    }
}

fn bucket_for(band: CefrLevel) -> DifficultyLevel {
    match band {
        CefrLevel::A1 | CefrLevel::A2 | CefrLevel::Unknown => DifficultyLevel::Elementary,
        CefrLevel::B1 | CefrLevel::B2 => DifficultyLevel::Intermediate,
        CefrLevel::C1 => DifficultyLevel::Advanced,
        CefrLevel::C2 => DifficultyLevel::Proficient,
    }
}

fn weighted_fraction_sum(fractions: &[f64; 6], weights: &[f64; 6]) -> f64 {
    fractions.iter().zip(weights).map(|(f, w)| f * w).sum()
}

/// Median unique-word level mapped from the 1-6 ordinal scale to [0,1]
fn median_level_signal(ordinals: &mut Vec<u8>) -> f64 {
    if ordinals.is_empty() {
        return 0.0;
    }
    ordinals.sort_unstable();
    let n = ordinals.len();
    let median = if n % 2 == 1 {
        ordinals[n / 2] as f64
    } else {
        (ordinals[n / 2 - 1] as f64 + ordinals[n / 2] as f64) / 2.0
    };
    ((median - 1.0) / 5.0).clamp(0.0, 1.0)
}

/// Herdan's C: ln(unique)/ln(total), robust to text length
fn herdan_c(unique: usize, total: usize) -> f64 {
    if unique <= 1 || total <= 1 {
        return 0.0;
    }
    ((unique as f64).ln() / (total as f64).ln()).min(1.0)
}

/// Mean syllables per non-proper-noun word, normalized by 4
fn syllable_signal(words: &[WordData]) -> f64 {
    let mut sum = 0usize;
    let mut counted = 0usize;
    for w in words {
        // Skip likely proper nouns
        if w.word.chars().next().is_some_and(|c| c.is_uppercase()) {
            continue;
        }
        sum += count_syllables(&w.word);
        counted += 1;
    }
    if counted == 0 {
        return 0.0;
    }
    (sum as f64 / counted as f64 / 4.0).min(1.0)
}

/// Vowel-group heuristic, minimum one syllable per word
pub fn count_syllables(word: &str) -> usize {
    let mut groups = 0;
    let mut in_vowel_group = false;
    for c in word.to_lowercase().chars() {
        let is_vowel = matches!(c, 'a' | 'e' | 'i' | 'o' | 'u' | 'y');
        if is_vowel && !in_vowel_group {
            groups += 1;
        }
        in_vowel_group = is_vowel;
    }
    groups.max(1)
}

/// Ordinal spread of present levels, with noise filtering: C2 below 1%
/// is treated as absent, and below 2% combined C1+C2 both collapse away
fn spread_signal(fractions: &[f64; 6], advanced_fraction: f64) -> f64 {
    let mut present: Vec<u8> = Vec::new();
    for (i, fraction) in fractions.iter().enumerate() {
        if *fraction <= 0.0 {
            continue;
        }
        let ordinal = (i + 1) as u8;
        if ordinal == 6 && *fraction < 0.01 {
            continue;
        }
        if ordinal >= 5 && advanced_fraction < 0.02 {
            continue;
        }
        present.push(ordinal);
    }

    match (present.iter().min(), present.iter().max()) {
        (Some(min), Some(max)) => (*max - *min) as f64 / 5.0,
        _ => 0.0,
    }
}

/// Average Zipf rarity: (7 − mean)/7, defaulting the mean when no scores
/// are available
fn zipf_rarity_signal(words: &[WordData]) -> f64 {
    let scores: Vec<f64> = words.iter().filter_map(|w| w.zipf_score).collect();
    let mean = if scores.is_empty() {
        DEFAULT_MEAN_ZIPF
    } else {
        scores.iter().sum::<f64>() / scores.len() as f64
    };
    ((7.0 - mean) / 7.0).clamp(0.0, 1.0)
}

/// Flesch Reading Ease converted to a difficulty-direction signal
fn readability_signal(text: &str) -> f64 {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.is_empty() {
        return DEFAULT_READABILITY_SIGNAL;
    }

    let sentences = text
        .split(['.', '!', '?'])
        .filter(|s| !s.trim().is_empty())
        .count()
        .max(1);

    let syllables: usize = words
        .iter()
        .map(|w| {
            let cleaned: String = w.chars().filter(|c| c.is_alphabetic()).collect();
            if cleaned.is_empty() {
                0
            } else {
                count_syllables(&cleaned)
            }
        })
        .sum();

    let words_per_sentence = words.len() as f64 / sentences as f64;
    let syllables_per_word = syllables as f64 / words.len() as f64;
    let fre = (206.835 - 1.015 * words_per_sentence - 84.6 * syllables_per_word).clamp(0.0, 100.0);

    (100.0 - fre) / 100.0
}
