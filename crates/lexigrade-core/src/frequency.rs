use std::collections::HashMap;
use std::sync::Arc;

use lexigrade_types::CefrLevel;

use crate::language::ZipfLookup;

/// Rank assigned to anything below the Zipf floor; the corpus treats such
/// words as simply "rare" rather than distinguishing among them.
const RARE_RANK: u32 = 100_000;

/// Zipf score below which rank conversion is not meaningful
const ZIPF_FLOOR: f64 = 3.0;

/// Maps a lemma to an approximate corpus-frequency rank (lower = more
/// common) through a pluggable Zipf-scale lookup. Results are cached for
/// the instance's lifetime, including negative ones.
pub struct FrequencyOracle {
    lookup: Arc<dyn ZipfLookup>,
    cache: HashMap<String, Option<u32>>,
}

impl FrequencyOracle {
    pub fn new(lookup: Arc<dyn ZipfLookup>) -> Self {
        Self {
            lookup,
            cache: HashMap::new(),
        }
    }

    /// Approximate rank, None if the word is unknown to the corpus
    pub fn rank(&mut self, lemma: &str) -> Option<u32> {
        if let Some(cached) = self.cache.get(lemma) {
            return *cached;
        }

        let rank = self.lookup.zipf(lemma).map(zipf_to_rank);
        self.cache.insert(lemma.to_string(), rank);
        rank
    }
}

/// `rank ≈ 10^(7 − zipf)` for scores at or above the floor; everything
/// below the floor collapses to one large rank.
fn zipf_to_rank(zipf: f64) -> u32 {
    if zipf >= ZIPF_FLOOR {
        10f64.powf(7.0 - zipf).round() as u32
    } else {
        RARE_RANK
    }
}

/// CEFR band per half-open rank interval `[min, max)`. The defaults cover
/// 0 to infinity with six contiguous bands.
#[derive(Debug, Clone)]
pub struct FrequencyThresholds {
    bands: Vec<(CefrLevel, u32, u32)>,
}

impl FrequencyThresholds {
    pub fn level_for_rank(&self, rank: u32) -> CefrLevel {
        for (level, min, max) in &self.bands {
            if rank >= *min && rank < *max {
                return *level;
            }
        }
        CefrLevel::C2
    }

    /// Merge new bounds into the table by level, then re-sort by lower
    /// bound. Contiguity is the caller's responsibility; a gap or overlap
    /// is logged, not rejected.
    pub fn update(&mut self, new_bounds: &HashMap<CefrLevel, (u32, u32)>) {
        for (level, min, max) in self.bands.iter_mut() {
            if let Some((new_min, new_max)) = new_bounds.get(level) {
                *min = *new_min;
                *max = *new_max;
            }
        }
        self.bands.sort_by_key(|(_, min, _)| *min);

        for pair in self.bands.windows(2) {
            let (prev_level, _, prev_max) = pair[0];
            let (next_level, next_min, _) = pair[1];
            if prev_max != next_min {
                tracing::warn!(
                    "Frequency thresholds not contiguous between {} and {}",
                    prev_level.as_str(),
                    next_level.as_str()
                );
            }
        }
    }
}

impl Default for FrequencyThresholds {
    fn default() -> Self {
        Self {
            bands: vec![
                (CefrLevel::A1, 0, 1_000),
                (CefrLevel::A2, 1_000, 2_000),
                (CefrLevel::B1, 2_000, 5_000),
                (CefrLevel::B2, 5_000, 10_000),
                (CefrLevel::C1, 10_000, 20_000),
                (CefrLevel::C2, 20_000, u32::MAX),
            ],
        }
    }
}
