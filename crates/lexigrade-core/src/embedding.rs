use std::collections::HashMap;
use std::sync::Arc;

use lexigrade_types::CefrLevel;

use crate::language::EmbeddingLookup;
use crate::wordlist::WordlistStore;

/// Embedding confidence never exceeds this, so the stage can never outrank
/// a dictionary match
const MAX_CONFIDENCE: f32 = 0.75;

/// Vector-similarity fallback for out-of-dictionary words: the k most
/// similar known dictionary words vote on a CEFR level, weighted by cosine
/// similarity. Only used when explicitly enabled.
pub struct EmbeddingClassifier {
    backend: Arc<dyn EmbeddingLookup>,
    vectors: Vec<(String, CefrLevel, Vec<f32>)>,
    top_k: usize,
    similarity_floor: f32,
}

impl EmbeddingClassifier {
    /// Build the vector cache over the merged wordlist. Words the backend
    /// cannot embed are left out of the cache.
    pub fn new(
        backend: Arc<dyn EmbeddingLookup>,
        wordlists: &WordlistStore,
        top_k: usize,
        similarity_floor: f32,
    ) -> Self {
        let mut vectors = Vec::new();
        for (word, level) in wordlists.iter_lemmas() {
            if let Some(vector) = backend.embed(word) {
                vectors.push((word.to_string(), level, vector));
            }
        }

        tracing::info!(
            "Embedding cache: {} of {} dictionary words vectorized",
            vectors.len(),
            wordlists.lemma_count()
        );

        Self {
            backend,
            vectors,
            top_k,
            similarity_floor,
        }
    }

    /// Weighted-vote classification. None when the backend cannot embed the
    /// word or nothing clears the similarity floor.
    pub fn classify(&self, word: &str) -> Option<(CefrLevel, f32)> {
        let query = self.backend.embed(word)?;

        let mut neighbors: Vec<(CefrLevel, f32)> = self
            .vectors
            .iter()
            .filter_map(|(_, level, vector)| {
                let sim = cosine_similarity(&query, vector);
                (sim >= self.similarity_floor).then_some((*level, sim))
            })
            .collect();

        if neighbors.is_empty() {
            return None;
        }

        neighbors.sort_by(|a, b| b.1.total_cmp(&a.1));
        neighbors.truncate(self.top_k);

        let mut votes: HashMap<CefrLevel, f32> = HashMap::new();
        let mut total_vote = 0.0;
        for (level, sim) in &neighbors {
            *votes.entry(*level).or_insert(0.0) += sim;
            total_vote += sim;
        }

        // Deterministic winner: highest summed similarity, ties broken
        // toward the easier level
        let (winner, winner_vote) = votes
            .into_iter()
            .max_by(|a, b| a.1.total_cmp(&b.1).then(b.0.ordinal().cmp(&a.0.ordinal())))?;

        let top_similarity = neighbors[0].1;
        let vote_share = winner_vote / total_vote;
        let match_ratio = neighbors.len() as f32 / self.top_k as f32;

        let confidence =
            (0.5 * top_similarity + 0.3 * vote_share + 0.2 * match_ratio).min(MAX_CONFIDENCE);

        Some((winner, confidence))
    }
}

fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return 0.0;
    }
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}
