use std::collections::HashMap;

use serde::{Deserialize, Serialize};

fn default_genre_weights() -> HashMap<String, f64> {
    // Multipliers applied to the 0-100 score; <1.0 eases, >1.0 hardens.
    [
        ("family", 0.70),
        ("animation", 0.75),
        ("kids", 0.75),
        ("music", 0.90),
        ("comedy", 0.90),
        ("action", 0.90),
        ("adventure", 0.95),
        ("romance", 0.95),
        ("fantasy", 1.00),
        ("horror", 1.00),
        ("science fiction", 1.05),
        ("drama", 1.05),
        ("thriller", 1.05),
        ("western", 1.05),
        ("crime", 1.10),
        ("mystery", 1.10),
        ("war", 1.10),
        ("history", 1.15),
        ("documentary", 1.20),
    ]
    .into_iter()
    .map(|(g, w)| (g.to_string(), w))
    .collect()
}

fn default_kids_genres() -> Vec<String> {
    ["family", "animation", "kids"]
        .into_iter()
        .map(str::to_string)
        .collect()
}

fn default_phrasal_particles() -> Vec<String> {
    [
        "up", "down", "in", "out", "on", "off", "away", "back", "over", "through",
    ]
    .into_iter()
    .map(str::to_string)
    .collect()
}

/// Policy tables for the difficulty scorer. Kept as data so they can be
/// tuned and tested independently of the algorithm shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScorerConfig {
    #[serde(default = "default_genre_weights")]
    pub genre_weights: HashMap<String, f64>,
    /// Genres whose easiest multiplier dominates the blend outright
    #[serde(default = "default_kids_genres")]
    pub kids_genres: Vec<String>,
    /// Directional particles counted by the phrasal-verb density signal
    #[serde(default = "default_phrasal_particles")]
    pub phrasal_particles: Vec<String>,
}

impl Default for ScorerConfig {
    fn default() -> Self {
        Self {
            genre_weights: default_genre_weights(),
            kids_genres: default_kids_genres(),
            phrasal_particles: default_phrasal_particles(),
        }
    }
}
