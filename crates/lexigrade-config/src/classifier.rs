use std::collections::HashMap;

use serde::{Deserialize, Serialize};

fn default_top_k() -> usize {
    5
}

fn default_similarity_floor() -> f32 {
    0.3
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    /// Disabled by default; enabling requires a backend injected at
    /// pipeline construction.
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_top_k")]
    pub top_k: usize,
    #[serde(default = "default_similarity_floor")]
    pub similarity_floor: f32,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            top_k: default_top_k(),
            similarity_floor: default_similarity_floor(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    pub embedding: EmbeddingConfig,
    /// Frequency-band overrides merged into the default threshold table,
    /// keyed by level string ("A1".."C2"), values are [min_rank, max_rank)
    #[serde(default)]
    pub threshold_overrides: HashMap<String, (u32, u32)>,
}
