use std::env;

use serde::{Deserialize, Serialize};

use self::classifier::ClassifierConfig;
use self::scorer::ScorerConfig;
use self::wordlists::WordlistConfig;

pub mod classifier;
pub mod scorer;
pub mod wordlists;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub wordlists: WordlistConfig,
    pub classifier: ClassifierConfig,
    pub scorer: ScorerConfig,
}

impl Config {
    pub fn new() -> Self {
        let mut wordlists = WordlistConfig::default();

        if let Ok(dir) = env::var("LEXIGRADE_DATA_DIR") {
            wordlists.data_dir = Some(dir);
        }

        let mut classifier = ClassifierConfig::default();

        if let Some(enabled) = env::var("LEXIGRADE_EMBEDDING_ENABLED")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            classifier.embedding.enabled = enabled;
        }

        Config {
            wordlists,
            classifier,
            scorer: ScorerConfig::default(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            wordlists: WordlistConfig::default(),
            classifier: ClassifierConfig::default(),
            scorer: ScorerConfig::default(),
        }
    }
}
