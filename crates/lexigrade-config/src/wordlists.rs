use serde::{Deserialize, Serialize};

fn default_filenames() -> Vec<String> {
    // Load order is merge precedence: first source to provide a lemma wins.
    vec![
        "oxford_3000.json".to_string(),
        "oxford_5000.json".to_string(),
        "efllex.json".to_string(),
        "evp.json".to_string(),
    ]
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WordlistConfig {
    /// Directory holding the wordlist JSON files. When absent (or files are
    /// missing) the embedded sample lists are used instead.
    pub data_dir: Option<String>,
    /// File names looked up under `data_dir`, in precedence order
    #[serde(default = "default_filenames")]
    pub filenames: Vec<String>,
    /// Extra wordlist files merged after the defaults (lowest precedence)
    #[serde(default)]
    pub additional_paths: Vec<String>,
}

impl Default for WordlistConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            filenames: default_filenames(),
            additional_paths: vec![],
        }
    }
}
