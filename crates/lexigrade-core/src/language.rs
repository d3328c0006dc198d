//! Capability seams the classifier consumes. Implementations live in the
//! per-language crates; all of them are soft dependencies: returning
//! nothing degrades the classifier to later fallback stages instead of
//! failing the request.

/// Reduces a surface word to its dictionary form
pub trait Lemmatizer: Send + Sync {
    fn lemma(&self, word: &str) -> String;

    /// One call per unique surface word; the default maps one by one
    fn lemma_batch(&self, words: &[String]) -> Vec<String> {
        words.iter().map(|w| self.lemma(w)).collect()
    }
}

/// Log-scale word commonality lookup (Zipf scale, roughly 0-7 where >=6 is
/// ultra-common). `None` means the word is unknown to the corpus, which is
/// a valid, expected result.
pub trait ZipfLookup: Send + Sync {
    fn zipf(&self, word: &str) -> Option<f64>;
}

/// Word-vector lookup backing the optional embedding similarity stage
pub trait EmbeddingLookup: Send + Sync {
    fn embed(&self, word: &str) -> Option<Vec<f32>>;
}

/// Passes surface forms through unchanged. Useful when no lemmatizer
/// capability is available; the classifier then works on raw tokens.
pub struct IdentityLemmatizer;

impl Lemmatizer for IdentityLemmatizer {
    fn lemma(&self, word: &str) -> String {
        word.to_lowercase()
    }
}
