use std::collections::{HashMap, HashSet};

use lexigrade_core::language::Lemmatizer;

/// Rule-based English lemmatizer: an irregular-form table plus ordered
/// suffix rules. When built with a vocabulary, ambiguous stems (silent-e
/// restoration, f/fe plurals) are resolved against it; without one the
/// plain stem wins.
pub struct EnglishLemmatizer {
    irregulars: HashMap<&'static str, &'static str>,
    vocabulary: HashSet<String>,
}

impl EnglishLemmatizer {
    pub fn new() -> Self {
        Self {
            irregulars: irregular_forms(),
            vocabulary: HashSet::new(),
        }
    }

    /// Known dictionary forms used to pick among candidate stems
    pub fn with_vocabulary<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut lemmatizer = Self::new();
        lemmatizer.vocabulary = words.into_iter().map(|w| w.into().to_lowercase()).collect();
        lemmatizer
    }

    /// First candidate present in the vocabulary, else the first candidate
    fn pick(&self, candidates: &[String]) -> String {
        for candidate in candidates {
            if self.vocabulary.contains(candidate) {
                return candidate.clone();
            }
        }
        candidates[0].clone()
    }

    fn strip_plural(&self, word: &str) -> Option<String> {
        if let Some(stem) = word.strip_suffix("ies") {
            if word.len() > 4 {
                return Some(format!("{stem}y"));
            }
        }

        if let Some(stem) = word.strip_suffix("ves") {
            if !stem.is_empty() {
                return Some(self.pick(&[
                    format!("{stem}ve"),
                    format!("{stem}fe"),
                    format!("{stem}f"),
                ]));
            }
        }

        for suffix in ["sses", "shes", "ches", "xes", "zes"] {
            if let Some(stem) = word.strip_suffix("es") {
                if word.ends_with(suffix) {
                    return Some(stem.to_string());
                }
            }
        }

        if word.ends_with('s')
            && !word.ends_with("ss")
            && !word.ends_with("us")
            && !word.ends_with("is")
            && word.len() > 3
        {
            return Some(word[..word.len() - 1].to_string());
        }

        None
    }

    /// Candidates for a stem left by -ing/-ed/-er/-est stripping:
    /// undoubled consonant, silent-e restoration, or the bare stem
    fn resolve_stem(&self, stem: &str) -> String {
        let chars: Vec<char> = stem.chars().collect();
        let n = chars.len();

        let mut candidates = Vec::new();
        if n >= 2 && chars[n - 1] == chars[n - 2] && !is_vowel(chars[n - 1]) && chars[n - 1] != 'l'
            && chars[n - 1] != 's'
        {
            candidates.push(chars[..n - 1].iter().collect::<String>());
        }
        candidates.push(stem.to_string());
        candidates.push(format!("{stem}e"));

        self.pick(&candidates)
    }

    fn strip_verb_suffix(&self, word: &str) -> Option<String> {
        if let Some(stem) = word.strip_suffix("ied") {
            if word.len() > 4 {
                return Some(format!("{stem}y"));
            }
        }

        if let Some(stem) = word.strip_suffix("ing") {
            if stem.len() >= 2 {
                return Some(self.resolve_stem(stem));
            }
        }

        if let Some(stem) = word.strip_suffix("ed") {
            if stem.len() >= 2 {
                return Some(self.resolve_stem(stem));
            }
        }

        None
    }

    fn strip_comparative(&self, word: &str) -> Option<String> {
        if let Some(stem) = word.strip_suffix("iest") {
            if word.len() > 5 {
                return Some(format!("{stem}y"));
            }
        }
        if let Some(stem) = word.strip_suffix("ier") {
            if word.len() > 4 {
                return Some(format!("{stem}y"));
            }
        }
        None
    }
}

impl Lemmatizer for EnglishLemmatizer {
    fn lemma(&self, word: &str) -> String {
        let word = word.to_lowercase();

        if let Some(base) = self.irregulars.get(word.as_str()) {
            return base.to_string();
        }

        // Already a known dictionary form
        if self.vocabulary.contains(&word) {
            return word;
        }

        if let Some(base) = self.strip_comparative(&word) {
            return base;
        }
        if let Some(base) = self.strip_verb_suffix(&word) {
            return base;
        }
        if let Some(base) = self.strip_plural(&word) {
            return base;
        }

        word
    }
}

impl Default for EnglishLemmatizer {
    fn default() -> Self {
        Self::new()
    }
}

fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u')
}

fn irregular_forms() -> HashMap<&'static str, &'static str> {
    [
        // be / have / do
        ("am", "be"),
        ("is", "be"),
        ("are", "be"),
        ("was", "be"),
        ("were", "be"),
        ("been", "be"),
        ("being", "be"),
        ("has", "have"),
        ("had", "have"),
        ("having", "have"),
        ("does", "do"),
        ("did", "do"),
        ("done", "do"),
        // common irregular verbs
        ("went", "go"),
        ("gone", "go"),
        ("goes", "go"),
        ("ran", "run"),
        ("said", "say"),
        ("saw", "see"),
        ("seen", "see"),
        ("came", "come"),
        ("took", "take"),
        ("taken", "take"),
        ("gave", "give"),
        ("given", "give"),
        ("got", "get"),
        ("gotten", "get"),
        ("made", "make"),
        ("knew", "know"),
        ("known", "know"),
        ("thought", "think"),
        ("told", "tell"),
        ("felt", "feel"),
        ("left", "leave"),
        ("wrote", "write"),
        ("written", "write"),
        ("spoke", "speak"),
        ("spoken", "speak"),
        ("bought", "buy"),
        ("brought", "bring"),
        ("ate", "eat"),
        ("eaten", "eat"),
        ("drank", "drink"),
        ("drunk", "drink"),
        ("flew", "fly"),
        ("grew", "grow"),
        ("grown", "grow"),
        ("heard", "hear"),
        ("held", "hold"),
        ("kept", "keep"),
        ("lost", "lose"),
        ("met", "meet"),
        ("paid", "pay"),
        ("sang", "sing"),
        ("sat", "sit"),
        ("slept", "sleep"),
        ("stood", "stand"),
        ("swam", "swim"),
        ("wore", "wear"),
        ("won", "win"),
        ("found", "find"),
        ("understood", "understand"),
        ("began", "begin"),
        ("begun", "begin"),
        ("broke", "break"),
        ("broken", "break"),
        ("chose", "choose"),
        ("chosen", "choose"),
        ("fell", "fall"),
        ("fallen", "fall"),
        ("sent", "send"),
        ("spent", "spend"),
        ("built", "build"),
        ("meant", "mean"),
        ("read", "read"),
        // irregular plurals
        ("children", "child"),
        ("men", "man"),
        ("women", "woman"),
        ("people", "person"),
        ("mice", "mouse"),
        ("feet", "foot"),
        ("teeth", "tooth"),
        ("geese", "goose"),
        // irregular comparatives
        ("better", "good"),
        ("best", "good"),
        ("worse", "bad"),
        ("worst", "bad"),
        ("more", "many"),
        ("most", "many"),
        ("less", "little"),
        ("least", "little"),
        ("further", "far"),
        ("furthest", "far"),
    ]
    .into_iter()
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn irregular_forms_resolve_to_their_base() {
        let lemmatizer = EnglishLemmatizer::new();
        assert_eq!(lemmatizer.lemma("went"), "go");
        assert_eq!(lemmatizer.lemma("Was"), "be");
        assert_eq!(lemmatizer.lemma("children"), "child");
        assert_eq!(lemmatizer.lemma("better"), "good");
        assert_eq!(lemmatizer.lemma("thought"), "think");
    }

    #[test]
    fn regular_plurals_are_stripped() {
        let lemmatizer = EnglishLemmatizer::new();
        assert_eq!(lemmatizer.lemma("cats"), "cat");
        assert_eq!(lemmatizer.lemma("stories"), "story");
        assert_eq!(lemmatizer.lemma("classes"), "class");
        assert_eq!(lemmatizer.lemma("boxes"), "box");
        // Short and -ss/-us/-is words stay intact
        assert_eq!(lemmatizer.lemma("gas"), "gas");
        assert_eq!(lemmatizer.lemma("glass"), "glass");
        assert_eq!(lemmatizer.lemma("bonus"), "bonus");
        assert_eq!(lemmatizer.lemma("basis"), "basis");
    }

    #[test]
    fn verb_suffixes_undo_consonant_doubling() {
        let lemmatizer = EnglishLemmatizer::new();
        assert_eq!(lemmatizer.lemma("running"), "run");
        assert_eq!(lemmatizer.lemma("stopped"), "stop");
        assert_eq!(lemmatizer.lemma("jumped"), "jump");
        assert_eq!(lemmatizer.lemma("studied"), "study");
    }

    #[test]
    fn vocabulary_restores_silent_e() {
        let lemmatizer = EnglishLemmatizer::with_vocabulary(["make", "take", "knife", "jump"]);
        assert_eq!(lemmatizer.lemma("making"), "make");
        assert_eq!(lemmatizer.lemma("taking"), "take");
        assert_eq!(lemmatizer.lemma("knives"), "knife");
        assert_eq!(lemmatizer.lemma("jumping"), "jump");
    }

    #[test]
    fn known_forms_pass_through() {
        let lemmatizer = EnglishLemmatizer::with_vocabulary(["thing", "sing"]);
        // "sing" must not lose its -ing
        assert_eq!(lemmatizer.lemma("sing"), "sing");
        assert_eq!(lemmatizer.lemma("thing"), "thing");
    }

    #[test]
    fn comparatives_restore_the_y() {
        let lemmatizer = EnglishLemmatizer::new();
        assert_eq!(lemmatizer.lemma("happier"), "happy");
        assert_eq!(lemmatizer.lemma("happiest"), "happy");
    }

    #[test]
    fn unknown_words_pass_through_lowercased() {
        let lemmatizer = EnglishLemmatizer::new();
        assert_eq!(lemmatizer.lemma("Flooble"), "flooble");
    }
}
