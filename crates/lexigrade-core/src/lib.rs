pub mod classifier;
pub mod embedding;
pub mod error;
pub mod frequency;
pub mod language;
pub mod preprocess;
pub mod scorer;
pub mod wordlist;
