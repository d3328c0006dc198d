pub mod types;

pub use types::{
    CefrLevel, ClassificationSource, ClassificationStats, DifficultyLevel, DifficultyResult,
    WordClassification, WordData,
};
