pub mod lemmatizer;
pub mod pipeline;
pub mod zipf;

pub use lemmatizer::EnglishLemmatizer;
pub use pipeline::EnglishPipeline;
pub use zipf::EnglishZipf;
