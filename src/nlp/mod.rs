//! Language detection, tokenization, and stopword filtering.

pub mod stopwords;
pub mod tokenizer;

pub use stopwords::StopwordFilter;
pub use tokenizer::{detect_language, Tokenizer};
