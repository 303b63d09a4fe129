//! Text segmentation: sentence spans and chapter boundaries.

pub mod chapter;
pub mod sentence;

pub use chapter::{split_chapters, Chapter};
pub use sentence::{split_sentences, Sentence};
