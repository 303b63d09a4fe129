//! Sentence similarity graph construction and storage.

pub mod similarity;

pub use similarity::SimilarityGraph;
