//! Pluggable abstractive backend.
//!
//! The crate does not ship a model client; callers provide one by
//! implementing [`GenerativeBackend`]. Any failure (including an empty
//! response) makes the pipeline fall back to the extractive path.

use crate::error::GenerativeError;

/// An abstractive summarizer, typically backed by a language model.
pub trait GenerativeBackend: Send + Sync {
    /// Produce an abstractive summary of `text` in at most `max_length`
    /// characters. `temperature` controls sampling randomness; backends
    /// without sampling may ignore it.
    fn summarize(
        &self,
        text: &str,
        max_length: usize,
        temperature: f32,
    ) -> Result<String, GenerativeError>;
}
