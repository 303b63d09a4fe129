//! Core data model: summarization modes, language tags, configuration,
//! documents, and the summary result type.
//!
//! Configuration is an explicit, immutable value threaded through every call.
//! Defaults are merged into caller-supplied partial configs at
//! deserialization time via `#[serde(default)]`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SummarizeError;
use crate::segment::chapter::{self, Chapter};

/// Summarization strategy selected at the orchestrator boundary.
///
/// Parsing an unknown mode string fails at configuration time, so the
/// pipeline itself never sees an unsupported mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Graph-ranking pipeline only; always available, no external dependency.
    Extractive,
    /// Delegate the whole scope to the generative collaborator.
    Generative,
    /// Extractive pre-reduction followed by generative compression.
    Hybrid,
}

impl Default for Mode {
    fn default() -> Self {
        Mode::Extractive
    }
}

impl FromStr for Mode {
    type Err = SummarizeError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_lowercase().as_str() {
            "extractive" => Ok(Mode::Extractive),
            "generative" => Ok(Mode::Generative),
            "hybrid" | "mixed" => Ok(Mode::Hybrid),
            other => Err(SummarizeError::InvalidConfig(format!(
                "unsupported mode: {other:?}"
            ))),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Mode::Extractive => "extractive",
            Mode::Generative => "generative",
            Mode::Hybrid => "hybrid",
        };
        f.write_str(name)
    }
}

/// Dominant script/language of a scope, used to pick segmentation and
/// tokenization rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// CJK-dominant text (character ratio above 30%).
    Chinese,
    /// ASCII-letter-dominant text (ratio above 50%).
    English,
    /// Neither threshold met; tokenization decides per sentence.
    Other,
}

/// Character budget handed to the generative collaborator when the caller
/// did not configure an absolute `max_length`.
pub const DEFAULT_GENERATIVE_BUDGET: usize = 200;

/// Upper bound on the extractive pre-reduction in hybrid mode, in characters.
/// The pre-pass reduces to `min(HYBRID_PRE_REDUCTION_CAP, len / 2)`.
pub const HYBRID_PRE_REDUCTION_CAP: usize = 4000;

/// Engine configuration.
///
/// All fields have defaults; `validate` is called once by
/// [`Summarizer::new`](crate::pipeline::Summarizer::new) so the pipeline can
/// assume a well-formed config everywhere else.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SummarizeConfig {
    /// Target compression fraction (selected sentences ≈ `n · ratio`).
    pub ratio: f64,
    /// Absolute character budget for the final summary, if any.
    pub max_length: Option<usize>,
    /// Summarization strategy.
    pub mode: Mode,
    /// Language hint from the text source; detected from the text when unset.
    pub language: Option<Language>,
    /// Sampling temperature forwarded to the generative collaborator.
    pub temperature: f32,
    /// Sentence count above which chunked processing engages.
    pub chunk_threshold: usize,
    /// Sentences per chunk window.
    pub window_size: usize,
    /// Sentences shared between adjacent windows.
    pub overlap: usize,
    /// TextRank damping factor.
    pub damping: f64,
    /// L1 convergence threshold for power iteration.
    pub convergence_epsilon: f64,
    /// Iteration cap; non-convergence within the cap is not an error.
    pub max_iterations: usize,
}

impl Default for SummarizeConfig {
    fn default() -> Self {
        Self {
            ratio: 0.2,
            max_length: None,
            mode: Mode::Extractive,
            language: None,
            temperature: 0.7,
            chunk_threshold: 5_000,
            window_size: 5_000,
            overlap: 500,
            damping: 0.85,
            convergence_epsilon: 1e-6,
            max_iterations: 100,
        }
    }
}

impl SummarizeConfig {
    /// Validate the configuration, rejecting invalid invocations before any
    /// computation starts.
    pub fn validate(&self) -> Result<(), SummarizeError> {
        if !self.ratio.is_finite() || self.ratio <= 0.0 || self.ratio > 1.0 {
            return Err(SummarizeError::InvalidConfig(format!(
                "ratio must be in (0, 1], got {}",
                self.ratio
            )));
        }
        if self.max_length == Some(0) {
            return Err(SummarizeError::InvalidConfig(
                "max_length must be positive".into(),
            ));
        }
        if !self.damping.is_finite() || self.damping <= 0.0 || self.damping >= 1.0 {
            return Err(SummarizeError::InvalidConfig(format!(
                "damping must be in (0, 1), got {}",
                self.damping
            )));
        }
        if !self.convergence_epsilon.is_finite() || self.convergence_epsilon <= 0.0 {
            return Err(SummarizeError::InvalidConfig(
                "convergence_epsilon must be positive".into(),
            ));
        }
        if self.max_iterations == 0 {
            return Err(SummarizeError::InvalidConfig(
                "max_iterations must be at least 1".into(),
            ));
        }
        if self.chunk_threshold == 0 || self.window_size == 0 {
            return Err(SummarizeError::InvalidConfig(
                "chunk_threshold and window_size must be positive".into(),
            ));
        }
        if self.overlap >= self.window_size {
            return Err(SummarizeError::InvalidConfig(format!(
                "overlap ({}) must be smaller than window_size ({})",
                self.overlap, self.window_size
            )));
        }
        if !self.temperature.is_finite() || self.temperature < 0.0 {
            return Err(SummarizeError::InvalidConfig(format!(
                "temperature must be non-negative, got {}",
                self.temperature
            )));
        }
        Ok(())
    }
}

/// An input document with its detected (or hinted) dominant language.
///
/// Immutable once created; owned by the call that invokes the pipeline.
#[derive(Debug, Clone)]
pub struct Document {
    /// The already-decoded text (encoding detection is the text source's job).
    pub text: String,
    /// Dominant language tag.
    pub language: Language,
}

impl Document {
    /// Create a document, detecting the dominant language from the text.
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let language = crate::nlp::tokenizer::detect_language(&text);
        Self { text, language }
    }

    /// Create a document with an explicit language hint.
    pub fn with_language(text: impl Into<String>, language: Language) -> Self {
        Self {
            text: text.into(),
            language,
        }
    }

    /// Split the document into chapters using heading heuristics.
    ///
    /// A document with no recognizable headings yields a single chapter.
    pub fn chapters(&self) -> Vec<Chapter> {
        chapter::split_chapters(&self.text)
    }
}

/// A produced summary with enough metadata to distinguish a valid short
/// summary from a degraded result programmatically.
#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    /// Concatenated summary text.
    pub text: String,
    /// Selected sentence indices into the source scope, strictly ascending.
    /// Empty when the text came from the generative collaborator verbatim.
    pub indices: Vec<usize>,
    /// Achieved length in characters.
    pub length: usize,
    /// The character budget that was requested, if any.
    pub requested_max_length: Option<usize>,
    /// The mode that actually produced the text.
    pub mode: Mode,
    /// True when a generative failure was transparently replaced by the
    /// extractive result.
    pub fell_back: bool,
    /// True when the text was cut to the character budget and a truncation
    /// marker appended.
    pub truncated: bool,
}
