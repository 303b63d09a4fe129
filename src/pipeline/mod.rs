//! The summarization pipeline: mode dispatch, the extractive path, chunked
//! processing for very long inputs, and transparent fallback when a
//! generative collaborator fails.

pub mod progress;

use std::fmt;
use std::sync::Arc;

use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::chunk;
use crate::error::{GenerativeError, SummarizeError};
use crate::generative::GenerativeBackend;
use crate::graph::SimilarityGraph;
use crate::nlp::{detect_language, Tokenizer};
use crate::rank::TextRank;
use crate::segment::chapter::Chapter;
use crate::segment::split_sentences;
use crate::select::{assemble, enforce_budget, select_top, target_count};
use crate::tfidf::TfIdf;
use crate::types::{
    Document, Language, Mode, Summary, SummarizeConfig, DEFAULT_GENERATIVE_BUDGET,
    HYBRID_PRE_REDUCTION_CAP,
};

use progress::{CancelToken, NoopProgress, ProgressSink};

/// Remaps a stage's local progress into a slice of the overall fraction.
struct StageProgress<'a> {
    inner: &'a dyn ProgressSink,
    base: f64,
    span: f64,
}

impl ProgressSink for StageProgress<'_> {
    fn report(&self, fraction: f64, message: &str, sub_progress: Option<f64>) {
        self.inner
            .report(self.base + self.span * fraction, message, sub_progress);
    }
}

/// A chapter together with its summary.
#[derive(Debug, Clone)]
pub struct ChapterSummary {
    pub chapter: Chapter,
    pub summary: Summary,
}

/// The summarization engine.
///
/// Holds a validated configuration and an optional generative backend;
/// cheap to clone and safe to share across threads.
#[derive(Clone)]
pub struct Summarizer {
    config: SummarizeConfig,
    generative: Option<Arc<dyn GenerativeBackend>>,
}

// Backend trait objects carry no useful Debug surface; show presence only.
impl fmt::Debug for Summarizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Summarizer")
            .field("config", &self.config)
            .field("generative", &self.generative.is_some())
            .finish()
    }
}

impl Summarizer {
    /// Create an engine from a configuration, validating it up front.
    pub fn new(config: SummarizeConfig) -> Result<Self, SummarizeError> {
        config.validate()?;
        Ok(Self {
            config,
            generative: None,
        })
    }

    /// Attach a generative backend for generative and hybrid modes.
    pub fn with_generative(mut self, backend: Arc<dyn GenerativeBackend>) -> Self {
        self.generative = Some(backend);
        self
    }

    pub fn config(&self) -> &SummarizeConfig {
        &self.config
    }

    /// Summarize a text with no progress reporting or cancellation.
    pub fn summarize(&self, text: &str) -> Result<Summary, SummarizeError> {
        self.summarize_with(text, &NoopProgress, &CancelToken::new())
    }

    /// Summarize a text, reporting progress and honoring cancellation.
    pub fn summarize_with(
        &self,
        text: &str,
        progress: &dyn ProgressSink,
        cancel: &CancelToken,
    ) -> Result<Summary, SummarizeError> {
        self.dispatch(text, None, progress, cancel)
    }

    /// Summarize a document, using its language tag unless the
    /// configuration overrides it.
    pub fn summarize_document(&self, document: &Document) -> Result<Summary, SummarizeError> {
        let language = self.config.language.unwrap_or(document.language);
        self.dispatch(
            &document.text,
            Some(language),
            &NoopProgress,
            &CancelToken::new(),
        )
    }

    fn dispatch(
        &self,
        text: &str,
        language_hint: Option<Language>,
        progress: &dyn ProgressSink,
        cancel: &CancelToken,
    ) -> Result<Summary, SummarizeError> {
        if cancel.is_cancelled() {
            return Err(SummarizeError::Cancelled);
        }
        match self.config.mode {
            Mode::Extractive => self.extractive(text, language_hint, progress, cancel),
            Mode::Generative => match self.try_generative(text) {
                Ok(summary) => Ok(summary),
                Err(reason) => {
                    warn!(%reason, "generative summarization failed, falling back");
                    let mut summary = self.extractive(text, language_hint, progress, cancel)?;
                    summary.fell_back = true;
                    Ok(summary)
                }
            },
            Mode::Hybrid => self.hybrid(text, language_hint, progress, cancel),
        }
    }

    /// Summarize each chapter of a document independently.
    ///
    /// Chapters whose body is empty (a bare heading) are skipped.
    pub fn summarize_chapters(
        &self,
        document: &Document,
    ) -> Result<Vec<ChapterSummary>, SummarizeError> {
        let chapters = document.chapters();
        info!(chapters = chapters.len(), "chapter summarization");
        let mut results = Vec::with_capacity(chapters.len());
        for chapter in chapters {
            let body = chapter.body(&document.text);
            if body.trim().is_empty() {
                continue;
            }
            let summary = self.summarize(body)?;
            results.push(ChapterSummary { chapter, summary });
        }
        Ok(results)
    }

    // ---- extractive path ----

    fn extractive(
        &self,
        text: &str,
        language_hint: Option<Language>,
        progress: &dyn ProgressSink,
        cancel: &CancelToken,
    ) -> Result<Summary, SummarizeError> {
        if text.trim().is_empty() {
            return Err(SummarizeError::EmptyInput);
        }

        let language = language_hint
            .or(self.config.language)
            .unwrap_or_else(|| detect_language(text));
        progress.report(0.05, "detecting language", None);

        let sentences = split_sentences(text);
        if sentences.is_empty() {
            return Err(SummarizeError::EmptyInput);
        }
        let n = sentences.len();
        debug!(sentences = n, ?language, "segmented scope");
        progress.report(0.15, "segmenting sentences", None);

        // Short inputs pass through untouched (modulo the character budget).
        if n <= 3 {
            let mut out = text.trim().to_string();
            let truncated = enforce_budget(&mut out, self.config.max_length);
            return Ok(self.finish(out, (0..n).collect(), truncated));
        }

        if cancel.is_cancelled() {
            return Err(SummarizeError::Cancelled);
        }

        let tokenizer = Tokenizer::new(language);
        let token_lists: Vec<Vec<String>> = sentences
            .par_iter()
            .map(|s| tokenizer.tokenize(s.trimmed()))
            .collect();
        progress.report(0.3, "tokenizing", None);

        let target = target_count(n, self.config.ratio);
        let mut indices = if n > self.config.chunk_threshold {
            let stage = StageProgress {
                inner: progress,
                base: 0.3,
                span: 0.6,
            };
            chunk::chunked_select(
                &token_lists,
                target,
                self.config.window_size,
                self.config.overlap,
                &self.ranker(),
                cancel,
                &stage,
            )?
        } else {
            self.score_scope(&token_lists, target, cancel)?
        };
        progress.report(0.9, "selecting sentences", None);

        // A chunked merge can still be too diffuse to read as a summary;
        // when it exceeds half a window, re-rank the merged picks globally.
        if n > self.config.chunk_threshold && indices.len() > self.config.window_size / 2 {
            debug!(merged = indices.len(), "second reduction pass");
            let merged_tokens: Vec<Vec<String>> =
                indices.iter().map(|&i| token_lists[i].clone()).collect();
            let second_target = target_count(indices.len(), 0.5);
            let local = self.score_scope(&merged_tokens, second_target, cancel)?;
            indices = local.into_iter().map(|i| indices[i]).collect();
        }

        let mut out = assemble(&sentences, &indices, language);
        let truncated = enforce_budget(&mut out, self.config.max_length);
        progress.report(1.0, "done", None);
        Ok(self.finish(out, indices, truncated))
    }

    /// Rank one scope's token lists and pick the top sentences.
    fn score_scope(
        &self,
        token_lists: &[Vec<String>],
        target: usize,
        cancel: &CancelToken,
    ) -> Result<Vec<usize>, SummarizeError> {
        let tfidf = TfIdf::weigh(token_lists);
        if tfidf.vocabulary_is_empty() {
            // Every token was filtered; positional fallback.
            return Ok((0..target.min(token_lists.len())).collect());
        }
        let graph = SimilarityGraph::from_vectors(&tfidf.vectors);
        let result = self.ranker().run(&graph, cancel)?;
        debug!(
            iterations = result.iterations,
            converged = result.converged,
            "ranking finished"
        );
        Ok(select_top(&result.scores, target.min(token_lists.len())))
    }

    fn ranker(&self) -> TextRank {
        TextRank::new()
            .with_damping(self.config.damping)
            .with_max_iterations(self.config.max_iterations)
            .with_epsilon(self.config.convergence_epsilon)
    }

    fn finish(&self, text: String, indices: Vec<usize>, truncated: bool) -> Summary {
        let length = text.chars().count();
        Summary {
            text,
            indices,
            length,
            requested_max_length: self.config.max_length,
            mode: Mode::Extractive,
            fell_back: false,
            truncated,
        }
    }

    // ---- generative and hybrid paths ----

    fn try_generative(&self, text: &str) -> Result<Summary, GenerativeError> {
        let backend = self.generative.as_deref().ok_or(GenerativeError::Unavailable)?;
        let budget = self
            .config
            .max_length
            .unwrap_or(DEFAULT_GENERATIVE_BUDGET);
        let mut out = backend.summarize(text, budget, self.config.temperature)?;
        if out.trim().is_empty() {
            return Err(GenerativeError::Empty);
        }
        let truncated = enforce_budget(&mut out, self.config.max_length);
        let length = out.chars().count();
        Ok(Summary {
            text: out,
            indices: vec![],
            length,
            requested_max_length: self.config.max_length,
            mode: self.config.mode,
            fell_back: false,
            truncated,
        })
    }

    fn hybrid(
        &self,
        text: &str,
        language_hint: Option<Language>,
        progress: &dyn ProgressSink,
        cancel: &CancelToken,
    ) -> Result<Summary, SummarizeError> {
        // Extractive pre-reduction keeps the generative prompt bounded.
        let chars = text.chars().count();
        let cap = HYBRID_PRE_REDUCTION_CAP.min(chars / 2).max(1);
        let reduced = if chars > cap {
            let stage = StageProgress {
                inner: progress,
                base: 0.0,
                span: 0.5,
            };
            let mut pre = self.clone();
            pre.config.mode = Mode::Extractive;
            pre.config.max_length = Some(cap);
            pre.extractive(text, language_hint, &stage, cancel)?.text
        } else {
            text.to_string()
        };
        progress.report(0.5, "extractive reduction done", None);

        match self.try_generative(&reduced) {
            Ok(summary) => {
                progress.report(1.0, "done", None);
                Ok(summary)
            }
            Err(reason) => {
                warn!(%reason, "hybrid generative step failed, falling back");
                let stage = StageProgress {
                    inner: progress,
                    base: 0.5,
                    span: 0.5,
                };
                let mut summary = self.extractive(text, language_hint, &stage, cancel)?;
                summary.fell_back = true;
                Ok(summary)
            }
        }
    }
}
