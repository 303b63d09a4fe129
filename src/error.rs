//! Error taxonomy.
//!
//! Degenerate text (empty vocabulary, zero-similarity rows, single-sentence
//! scopes) is never an error; those cases are handled by explicit fallbacks in
//! the weighting and selection stages. Only truly invalid invocations and
//! cooperative cancellation surface as [`SummarizeError`].

use thiserror::Error;

/// Caller-facing errors raised at the orchestrator boundary.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SummarizeError {
    /// The input text is empty or whitespace-only.
    #[error("input text is empty")]
    EmptyInput,
    /// The configuration was rejected before any computation started.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// The cancellation token was triggered; no partial summary is returned.
    #[error("summarization cancelled")]
    Cancelled,
}

/// Failure modes of the generative collaborator.
///
/// These are caught at the orchestrator boundary and converted into an
/// automatic extractive fallback; they reach the caller only when the
/// extractive path cannot produce output either.
#[derive(Debug, Error)]
pub enum GenerativeError {
    /// No backend is configured or the backend cannot be reached.
    #[error("generative backend unavailable")]
    Unavailable,
    /// The backend did not respond within its deadline.
    #[error("generative request timed out")]
    Timeout,
    /// The backend returned an empty result.
    #[error("generative backend returned an empty result")]
    Empty,
    /// Any other backend-reported failure.
    #[error("generative backend error: {0}")]
    Other(String),
}
