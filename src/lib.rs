//! Extractive summarization for novel-length Chinese, English, and mixed
//! documents.
//!
//! The core pipeline segments text into sentences, weighs them with TF-IDF,
//! builds a cosine-similarity graph, ranks sentences with damped power
//! iteration (TextRank), and assembles the top picks back in document order.
//! Inputs beyond the chunk threshold are scored inside overlapping windows
//! in parallel instead of one quadratic graph.
//!
//! # Modes
//!
//! [`Mode::Extractive`] is self-contained. [`Mode::Generative`] and
//! [`Mode::Hybrid`] delegate to a caller-supplied [`GenerativeBackend`];
//! any backend failure falls back to the extractive result transparently,
//! flagged on [`Summary::fell_back`].
//!
//! # Example
//!
//! ```
//! use novelrank::{Summarizer, SummarizeConfig};
//!
//! let config = SummarizeConfig {
//!     ratio: 0.3,
//!     ..Default::default()
//! };
//! let summarizer = Summarizer::new(config)?;
//! let summary = summarizer.summarize(
//!     "The storm broke at dawn. Boats fled to the harbor. \
//!      The pier was gone by noon. Nobody was hurt. \
//!      The town rebuilt it within a month.",
//! )?;
//! assert!(!summary.text.is_empty());
//! # Ok::<(), novelrank::SummarizeError>(())
//! ```

pub mod chunk;
pub mod error;
pub mod generative;
pub mod graph;
pub mod nlp;
pub mod pipeline;
pub mod rank;
pub mod segment;
pub mod select;
pub mod tfidf;
pub mod types;

pub use error::{GenerativeError, SummarizeError};
pub use generative::GenerativeBackend;
pub use pipeline::progress::{CancelToken, NoopProgress, ProgressFn, ProgressSink};
pub use pipeline::{ChapterSummary, Summarizer};
pub use segment::chapter::Chapter;
pub use segment::{split_sentences, Sentence};
pub use types::{Document, Language, Mode, Summary, SummarizeConfig};
