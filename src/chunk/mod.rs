//! Windowed selection for very long documents.
//!
//! Above the chunk threshold, sentences are scored inside overlapping
//! fixed-size windows (in parallel) instead of building one quadratic
//! similarity graph over millions of sentences. Each window gets a slice
//! of the total sentence budget proportional to its length; window picks
//! are merged, deduplicated (overlap regions are scored twice) and
//! evenly subsampled if the merge overshoots the budget.

use std::sync::atomic::{AtomicUsize, Ordering};

use rayon::prelude::*;
use tracing::debug;

use crate::error::SummarizeError;
use crate::graph::SimilarityGraph;
use crate::pipeline::progress::{CancelToken, ProgressSink};
use crate::rank::TextRank;
use crate::select::select_top;
use crate::tfidf::TfIdf;

/// Overlapping window bounds over `n` sentences.
///
/// Windows step by `window_size - overlap`; the last window is shorter
/// rather than padded. `overlap < window_size` is enforced upstream by
/// config validation.
pub fn windows(n: usize, window_size: usize, overlap: usize) -> Vec<(usize, usize)> {
    if n == 0 {
        return Vec::new();
    }
    let step = window_size - overlap;
    let mut bounds = Vec::new();
    let mut start = 0;
    loop {
        let end = (start + window_size).min(n);
        bounds.push((start, end));
        // Once a window reaches the end, any further window would be fully
        // contained in it.
        if end == n {
            break;
        }
        start += step;
    }
    bounds
}

/// Score one window's token lists and return local indices of its picks.
fn select_in_window(
    token_lists: &[Vec<String>],
    budget: usize,
    ranker: &TextRank,
    cancel: &CancelToken,
) -> Result<Vec<usize>, SummarizeError> {
    let budget = budget.min(token_lists.len());
    let tfidf = TfIdf::weigh(token_lists);
    if tfidf.vocabulary_is_empty() {
        // Nothing to compare on; fall back to leading sentences.
        return Ok((0..budget).collect());
    }
    let graph = SimilarityGraph::from_vectors(&tfidf.vectors);
    let result = ranker.run(&graph, cancel)?;
    Ok(select_top(&result.scores, budget))
}

/// Run windowed selection over all sentences.
///
/// Returns global sentence indices in ascending order, at most
/// `total_target` of them.
pub fn chunked_select(
    token_lists: &[Vec<String>],
    total_target: usize,
    window_size: usize,
    overlap: usize,
    ranker: &TextRank,
    cancel: &CancelToken,
    progress: &dyn ProgressSink,
) -> Result<Vec<usize>, SummarizeError> {
    let n = token_lists.len();
    let bounds = windows(n, window_size, overlap);
    let num_windows = bounds.len();
    debug!(sentences = n, windows = num_windows, "chunked selection");

    let completed = AtomicUsize::new(0);
    let per_window: Vec<Vec<usize>> = bounds
        .par_iter()
        .map(|&(start, end)| {
            if cancel.is_cancelled() {
                return Err(SummarizeError::Cancelled);
            }
            let len = end - start;
            let budget =
                ((total_target as f64 * len as f64 / n as f64).round() as usize).max(1);
            let local = select_in_window(&token_lists[start..end], budget, ranker, cancel)?;

            let done = completed.fetch_add(1, Ordering::Relaxed) + 1;
            let fraction = done as f64 / num_windows as f64;
            progress.report(
                fraction,
                &format!("chunk {done} of {num_windows}"),
                Some(fraction),
            );
            Ok(local.into_iter().map(|i| i + start).collect())
        })
        .collect::<Result<_, _>>()?;

    let mut merged: Vec<usize> = per_window.into_iter().flatten().collect();
    merged.sort_unstable();
    merged.dedup();

    if merged.len() > total_target {
        merged = subsample_even(&merged, total_target);
    }
    Ok(merged)
}

/// Keep `budget` entries spread evenly across `indices`.
pub fn subsample_even(indices: &[usize], budget: usize) -> Vec<usize> {
    if indices.len() <= budget {
        return indices.to_vec();
    }
    let step = indices.len() as f64 / budget as f64;
    let mut kept: Vec<usize> = (0..budget)
        .map(|i| indices[(i as f64 * step) as usize])
        .collect();
    kept.dedup();
    kept
}
