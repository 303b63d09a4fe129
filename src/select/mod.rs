//! Sentence selection and summary assembly.
//!
//! Selection is by score with earlier-index tie-breaking; the chosen
//! sentences are then re-sorted into document order so the summary reads
//! in the same sequence as the source.

use crate::segment::Sentence;
use crate::types::Language;

/// Appended when a summary is cut to fit a character budget.
pub const TRUNCATION_MARKER: &str = "...";

/// Number of sentences to keep for `n` input sentences at `ratio`.
///
/// Rounds half-up and floors at 3, but never exceeds `n`.
pub fn target_count(n: usize, ratio: f64) -> usize {
    let rounded = (n as f64 * ratio + 0.5).floor() as usize;
    rounded.max(3).min(n)
}

/// Pick the `num` highest-scored sentence indices, returned in ascending
/// document order. Ties go to the earlier sentence.
pub fn select_top(scores: &[f64], num: usize) -> Vec<usize> {
    let mut ranked: Vec<usize> = (0..scores.len()).collect();
    ranked.sort_by(|&a, &b| {
        scores[b]
            .partial_cmp(&scores[a])
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.cmp(&b))
    });
    ranked.truncate(num);
    ranked.sort_unstable();
    ranked
}

/// Join the selected sentences into summary text.
///
/// Chinese text is joined without separators (CJK carries its own
/// terminal punctuation); everything else gets a single space.
pub fn assemble(sentences: &[Sentence], indices: &[usize], language: Language) -> String {
    let separator = match language {
        Language::Chinese => "",
        Language::English | Language::Other => " ",
    };
    indices
        .iter()
        .map(|&i| sentences[i].trimmed())
        .collect::<Vec<_>>()
        .join(separator)
}

/// Cut `text` to at most `max_length` characters, appending the
/// truncation marker. Returns whether truncation happened.
pub fn enforce_budget(text: &mut String, max_length: Option<usize>) -> bool {
    let Some(budget) = max_length else {
        return false;
    };
    let count = text.chars().count();
    if count <= budget {
        return false;
    }
    let keep = budget.saturating_sub(TRUNCATION_MARKER.chars().count());
    let cut: String = text.chars().take(keep).collect();
    *text = cut + TRUNCATION_MARKER;
    true
}
