//! Sentence segmentation.
//!
//! Splits a text scope into contiguous, non-overlapping spans on
//! sentence-final punctuation. Spans cover the scope completely, so
//! concatenating all sentence texts reconstructs the scope exactly; trimming
//! for display and scoring happens downstream.

/// A sentence span within its scope.
///
/// Invariant: sentences are ordered by `start`, spans are contiguous, and
/// `text` is the verbatim `scope[start..end]` slice (byte offsets).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sentence {
    /// Ordinal index within the scope, stable and monotonically increasing.
    pub index: usize,
    /// Byte offset of the span start.
    pub start: usize,
    /// Byte offset one past the span end.
    pub end: usize,
    /// Verbatim span text, including terminal punctuation and surrounding
    /// whitespace.
    pub text: String,
}

impl Sentence {
    /// The span text with surrounding whitespace removed, as used for
    /// tokenization and summary assembly.
    pub fn trimmed(&self) -> &str {
        self.text.trim()
    }
}

/// Sentence-final punctuation for both CJK and Latin scripts.
///
/// The union is applied regardless of detected script; mixed-language novels
/// routinely carry both sets.
fn is_terminal(c: char) -> bool {
    matches!(c, '。' | '！' | '？' | '…' | '.' | '!' | '?')
}

/// Split a scope into ordered sentence spans.
///
/// A run of consecutive terminal characters is treated as a single boundary.
/// A scope with no terminal punctuation yields exactly one sentence; a
/// non-empty trailing fragment after the last boundary becomes a final
/// sentence. Whitespace-only spans are folded into a neighboring sentence so
/// that every returned sentence has non-empty trimmed text. Deterministic:
/// identical input always yields identical spans.
pub fn split_sentences(scope: &str) -> Vec<Sentence> {
    let mut raw: Vec<(usize, usize)> = Vec::new();
    let mut start = 0usize;
    let mut in_terminal = false;

    for (i, c) in scope.char_indices() {
        if is_terminal(c) {
            in_terminal = true;
        } else if in_terminal {
            raw.push((start, i));
            start = i;
            in_terminal = false;
        }
    }
    if start < scope.len() {
        raw.push((start, scope.len()));
    }

    // Fold whitespace-only spans into the previous sentence (or into the
    // following one when they lead the scope) to keep spans contiguous.
    let mut spans: Vec<(usize, usize)> = Vec::with_capacity(raw.len());
    let mut carry: Option<usize> = None;
    for (s, e) in raw {
        let s = carry.take().unwrap_or(s);
        if scope[s..e].trim().is_empty() {
            match spans.last_mut() {
                Some(last) => last.1 = e,
                None => carry = Some(s),
            }
        } else {
            spans.push((s, e));
        }
    }

    spans
        .into_iter()
        .enumerate()
        .map(|(index, (start, end))| Sentence {
            index,
            start,
            end,
            text: scope[start..end].to_string(),
        })
        .collect()
}
