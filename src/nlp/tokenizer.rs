//! Language-aware tokenization.
//!
//! Space-delimited scripts are lowercased and split on non-alphanumeric
//! boundaries; CJK sentences are segmented with jieba when the `jieba`
//! feature is enabled and fall back to character-level tokens otherwise.
//! Either way the token lists stay internally consistent for scoring — a
//! sentence can legitimately tokenize to nothing (all stop-words), which
//! downstream stages treat as an all-zero vector, never as an error.

use crate::nlp::stopwords::StopwordFilter;
use crate::types::Language;

#[cfg(feature = "jieba")]
use jieba_rs::Jieba;
#[cfg(feature = "jieba")]
use once_cell::sync::Lazy;

/// Shared jieba dictionary. Immutable after initialization, so concurrent
/// invocations of the engine can share it freely.
#[cfg(feature = "jieba")]
static JIEBA: Lazy<Jieba> = Lazy::new(Jieba::new);

/// Detect the dominant language of a scope.
///
/// CJK ideographs above 30% of the non-whitespace-trimmed length mean
/// Chinese; ASCII letters above 50% mean English; anything else is `Other`
/// and gets decided per sentence during tokenization.
pub fn detect_language(text: &str) -> Language {
    let total = text.trim().chars().count().max(1);
    let mut cjk = 0usize;
    let mut ascii_alpha = 0usize;
    for c in text.chars() {
        if is_cjk_ideograph(c) {
            cjk += 1;
        } else if c.is_ascii_alphabetic() {
            ascii_alpha += 1;
        }
    }

    if cjk as f64 / total as f64 > 0.3 {
        Language::Chinese
    } else if ascii_alpha as f64 / total as f64 > 0.5 {
        Language::English
    } else {
        Language::Other
    }
}

fn is_cjk_ideograph(c: char) -> bool {
    matches!(c, '\u{4e00}'..='\u{9fff}')
}

/// Ideographs plus kana, for the per-sentence script check.
fn is_cjk_char(c: char) -> bool {
    is_cjk_ideograph(c) || matches!(c, '\u{3040}'..='\u{30ff}')
}

/// Whether a sentence is predominantly CJK (more than half its characters).
pub fn is_cjk_sentence(sentence: &str) -> bool {
    let total = sentence.trim().chars().count().max(1);
    let cjk = sentence.chars().filter(|&c| is_cjk_char(c)).count();
    cjk as f64 / total as f64 > 0.5
}

/// Language-aware tokenizer with stopword removal.
///
/// Holds both a Latin and a CJK stopword filter because mixed-language
/// novels interleave scripts at sentence granularity.
#[derive(Debug, Clone)]
pub struct Tokenizer {
    latin_stopwords: StopwordFilter,
    cjk_stopwords: StopwordFilter,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new(Language::Other)
    }
}

impl Tokenizer {
    /// Create a tokenizer for a scope with the given dominant language.
    pub fn new(language: Language) -> Self {
        let latin = match language {
            Language::Chinese => StopwordFilter::for_language(Language::English),
            other => StopwordFilter::for_language(other),
        };
        Self {
            latin_stopwords: latin,
            cjk_stopwords: StopwordFilter::chinese(),
        }
    }

    /// Replace the Latin stopword list (e.g. with a caller-provided set).
    pub fn with_latin_stopwords(mut self, filter: StopwordFilter) -> Self {
        self.latin_stopwords = filter;
        self
    }

    /// Replace the CJK stopword list.
    pub fn with_cjk_stopwords(mut self, filter: StopwordFilter) -> Self {
        self.cjk_stopwords = filter;
        self
    }

    /// Tokenize one sentence into scoring terms.
    pub fn tokenize(&self, sentence: &str) -> Vec<String> {
        let sentence = sentence.trim();
        if sentence.is_empty() {
            return Vec::new();
        }
        if is_cjk_sentence(sentence) {
            self.tokenize_cjk(sentence)
        } else {
            self.tokenize_latin(sentence)
        }
    }

    #[cfg(feature = "jieba")]
    fn tokenize_cjk(&self, sentence: &str) -> Vec<String> {
        JIEBA
            .cut(sentence, false)
            .into_iter()
            .filter(|w| w.chars().any(|c| c.is_alphanumeric() || is_cjk_char(c)))
            .filter(|w| !self.cjk_stopwords.is_stopword(w))
            .map(|w| w.to_string())
            .collect()
    }

    /// Character-level fallback when no word segmenter is available.
    #[cfg(not(feature = "jieba"))]
    fn tokenize_cjk(&self, sentence: &str) -> Vec<String> {
        sentence
            .chars()
            .filter(|&c| c.is_alphanumeric() || is_cjk_char(c))
            .map(|c| c.to_string())
            .filter(|w| !self.cjk_stopwords.is_stopword(w))
            .collect()
    }

    fn tokenize_latin(&self, sentence: &str) -> Vec<String> {
        sentence
            .to_lowercase()
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty() && w.chars().all(|c| c.is_alphabetic()))
            .filter(|w| !self.latin_stopwords.is_stopword(w))
            .map(|w| w.to_string())
            .collect()
    }
}
