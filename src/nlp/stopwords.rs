//! Stopword filtering.
//!
//! English (and other space-delimited) stopwords come from the `stop-words`
//! crate; Chinese and Japanese use built-in lists since the crate carries no
//! standard set for them. The Chinese list covers both single characters
//! (for the character-level tokenizer fallback) and common multi-character
//! function words (for jieba output).

use rustc_hash::FxHashSet;
use stop_words::{get, LANGUAGE};

use crate::types::Language;

/// A filter for removing stopwords before term weighting.
#[derive(Debug, Clone)]
pub struct StopwordFilter {
    stopwords: FxHashSet<String>,
}

impl Default for StopwordFilter {
    fn default() -> Self {
        Self::for_language(Language::English)
    }
}

impl StopwordFilter {
    /// Create a filter for the given dominant language.
    ///
    /// `Other` falls back to the English list; CJK sentences inside such a
    /// scope are still filtered through [`StopwordFilter::chinese`] by the
    /// tokenizer.
    pub fn for_language(language: Language) -> Self {
        match language {
            Language::Chinese => Self::chinese(),
            Language::English | Language::Other => Self {
                stopwords: get(LANGUAGE::English)
                    .iter()
                    .map(|s| s.to_string())
                    .collect(),
            },
        }
    }

    /// The built-in Chinese stopword list.
    pub fn chinese() -> Self {
        Self {
            stopwords: CHINESE_STOPWORDS.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// The built-in Japanese stopword list.
    pub fn japanese() -> Self {
        Self {
            stopwords: JAPANESE_STOPWORDS.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// An empty filter (no filtering).
    pub fn empty() -> Self {
        Self {
            stopwords: FxHashSet::default(),
        }
    }

    /// Create a filter from a custom list.
    pub fn from_list(words: &[&str]) -> Self {
        Self {
            stopwords: words.iter().map(|w| w.to_lowercase()).collect(),
        }
    }

    /// Add additional stopwords to the filter.
    pub fn add_stopwords(&mut self, words: &[&str]) {
        for word in words {
            self.stopwords.insert(word.to_lowercase());
        }
    }

    /// Check whether a token is a stopword (case-insensitive).
    pub fn is_stopword(&self, word: &str) -> bool {
        if self.stopwords.contains(word) {
            return true;
        }
        word.chars().any(|c| c.is_uppercase()) && self.stopwords.contains(&word.to_lowercase())
    }

    /// Number of stopwords in the filter.
    pub fn len(&self) -> usize {
        self.stopwords.len()
    }

    /// Whether the filter is empty.
    pub fn is_empty(&self) -> bool {
        self.stopwords.is_empty()
    }
}

/// Common Chinese stopwords: single characters plus frequent function words.
const CHINESE_STOPWORDS: &[&str] = &[
    "的", "了", "在", "是", "我", "有", "和", "就", "不", "人", "都", "一", "上", "也", "很",
    "到", "说", "要", "去", "你", "会", "着", "看", "好", "这", "来", "他", "才", "么", "但",
    "下", "她", "里", "最", "些", "还", "可", "能", "被", "那", "为", "却", "吗", "让", "更",
    "两", "中", "做", "它", "呢", "再", "想", "对", "已", "把", "则", "从", "应", "向", "地",
    "给", "起", "真", "与", "或", "及", "等", "以", "将", "于", "只", "又", "个", "们",
    "一个", "没有", "什么", "自己", "这个", "那个", "时候", "我们", "他们", "可以", "知道",
    "所以", "因为", "因此", "为了", "可是", "但是", "然而", "而且", "并且", "不过", "如果",
    "的话", "就是", "是否", "这样", "那样", "如此", "一些", "一样", "一起", "很多", "不要",
];

/// Common Japanese stopwords (particles and light verbs).
const JAPANESE_STOPWORDS: &[&str] = &[
    "の", "に", "は", "を", "た", "が", "で", "て", "と", "し", "れ", "さ", "ある", "いる",
    "も", "する", "から", "な", "こと", "として", "い", "や", "など", "ない", "この", "ため",
    "その", "よう", "また", "もの", "という", "まで", "なる", "へ", "か", "だ", "これ",
];
