//! Chapter segmentation for novel-length documents.
//!
//! Detects heading lines such as `第十二章 雷动九天`, `第三节`, or
//! `Chapter 7 The Gathering Storm` and splits the document at those
//! boundaries. Content before the first heading becomes an untitled leading
//! chapter; a document with no headings is a single chapter. Chapters never
//! overlap and their concatenation reconstructs the document.

use once_cell::sync::Lazy;
use regex::Regex;

/// Heading patterns: CJK ordinal markers and English "Chapter N" lines.
static CHAPTER_HEADING: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?m)^[ \t]*(?:第[0-9零一二三四五六七八九十百千万亿]+[章节卷集部篇][^\r\n]*|(?i:chapter)[ \t]+\d+[^\r\n]*)$",
    )
    .expect("chapter heading pattern")
});

static CHINESE_ORDINAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"第([0-9零一二三四五六七八九十百千万亿]+)[章节卷集部篇]")
        .expect("chapter ordinal pattern")
});

/// A chapter of the document, read-only after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chapter {
    /// Positional index in document order.
    pub index: usize,
    /// Heading line, empty for the untitled leading chapter.
    pub title: String,
    /// Byte offset of the chapter start (includes the heading line).
    pub start: usize,
    /// Byte offset one past the chapter end.
    pub end: usize,
}

impl Chapter {
    /// Chapter text as a slice of the document it was created from.
    pub fn text<'a>(&self, document: &'a str) -> &'a str {
        &document[self.start..self.end]
    }

    /// Chapter text without the heading line.
    ///
    /// Empty for a bare heading with no body.
    pub fn body<'a>(&self, document: &'a str) -> &'a str {
        let text = self.text(document);
        if self.title.is_empty() {
            return text;
        }
        match text.find('\n') {
            Some(pos) => &text[pos + 1..],
            None => "",
        }
    }

    /// Chapter number parsed from the heading, if present.
    ///
    /// Handles both Arabic digits (`第12章`, `Chapter 12`) and Chinese
    /// numerals (`第十二章`).
    pub fn number(&self) -> Option<u64> {
        if let Some(caps) = CHINESE_ORDINAL.captures(&self.title) {
            let raw = &caps[1];
            if let Ok(n) = raw.parse::<u64>() {
                return Some(n);
            }
            return chinese_numeral(raw);
        }
        // "Chapter 12 ..." — take the first digit run.
        let digits: String = self
            .title
            .chars()
            .skip_while(|c| !c.is_ascii_digit())
            .take_while(|c| c.is_ascii_digit())
            .collect();
        digits.parse().ok()
    }
}

/// Convert a Chinese numeral like `十二` or `三百零五` to its value.
fn chinese_numeral(s: &str) -> Option<u64> {
    let mut result: u64 = 0;
    let mut pending: u64 = 0;
    let mut seen = false;

    for c in s.chars() {
        let digit = match c {
            '零' => Some(0),
            '一' => Some(1),
            '二' => Some(2),
            '三' => Some(3),
            '四' => Some(4),
            '五' => Some(5),
            '六' => Some(6),
            '七' => Some(7),
            '八' => Some(8),
            '九' => Some(9),
            _ => None,
        };
        if let Some(d) = digit {
            pending = d;
            seen = true;
            continue;
        }
        let unit: u64 = match c {
            '十' => 10,
            '百' => 100,
            '千' => 1_000,
            '万' => 10_000,
            '亿' => 100_000_000,
            _ => return None,
        };
        // A bare unit ("十" = 10) counts as one of that unit.
        let multiplier = if pending == 0 { 1 } else { pending };
        result += multiplier * unit;
        pending = 0;
        seen = true;
    }
    if !seen {
        return None;
    }
    Some(result + pending)
}

/// Split a document into chapters at heading boundaries.
///
/// Returns at least one chapter for non-empty input; the chapters partition
/// `document` exactly.
pub fn split_chapters(document: &str) -> Vec<Chapter> {
    let mut starts: Vec<(usize, String)> = CHAPTER_HEADING
        .find_iter(document)
        .map(|m| (m.start(), m.as_str().trim().to_string()))
        .collect();

    if starts.is_empty() {
        return vec![Chapter {
            index: 0,
            title: String::new(),
            start: 0,
            end: document.len(),
        }];
    }

    let mut chapters = Vec::with_capacity(starts.len() + 1);
    let first_start = starts[0].0;
    if first_start > 0 && !document[..first_start].trim().is_empty() {
        chapters.push(Chapter {
            index: 0,
            title: String::new(),
            start: 0,
            end: first_start,
        });
    } else if first_start > 0 {
        // Whitespace-only preamble is folded into the first real chapter.
        starts[0].0 = 0;
    }

    let bounds: Vec<usize> = starts
        .iter()
        .skip(1)
        .map(|(s, _)| *s)
        .chain(std::iter::once(document.len()))
        .collect();

    for ((start, title), end) in starts.into_iter().zip(bounds) {
        let index = chapters.len();
        chapters.push(Chapter {
            index,
            title,
            start,
            end,
        });
    }

    chapters
}
