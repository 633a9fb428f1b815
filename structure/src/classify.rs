//! Per-line classification.
//!
//! Every rule is a standalone predicate so edge cases can be checked in
//! isolation; [`classify_line`] combines them in priority order and
//! [`LineStream`] threads the "previous line was blank" flag through a whole
//! text.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::config::HeuristicConfig;

static PAGE_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^--\s*\d+\s+of\s+\d+\s*--$").expect("page marker pattern is valid")
});

static NUMBERED_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+[.)]\s+").expect("numbered item pattern is valid"));

/// Glyphs accepted as bullet prefixes.
const BULLET_GLYPHS: &[char] = &[
    '-', '*', '+', '\u{2010}', '\u{2011}', '\u{2012}', '\u{2013}', '\u{2014}', '\u{2015}',
    '\u{2022}', '\u{2023}', '\u{2043}', '\u{2219}', '\u{00B7}', '\u{25CF}', '\u{25CB}',
    '\u{25E6}', '\u{25AA}', '\u{25AB}', '\u{25A0}', '\u{25A1}', '\u{25B6}', '\u{25BA}',
    '\u{25C6}', '\u{25C7}', '\u{2192}', '\u{21D2}', '\u{27A2}', '\u{27A4}', '\u{2713}',
    '\u{2714}', '\u{F0B7}',
];

/// Extra characters allowed in a single-word title.
const WORD_TITLE_PUNCTUATION: &[char] = &['-', '(', ')', '/', ':', '%'];

/// Extra characters allowed in a multi-word title.
const PHRASE_TITLE_PUNCTUATION: &[char] = &[',', '\'', '&', '-', '(', ')', '/', ':', '%'];

/// Structural role of a physical line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineKind {
    /// Empty after trimming.
    Blank,
    /// Page footer such as `-- 3 of 10 --`; dropped from output.
    PageMarker,
    /// Line eligible to start a new section.
    HeadingCandidate,
    /// Bullet or numbered list entry.
    BulletItem,
    /// Any other content line.
    PlainText,
}

/// One physical line together with its classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedLine {
    /// The trimmed source line.
    pub line: String,
    /// Assigned role.
    pub kind: LineKind,
    /// Body text for [`LineKind::BulletItem`] and [`LineKind::PlainText`].
    ///
    /// Bullets are rewritten to `- <rest>`; an empty value means the line
    /// carried nothing but a bullet glyph.
    pub value: Option<String>,
}

impl ClassifiedLine {
    /// Whether this line leaves the stream in a "previous line was blank"
    /// state for the next heading decision.
    #[must_use]
    pub fn separates(&self) -> bool {
        match self.kind {
            LineKind::Blank | LineKind::PageMarker => true,
            LineKind::HeadingCandidate => false,
            LineKind::BulletItem | LineKind::PlainText => {
                self.value.as_deref().is_none_or(str::is_empty)
            }
        }
    }
}

/// Returns true for page footers of the form `-- <n> of <m> --`.
#[must_use]
pub fn is_page_marker(line: &str) -> bool {
    PAGE_MARKER.is_match(line.trim())
}

/// Returns true when the line starts with a numbered-list prefix (`1.`, `2)`).
#[must_use]
pub fn is_numbered_item(line: &str) -> bool {
    NUMBERED_ITEM.is_match(line)
}

/// Returns true when the line starts with a bullet glyph or a numbered prefix.
#[must_use]
pub fn is_list_item(line: &str) -> bool {
    line.starts_with(BULLET_GLYPHS) || is_numbered_item(line)
}

/// Strips a bullet glyph run or numbered prefix, returning the remainder.
///
/// Returns `None` when the line is not a list item.
#[must_use]
pub fn bullet_remainder(line: &str) -> Option<&str> {
    if let Some(found) = NUMBERED_ITEM.find(line) {
        return Some(line[found.end()..].trim());
    }
    if line.starts_with(BULLET_GLYPHS) {
        return Some(line.trim_start_matches(BULLET_GLYPHS).trim());
    }
    None
}

/// Uppercase letters divided by all letters, ignoring non-letters.
///
/// Lines without letters score zero.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn uppercase_ratio(line: &str) -> f32 {
    let mut letters = 0usize;
    let mut upper = 0usize;
    for c in line.chars().filter(|c| c.is_alphabetic()) {
        letters += 1;
        if c.is_uppercase() {
            upper += 1;
        }
    }
    if letters == 0 {
        0.0
    } else {
        upper as f32 / letters as f32
    }
}

/// Returns true when the line ends with `.`, `?` or `!`.
#[must_use]
pub fn ends_like_sentence(line: &str) -> bool {
    line.ends_with(['.', '?', '!'])
}

/// Mostly-uppercase test, stricter for sentence-like lines.
#[must_use]
pub fn is_shouted(line: &str, config: &HeuristicConfig) -> bool {
    let threshold = if ends_like_sentence(line) {
        config.sentence_uppercase_ratio
    } else {
        config.uppercase_ratio
    };
    uppercase_ratio(line) >= threshold
}

/// A single capitalized word such as `Topics` or `Appendix-A`.
#[must_use]
pub fn is_title_like_word(line: &str) -> bool {
    let mut words = line.split_whitespace();
    let (Some(word), None) = (words.next(), words.next()) else {
        return false;
    };
    word.chars().next().is_some_and(char::is_uppercase)
        && word
            .chars()
            .all(|c| c.is_alphanumeric() || WORD_TITLE_PUNCTUATION.contains(&c))
}

/// A multi-word title in which enough words start with a capital or digit.
#[must_use]
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn is_title_like_phrase(line: &str, config: &HeuristicConfig) -> bool {
    let words: Vec<&str> = line.split_whitespace().collect();
    if words.len() < 2 {
        return false;
    }
    let allowed = line
        .chars()
        .all(|c| c.is_alphanumeric() || c == ' ' || PHRASE_TITLE_PUNCTUATION.contains(&c));
    if !allowed {
        return false;
    }
    let capitalized = words
        .iter()
        .filter(|word| {
            word.chars()
                .next()
                .is_some_and(|c| c.is_uppercase() || c.is_ascii_digit())
        })
        .count();
    // The epsilon keeps f32 noise (0.6 * 5 = 3.0000001) from rounding up.
    let scaled = f64::from(config.title_word_ratio) * words.len() as f64;
    let required = ((scaled - 1e-4).ceil().max(0.0) as usize).max(config.title_min_words);
    capitalized >= required
}

/// Returns true when a line that follows a blank line should open a section.
#[must_use]
pub fn is_heading_candidate(line: &str, config: &HeuristicConfig) -> bool {
    if line.is_empty() || line.chars().count() > config.max_heading_chars || is_list_item(line) {
        return false;
    }
    is_shouted(line, config)
        || is_title_like_word(line)
        || is_title_like_phrase(line, config)
        || line.ends_with(':')
}

/// Classifies one line given whether the previous line was blank.
#[must_use]
pub fn classify_line(line: &str, prev_blank: bool, config: &HeuristicConfig) -> ClassifiedLine {
    let line = line.trim();
    let (kind, value) = if line.is_empty() {
        (LineKind::Blank, None)
    } else if is_page_marker(line) {
        (LineKind::PageMarker, None)
    } else if prev_blank && is_heading_candidate(line, config) {
        (LineKind::HeadingCandidate, None)
    } else if let Some(rest) = bullet_remainder(line) {
        let value = if rest.is_empty() {
            String::new()
        } else {
            format!("- {rest}")
        };
        (LineKind::BulletItem, Some(value))
    } else {
        (LineKind::PlainText, Some(line.to_string()))
    };

    ClassifiedLine {
        line: line.to_string(),
        kind,
        value,
    }
}

/// Iterator classifying the lines of a sanitized text in order.
///
/// The start of the text counts as a blank line, so a heading on the very
/// first line is recognized.
#[derive(Debug)]
pub struct LineStream<'a> {
    lines: std::str::Split<'a, char>,
    prev_blank: bool,
    config: &'a HeuristicConfig,
}

impl<'a> LineStream<'a> {
    /// Creates a stream over `text`.
    #[must_use]
    pub fn new(text: &'a str, config: &'a HeuristicConfig) -> Self {
        Self {
            lines: text.split('\n'),
            prev_blank: true,
            config,
        }
    }
}

impl Iterator for LineStream<'_> {
    type Item = ClassifiedLine;

    fn next(&mut self) -> Option<Self::Item> {
        let line = self.lines.next()?;
        let classified = classify_line(line, self.prev_blank, self.config);
        self.prev_blank = classified.separates();
        Some(classified)
    }
}
