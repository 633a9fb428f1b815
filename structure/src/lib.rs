//! Section recovery for flat extracted text.
//!
//! Text pulled out of a PDF or an OCR engine arrives as a stream of lines
//! with no markup. This crate rebuilds a `(heading, body)` outline from it:
//!
//! 1. [`sanitize`] normalizes line endings and whitespace.
//! 2. [`LineStream`] classifies each line as blank, page marker, heading
//!    candidate, bullet item or plain text.
//! 3. [`SectionAssembler`] groups the classified lines into [`Section`]s.
//!
//! ```rust
//! use folio_structure::{Section, normalize};
//!
//! let sections = normalize("BIOLOGY UNIT\nLESSON PLAN\n\nTopics\nDNA\n");
//! assert_eq!(
//!     sections,
//!     vec![
//!         Section::new("Biology Unit", "LESSON PLAN"),
//!         Section::new("Topics", "DNA"),
//!     ]
//! );
//! ```
//!
//! Every function here is total: any input maps to some (possibly empty)
//! section list.

mod assemble;
mod classify;
mod config;
mod heading;
mod sanitize;
mod types;

pub use assemble::SectionAssembler;
pub use classify::{
    ClassifiedLine, LineKind, LineStream, bullet_remainder, classify_line, ends_like_sentence,
    is_heading_candidate, is_list_item, is_numbered_item, is_page_marker, is_shouted,
    is_title_like_phrase, is_title_like_word, uppercase_ratio,
};
pub use config::{
    HEADING_UPPERCASE_RATIO, HeuristicConfig, HeuristicConfigBuilder, MAX_HEADING_CHARS,
    SENTENCE_HEADING_UPPERCASE_RATIO, SENTINEL_HEADING, TITLE_CAPITALIZED_WORD_RATIO,
    TITLE_MIN_CAPITALIZED_WORDS,
};
pub use heading::normalize_heading;
pub use sanitize::sanitize;
pub use types::{Section, SectionSequence};

/// Splits text into sections using the reference thresholds.
#[must_use]
pub fn normalize(text: &str) -> SectionSequence {
    Normalizer::default().normalize(text)
}

/// Sanitize, classify and assemble with a fixed [`HeuristicConfig`].
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    config: HeuristicConfig,
}

impl Normalizer {
    /// Creates a normalizer with custom thresholds.
    #[must_use]
    pub const fn new(config: HeuristicConfig) -> Self {
        Self { config }
    }

    /// Returns the active configuration.
    #[must_use]
    pub const fn config(&self) -> &HeuristicConfig {
        &self.config
    }

    /// Splits text into sections.
    #[must_use]
    pub fn normalize(&self, text: &str) -> SectionSequence {
        let sanitized = sanitize(text);
        if sanitized.is_empty() {
            return SectionSequence::new();
        }
        let mut assembler = SectionAssembler::new(&self.config);
        for line in LineStream::new(&sanitized, &self.config) {
            assembler.push(line);
        }
        assembler.finish()
    }

    /// Classifies the sanitized lines of `text` without assembling them.
    #[must_use]
    pub fn classify(&self, text: &str) -> Vec<ClassifiedLine> {
        let sanitized = sanitize(text);
        LineStream::new(&sanitized, &self.config).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn biology_unit_outline() {
        let sections = normalize("BIOLOGY UNIT\nLESSON PLAN\n\nTopics\nDNA\n");
        assert_eq!(
            sections,
            vec![
                Section::new("Biology Unit", "LESSON PLAN"),
                Section::new("Topics", "DNA"),
            ]
        );
    }

    #[test]
    fn page_markers_only_yield_nothing() {
        assert!(normalize("-- 1 of 2 --\n\n-- 2 of 2 --").is_empty());
    }

    #[test]
    fn empty_input_yields_nothing() {
        assert!(normalize("").is_empty());
        assert!(normalize(" \r\n\t ").is_empty());
    }

    #[test]
    fn page_markers_never_leak() {
        let text = "Cells\nA cell is small.\n-- 3 of 10 --\nIt divides.\n\n-- 4 of 10 --\nTissues\nGroups of cells.";
        let sections = normalize(text);
        assert_eq!(
            sections,
            vec![
                Section::new("Cells", "A cell is small.\nIt divides."),
                Section::new("Tissues", "Groups of cells."),
            ]
        );
        for section in &sections {
            assert!(!section.heading.contains("of 10"));
            assert!(!section.body.contains("of 10"));
        }
    }

    #[test]
    fn numbered_items_become_dashes() {
        let sections = normalize("steps to follow\n1. Foo\n2) Bar");
        assert_eq!(
            sections,
            vec![Section::new("Document", "steps to follow\n- Foo\n- Bar")]
        );
    }

    #[test]
    fn text_without_headings_is_one_document_section() {
        let text = "the quick brown fox\njumps over\n\nthe lazy dog\n\u{2022} one bullet";
        let sections = normalize(text);
        assert_eq!(
            sections,
            vec![Section::new(
                "Document",
                "the quick brown fox\njumps over\n\nthe lazy dog\n- one bullet"
            )]
        );
    }

    #[test]
    fn normalize_is_deterministic() {
        let text = "UNIT ONE\nintro\n\n- a\n- b\n\nReview:\nquestions";
        assert_eq!(normalize(text), normalize(text));
    }

    #[test]
    fn bodies_are_never_blank() {
        let inputs = [
            "A\n\nB\n\nC",
            "\u{2022}\n\n-\n",
            "HEADING\n\n\n\nANOTHER",
            "x\n-- 1 of 1 --",
        ];
        for input in inputs {
            for section in normalize(input) {
                assert!(!section.body.trim().is_empty(), "blank body for {input:?}");
            }
        }
    }

    #[test]
    fn custom_sentinel_heading() {
        let config = HeuristicConfig::builder().sentinel_heading("Notes").build();
        let sections = Normalizer::new(config).normalize("just some words");
        assert_eq!(sections, vec![Section::new("Notes", "just some words")]);
    }

    #[test]
    fn classify_sanitizes_before_classifying() {
        let lines = Normalizer::default()
            .classify("Intro\r\n\u{2022}\r\n-- 1 of 2 --\r\n\r\nSUMMARY\r\nDone here\r\n");
        let kinds: Vec<(LineKind, Option<&str>)> = lines
            .iter()
            .map(|line| (line.kind, line.value.as_deref()))
            .collect();
        assert_eq!(
            kinds,
            vec![
                (LineKind::HeadingCandidate, None),
                (LineKind::BulletItem, Some("")),
                (LineKind::PageMarker, None),
                (LineKind::Blank, None),
                (LineKind::HeadingCandidate, None),
                (LineKind::PlainText, Some("Done here")),
            ]
        );
        assert!(lines.iter().all(|line| !line.line.contains('\r')));
        assert_eq!(lines[4].line, "SUMMARY");
    }

    #[test]
    fn sections_serialize_as_plain_objects() {
        let json = serde_json::to_string(&Section::new("Topics", "DNA")).unwrap();
        assert_eq!(json, r#"{"heading":"Topics","body":"DNA"}"#);
    }
}
