//! Section assembly from a classified line stream.

use tracing::debug;

use crate::classify::{ClassifiedLine, LineKind};
use crate::config::HeuristicConfig;
use crate::heading::normalize_heading;
use crate::sanitize::{collapse_blank_lines, trim_trailing_whitespace_per_line};
use crate::types::Section;

#[derive(Debug)]
struct OpenSection {
    heading: String,
    lines: Vec<String>,
    has_content: bool,
}

impl OpenSection {
    const fn new(heading: String) -> Self {
        Self {
            heading,
            lines: Vec::new(),
            has_content: false,
        }
    }
}

/// Groups classified lines into sections in a single forward pass.
///
/// Headings without any following content are dropped. If nothing could be
/// emitted although the text had real lines, one section under the sentinel
/// heading carries all of them.
#[derive(Debug)]
pub struct SectionAssembler<'a> {
    config: &'a HeuristicConfig,
    current: Option<OpenSection>,
    sections: Vec<Section>,
    saw_meaningful: bool,
    // Every non-marker line, kept for the single-section fallback.
    fallback_lines: Vec<String>,
}

impl<'a> SectionAssembler<'a> {
    /// Creates an empty assembler.
    #[must_use]
    pub const fn new(config: &'a HeuristicConfig) -> Self {
        Self {
            config,
            current: None,
            sections: Vec::new(),
            saw_meaningful: false,
            fallback_lines: Vec::new(),
        }
    }

    /// Feeds the next line.
    pub fn push(&mut self, line: ClassifiedLine) {
        if line.kind != LineKind::PageMarker {
            self.fallback_lines.push(line.line.clone());
        }

        match line.kind {
            LineKind::PageMarker => {}
            LineKind::Blank => self.push_blank(),
            LineKind::HeadingCandidate => {
                self.saw_meaningful = true;
                self.close_current();
                self.current = Some(OpenSection::new(normalize_heading(&line.line)));
            }
            LineKind::BulletItem | LineKind::PlainText => {
                self.saw_meaningful = true;
                match line.value {
                    Some(value) if !value.is_empty() => self.push_content(value),
                    _ => self.push_blank(),
                }
            }
        }
    }

    /// Closes the stream and returns the sections in document order.
    #[must_use]
    pub fn finish(mut self) -> Vec<Section> {
        self.close_current();

        if self.sections.is_empty() && self.saw_meaningful {
            let body = finalize_body(&self.fallback_lines);
            if !body.is_empty() {
                debug!("no section had content; wrapping text in sentinel section");
                self.sections
                    .push(Section::new(self.config.sentinel_heading.clone(), body));
            }
        }

        debug!(sections = self.sections.len(), "assembled sections");
        self.sections
    }

    fn push_blank(&mut self) {
        if let Some(open) = self.current.as_mut()
            && open.has_content
        {
            open.lines.push(String::new());
        }
    }

    fn push_content(&mut self, value: String) {
        let open = self
            .current
            .get_or_insert_with(|| OpenSection::new(self.config.sentinel_heading.clone()));
        open.lines.push(value);
        open.has_content = true;
    }

    fn close_current(&mut self) {
        let Some(open) = self.current.take() else {
            return;
        };
        if !open.has_content {
            debug!(heading = %open.heading, "dropping heading without content");
            return;
        }
        let body = finalize_body(&open.lines);
        if !body.is_empty() {
            self.sections.push(Section::new(open.heading, body));
        }
    }
}

/// Joins body lines, strips trailing whitespace, caps blank runs at one
/// empty line and trims the result.
fn finalize_body(lines: &[String]) -> String {
    let joined = lines.join("\n");
    let trimmed = trim_trailing_whitespace_per_line(&joined);
    collapse_blank_lines(&trimmed).trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::LineStream;

    fn assemble(text: &str) -> Vec<Section> {
        let config = HeuristicConfig::default();
        let mut assembler = SectionAssembler::new(&config);
        for line in LineStream::new(text, &config) {
            assembler.push(line);
        }
        assembler.finish()
    }

    #[test]
    fn content_before_first_heading_goes_to_sentinel() {
        let sections = assemble("intro text\n\nTopics\nDNA");
        assert_eq!(
            sections,
            vec![
                Section::new("Document", "intro text"),
                Section::new("Topics", "DNA"),
            ]
        );
    }

    #[test]
    fn empty_headings_are_dropped() {
        let sections = assemble("Overview\n\nDetails\nsome body");
        assert_eq!(sections, vec![Section::new("Details", "some body")]);
    }

    #[test]
    fn blank_lines_inside_body_are_preserved_once() {
        let sections = assemble("Notes\nfirst\n\nsecond");
        // `second` follows a blank line but is lowercase, so it stays in the body.
        assert_eq!(sections, vec![Section::new("Notes", "first\n\nsecond")]);
    }

    #[test]
    fn heading_only_text_falls_back_to_sentinel() {
        let sections = assemble("INTRODUCTION");
        assert_eq!(sections, vec![Section::new("Document", "INTRODUCTION")]);
    }

    #[test]
    fn repeated_headings_are_kept() {
        let sections = assemble("Summary\none\n\nSummary\ntwo");
        assert_eq!(
            sections,
            vec![Section::new("Summary", "one"), Section::new("Summary", "two")]
        );
    }

    #[test]
    fn bare_bullets_act_as_blank_lines() {
        let sections = assemble("Steps\n- mix\n\u{2022}\n- bake");
        assert_eq!(sections, vec![Section::new("Steps", "- mix\n\n- bake")]);
    }

    #[test]
    fn empty_stream_yields_nothing() {
        assert!(assemble("").is_empty());
    }
}
