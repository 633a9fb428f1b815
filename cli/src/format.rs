//! Report rendering.

use std::fmt::Write as _;

use folio_extract::IngestReport;

/// How the report is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Pretty-printed JSON of the full report.
    #[default]
    Json,
    /// Markdown-style outline of the sections.
    Outline,
}

impl OutputFormat {
    /// Parse a format name.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "json" => Some(Self::Json),
            "outline" | "md" | "markdown" => Some(Self::Outline),
            _ => None,
        }
    }

    /// Renders the report.
    pub fn render(self, report: &IngestReport) -> serde_json::Result<String> {
        match self {
            Self::Json => serde_json::to_string_pretty(report),
            Self::Outline => Ok(outline(report)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::Outline => write!(f, "outline"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Unknown format: {s} (expected json or outline)"))
    }
}

fn outline(report: &IngestReport) -> String {
    let mut out = String::new();
    if let Some(title) = &report.metadata.title {
        let _ = writeln!(out, "# {title}\n");
    }
    for section in &report.sections {
        let _ = writeln!(out, "## {}\n\n{}\n", section.heading, section.body);
    }
    if report.sections.is_empty() {
        out.push_str("(no sections recovered)\n");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_extract::{DocumentMeta, Provenance, folio_structure::Section};

    fn report() -> IngestReport {
        IngestReport {
            sections: vec![
                Section::new("Biology Unit", "LESSON PLAN"),
                Section::new("Topics", "- DNA"),
            ],
            needs_fallback: false,
            page_count: 1,
            provenance: Provenance::Primary,
            diagnostic: "no fallback needed".to_string(),
            metadata: DocumentMeta::default(),
        }
    }

    #[test]
    fn parses_format_names() {
        assert_eq!("JSON".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert_eq!("md".parse::<OutputFormat>(), Ok(OutputFormat::Outline));
        assert!("yaml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn outline_lists_sections() {
        let text = OutputFormat::Outline.render(&report()).unwrap();
        assert_eq!(
            text,
            "## Biology Unit\n\nLESSON PLAN\n\n## Topics\n\n- DNA\n\n"
        );
    }

    #[test]
    fn outline_marks_empty_reports() {
        let mut empty = report();
        empty.sections.clear();
        empty.metadata.title = Some("Scan".to_string());
        let text = OutputFormat::Outline.render(&empty).unwrap();
        assert_eq!(text, "# Scan\n\n(no sections recovered)\n");
    }

    #[test]
    fn json_includes_provenance() {
        let text = OutputFormat::Json.render(&report()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["provenance"], "primary");
        assert_eq!(value["sections"][1]["body"], "- DNA");
    }
}
