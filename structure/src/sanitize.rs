//! Whitespace normalization executed before line classification.

/// Normalizes raw extracted text.
///
/// It performs lightweight normalization:
/// - normalize line endings (`\r\n`, `\r` -> `\n`)
/// - replace non-breaking spaces and tabs with plain spaces
/// - trim trailing horizontal whitespace on each line
/// - collapse runs of three or more line breaks to two
/// - trim outer whitespace
///
/// The output is never longer than the input.
#[must_use]
pub fn sanitize(text: &str) -> String {
    let normalized = normalize_line_endings(text);
    let spaced = replace_odd_spaces(&normalized);
    let trimmed = trim_trailing_whitespace_per_line(&spaced);
    collapse_blank_lines(&trimmed).trim().to_string()
}

fn normalize_line_endings(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

fn replace_odd_spaces(text: &str) -> String {
    text.chars()
        .map(|c| if matches!(c, '\u{00A0}' | '\t') { ' ' } else { c })
        .collect()
}

pub(crate) fn trim_trailing_whitespace_per_line(text: &str) -> String {
    text.split('\n')
        .map(str::trim_end)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Caps consecutive `\n` characters at two, leaving at most one empty line
/// between paragraphs.
pub(crate) fn collapse_blank_lines(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut newline_run = 0usize;

    for c in text.chars() {
        if c == '\n' {
            newline_run += 1;
            if newline_run <= 2 {
                out.push(c);
            }
        } else {
            newline_run = 0;
            out.push(c);
        }
    }

    out
}
