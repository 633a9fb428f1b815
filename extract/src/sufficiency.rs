//! Decides whether extracted text is usable or needs the OCR fallback.

/// Minimum non-whitespace characters for text to count as usable.
///
/// Rejects stray page numbers and headers while accepting short but real
/// content.
pub const MIN_TEXT_CHARS: usize = 25;

/// Threshold used by [`SufficiencyPolicy::is_insufficient`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SufficiencyPolicy {
    /// Minimum non-whitespace characters.
    pub min_chars: usize,
}

impl Default for SufficiencyPolicy {
    fn default() -> Self {
        Self {
            min_chars: MIN_TEXT_CHARS,
        }
    }
}

impl SufficiencyPolicy {
    /// Creates a policy with a custom threshold.
    #[must_use]
    pub const fn new(min_chars: usize) -> Self {
        Self { min_chars }
    }

    /// Returns true when `text` is too thin to use and OCR should run.
    #[must_use]
    pub fn is_insufficient(&self, text: &str) -> bool {
        let compact = compact_len(text);
        compact == 0 || compact < self.min_chars
    }
}

/// Returns true when `text` has fewer than [`MIN_TEXT_CHARS`] non-whitespace
/// characters.
#[must_use]
pub fn is_insufficient(text: &str) -> bool {
    SufficiencyPolicy::default().is_insufficient(text)
}

fn compact_len(text: &str) -> usize {
    text.chars().filter(|c| !c.is_whitespace()).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_is_insufficient() {
        assert!(is_insufficient(""));
        assert!(is_insufficient(" \n\t\u{00A0}"));
    }

    #[test]
    fn threshold_is_exclusive() {
        assert!(is_insufficient("A"));
        assert!(is_insufficient(&"A".repeat(24)));
        assert!(!is_insufficient(&"A".repeat(25)));
    }

    #[test]
    fn whitespace_does_not_count() {
        let spaced = "A ".repeat(24);
        assert!(is_insufficient(&spaced));
        let page_number = "\n\n   12   \n\n";
        assert!(is_insufficient(page_number));
    }

    #[test]
    fn custom_threshold() {
        let policy = SufficiencyPolicy::new(3);
        assert!(policy.is_insufficient("ab"));
        assert!(!policy.is_insufficient("a b c"));
        // Zero-length text is insufficient even with no threshold.
        assert!(SufficiencyPolicy::new(0).is_insufficient(""));
    }
}
