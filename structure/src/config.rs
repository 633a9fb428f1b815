//! Tunable thresholds for heading detection.

/// Lines longer than this (in characters) are never headings.
pub const MAX_HEADING_CHARS: usize = 80;
/// Minimum uppercase-letter ratio for a line to read as a heading.
pub const HEADING_UPPERCASE_RATIO: f32 = 0.6;
/// Uppercase-letter ratio required when the line ends like a sentence.
pub const SENTENCE_HEADING_UPPERCASE_RATIO: f32 = 0.9;
/// Share of words that must be capitalized in a multi-word title.
pub const TITLE_CAPITALIZED_WORD_RATIO: f32 = 0.6;
/// Floor on the number of capitalized words in a multi-word title.
pub const TITLE_MIN_CAPITALIZED_WORDS: usize = 2;
/// Heading given to content that appears before any heading line.
pub const SENTINEL_HEADING: &str = "Document";

/// Configuration for line classification and section assembly.
#[derive(Debug, Clone, PartialEq)]
pub struct HeuristicConfig {
    /// Maximum heading length in characters.
    pub max_heading_chars: usize,
    /// Uppercase ratio for ordinary heading lines.
    pub uppercase_ratio: f32,
    /// Uppercase ratio for lines ending in `.`, `?` or `!`.
    pub sentence_uppercase_ratio: f32,
    /// Share of capitalized words for multi-word titles.
    pub title_word_ratio: f32,
    /// Minimum capitalized words for multi-word titles.
    pub title_min_words: usize,
    /// Heading used when body text precedes every heading.
    pub sentinel_heading: String,
}

impl Default for HeuristicConfig {
    fn default() -> Self {
        Self {
            max_heading_chars: MAX_HEADING_CHARS,
            uppercase_ratio: HEADING_UPPERCASE_RATIO,
            sentence_uppercase_ratio: SENTENCE_HEADING_UPPERCASE_RATIO,
            title_word_ratio: TITLE_CAPITALIZED_WORD_RATIO,
            title_min_words: TITLE_MIN_CAPITALIZED_WORDS,
            sentinel_heading: SENTINEL_HEADING.to_string(),
        }
    }
}

impl HeuristicConfig {
    /// Creates a configuration with the reference thresholds.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder for custom thresholds.
    #[must_use]
    pub fn builder() -> HeuristicConfigBuilder {
        HeuristicConfigBuilder::new()
    }
}

/// Builder for [`HeuristicConfig`].
#[derive(Debug, Default)]
pub struct HeuristicConfigBuilder {
    config: HeuristicConfig,
}

impl HeuristicConfigBuilder {
    /// Creates a builder seeded with the reference thresholds.
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: HeuristicConfig::default(),
        }
    }

    /// Sets the maximum heading length.
    #[must_use]
    pub const fn max_heading_chars(mut self, chars: usize) -> Self {
        self.config.max_heading_chars = chars;
        self
    }

    /// Sets the uppercase ratio for ordinary heading lines.
    #[must_use]
    pub const fn uppercase_ratio(mut self, ratio: f32) -> Self {
        self.config.uppercase_ratio = ratio;
        self
    }

    /// Sets the uppercase ratio for sentence-like lines.
    #[must_use]
    pub const fn sentence_uppercase_ratio(mut self, ratio: f32) -> Self {
        self.config.sentence_uppercase_ratio = ratio;
        self
    }

    /// Sets the capitalized-word share for multi-word titles.
    #[must_use]
    pub const fn title_word_ratio(mut self, ratio: f32) -> Self {
        self.config.title_word_ratio = ratio;
        self
    }

    /// Sets the minimum number of capitalized words for multi-word titles.
    #[must_use]
    pub const fn title_min_words(mut self, words: usize) -> Self {
        self.config.title_min_words = words;
        self
    }

    /// Sets the sentinel heading.
    #[must_use]
    pub fn sentinel_heading(mut self, heading: impl Into<String>) -> Self {
        self.config.sentinel_heading = heading.into();
        self
    }

    /// Builds the configuration.
    #[must_use]
    pub fn build(self) -> HeuristicConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[allow(clippy::float_cmp)]
    fn default_config() {
        let config = HeuristicConfig::default();
        assert_eq!(config.max_heading_chars, 80);
        assert_eq!(config.uppercase_ratio, 0.6);
        assert_eq!(config.sentence_uppercase_ratio, 0.9);
        assert_eq!(config.title_min_words, 2);
        assert_eq!(config.sentinel_heading, "Document");
    }

    #[test]
    #[allow(clippy::float_cmp)]
    fn builder_config() {
        let config = HeuristicConfig::builder()
            .max_heading_chars(40)
            .uppercase_ratio(0.75)
            .sentinel_heading("Untitled")
            .build();
        assert_eq!(config.max_heading_chars, 40);
        assert_eq!(config.uppercase_ratio, 0.75);
        assert_eq!(config.sentence_uppercase_ratio, 0.9);
        assert_eq!(config.sentinel_heading, "Untitled");
    }
}
