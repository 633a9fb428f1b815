//! Output types.

use serde::{Deserialize, Serialize};

/// A heading together with the body text that follows it.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Section {
    /// Display heading.
    pub heading: String,
    /// Body text; never blank for emitted sections.
    pub body: String,
}

impl Section {
    /// Creates a section.
    #[must_use]
    pub fn new(heading: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            heading: heading.into(),
            body: body.into(),
        }
    }
}

/// Sections in document order. Headings may repeat.
pub type SectionSequence = Vec<Section>;
