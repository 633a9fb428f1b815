use serde::{Deserialize, Serialize};

/// Document format detected from leading bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    /// `%PDF-` header.
    Pdf,
    /// PNG signature.
    Png,
    /// JPEG SOI marker.
    Jpeg,
    /// Anything else, read as text.
    Text,
}

impl DocumentKind {
    /// Detects the document kind from magic bytes.
    #[must_use]
    pub fn sniff(bytes: &[u8]) -> Self {
        if bytes.starts_with(b"%PDF-") {
            Self::Pdf
        } else if bytes.starts_with(b"\x89PNG\r\n\x1a\n") {
            Self::Png
        } else if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
            Self::Jpeg
        } else {
            Self::Text
        }
    }

    /// MIME type used when forwarding the document.
    #[must_use]
    pub const fn mime(self) -> &'static str {
        match self {
            Self::Pdf => "application/pdf",
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::Text => "text/plain",
        }
    }

    /// Whether this is a raster image.
    #[must_use]
    pub const fn is_image(self) -> bool {
        matches!(self, Self::Png | Self::Jpeg)
    }
}

/// Which extraction path produced a [`RawText`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextSource {
    /// Native text layer of the document.
    Primary,
    /// OCR output.
    Fallback,
}

/// An extraction result. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawText {
    text: String,
    source: TextSource,
    page_count: Option<usize>,
}

impl RawText {
    /// Creates a text from the primary extractor.
    #[must_use]
    pub fn primary(text: impl Into<String>, page_count: Option<usize>) -> Self {
        Self {
            text: text.into(),
            source: TextSource::Primary,
            page_count,
        }
    }

    /// Creates a text from the OCR fallback.
    #[must_use]
    pub fn fallback(text: impl Into<String>, page_count: Option<usize>) -> Self {
        Self {
            text: text.into(),
            source: TextSource::Fallback,
            page_count,
        }
    }

    /// Extracted text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Extraction path.
    #[must_use]
    pub const fn source(&self) -> TextSource {
        self.source
    }

    /// Page count reported by the extractor, if any.
    #[must_use]
    pub const fn page_count(&self) -> Option<usize> {
        self.page_count
    }

    /// Consumes the value and returns the text.
    #[must_use]
    pub fn into_text(self) -> String {
        self.text
    }
}

/// Minimal document metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMeta {
    /// Optional title from the PDF info dictionary.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Optional author from the PDF info dictionary.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// Optional raw creation date string.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creation_date: Option<String>,
}

/// Output of a [`PrimaryExtractor`](crate::PrimaryExtractor).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrimaryExtraction {
    /// Text layer, pages separated by a blank line.
    pub text: String,
    /// Total pages in the document.
    pub page_count: usize,
    /// Document metadata.
    pub metadata: DocumentMeta,
}

/// Output of an [`OcrClient`](crate::OcrClient).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OcrOutput {
    /// Recognized text.
    pub text: String,
    /// Pages processed by the OCR service.
    pub page_count: usize,
}

/// Which path produced the final text of an ingestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Provenance {
    /// Primary text was sufficient.
    Primary,
    /// OCR text replaced insufficient primary text.
    Ocr,
    /// OCR ran but found nothing; primary text kept.
    OcrEmpty,
    /// OCR failed or was unavailable; primary text kept.
    OcrFailed,
}

impl Provenance {
    /// Stable label, matching the serialized form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Ocr => "ocr",
            Self::OcrEmpty => "ocr-empty",
            Self::OcrFailed => "ocr-failed",
        }
    }
}

/// Final decision of the fallback coordinator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Text handed to section recovery.
    pub final_text: String,
    /// Set when the final text is still considered insufficient.
    pub needs_fallback: bool,
    /// Path that produced `final_text`.
    pub provenance: Provenance,
    /// Page count of the document that produced `final_text`.
    pub page_count: Option<usize>,
    /// Human-readable outcome, suitable for logs and warnings.
    pub diagnostic: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sniffs_magic_bytes() {
        assert_eq!(DocumentKind::sniff(b"%PDF-1.7\n"), DocumentKind::Pdf);
        assert_eq!(
            DocumentKind::sniff(b"\x89PNG\r\n\x1a\n\0\0"),
            DocumentKind::Png
        );
        assert_eq!(DocumentKind::sniff(&[0xFF, 0xD8, 0xFF, 0xE0]), DocumentKind::Jpeg);
        assert_eq!(DocumentKind::sniff(b"hello"), DocumentKind::Text);
        assert_eq!(DocumentKind::sniff(b""), DocumentKind::Text);
    }

    #[test]
    fn only_raster_formats_are_images() {
        assert!(DocumentKind::Png.is_image());
        assert!(DocumentKind::Jpeg.is_image());
        assert!(!DocumentKind::Pdf.is_image());
        assert!(!DocumentKind::Text.is_image());
    }

    #[test]
    fn raw_text_records_its_source() {
        let primary = RawText::primary("text layer", Some(2));
        assert_eq!(primary.source(), TextSource::Primary);
        assert_eq!(primary.page_count(), Some(2));

        let ocr = RawText::fallback("recognized", None);
        assert_eq!(ocr.source(), TextSource::Fallback);
        assert_eq!(ocr.into_text(), "recognized");
    }

    #[test]
    fn provenance_labels_match_serde() {
        for provenance in [
            Provenance::Primary,
            Provenance::Ocr,
            Provenance::OcrEmpty,
            Provenance::OcrFailed,
        ] {
            let json = serde_json::to_string(&provenance).unwrap();
            assert_eq!(json, format!("\"{}\"", provenance.as_str()));
        }
    }
}
