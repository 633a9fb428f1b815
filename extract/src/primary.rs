use lopdf::Document;
use tracing::{debug, warn};

use crate::error::{ExtractError, Result};
use crate::model::{DocumentKind, DocumentMeta, PrimaryExtraction};

/// Reads the native text layer of a document.
///
/// Extraction is CPU-bound and synchronous; the ingestor runs it on a
/// blocking thread.
pub trait PrimaryExtractor: Send + Sync {
    /// Extracts text, page count and metadata from raw document bytes.
    ///
    /// # Errors
    /// Returns an error when the bytes cannot be decoded. Callers treat this
    /// the same as an empty text layer.
    fn extract(&self, bytes: &[u8]) -> Result<PrimaryExtraction>;
}

/// PDF text layer extraction backed by `lopdf`.
///
/// Pages are joined with a blank line. No page footers are inserted: a long
/// scanned document would otherwise gather enough footer characters to pass
/// the sufficiency check without any real text.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfExtractor;

impl PrimaryExtractor for PdfExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<PrimaryExtraction> {
        let doc = Document::load_mem(bytes).map_err(|e| ExtractError::Parse(e.to_string()))?;

        let page_map = doc.get_pages();
        let mut page_numbers: Vec<u32> = page_map.keys().copied().collect();
        page_numbers.sort_unstable();
        let page_count = page_numbers.len();

        let pages: Vec<String> = page_numbers
            .iter()
            .map(|page_number| {
                doc.extract_text(&[*page_number])
                    .map(|text| text.trim().to_string())
                    .unwrap_or_else(|e| {
                        debug!(page = page_number, error = %e, "page has no readable text layer");
                        String::new()
                    })
            })
            .filter(|text| !text.is_empty())
            .collect();
        let text = pages.join("\n\n");

        debug!(
            pages = page_count,
            chars = text.chars().count(),
            "extracted PDF text layer"
        );

        Ok(PrimaryExtraction {
            text,
            page_count,
            metadata: extract_metadata(&doc),
        })
    }
}

/// Decodes the bytes as UTF-8 text, replacing invalid sequences.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextExtractor;

impl PrimaryExtractor for PlainTextExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<PrimaryExtraction> {
        let text = String::from_utf8_lossy(bytes);
        let text = text.strip_prefix('\u{FEFF}').unwrap_or(&*text).to_string();
        Ok(PrimaryExtraction {
            page_count: usize::from(!text.trim().is_empty()),
            text,
            metadata: DocumentMeta::default(),
        })
    }
}

/// Picks an extractor from the leading bytes.
///
/// PDFs go to [`PdfExtractor`], raster images yield an empty text layer (so
/// they always fall through to OCR) and everything else is read as text.
#[derive(Debug, Clone, Copy, Default)]
pub struct AutoExtractor;

impl PrimaryExtractor for AutoExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<PrimaryExtraction> {
        match DocumentKind::sniff(bytes) {
            DocumentKind::Pdf => PdfExtractor.extract(bytes),
            kind if kind.is_image() => Ok(PrimaryExtraction {
                text: String::new(),
                page_count: 1,
                metadata: DocumentMeta::default(),
            }),
            _ => PlainTextExtractor.extract(bytes),
        }
    }
}

/// Runs an extractor, downgrading failure to an empty result.
pub(crate) fn extract_or_empty<E: PrimaryExtractor + ?Sized>(
    extractor: &E,
    bytes: &[u8],
) -> PrimaryExtraction {
    extractor.extract(bytes).unwrap_or_else(|error| {
        warn!(%error, "primary extraction failed; continuing with empty text");
        PrimaryExtraction::default()
    })
}

fn extract_metadata(doc: &Document) -> DocumentMeta {
    let mut meta = DocumentMeta::default();
    if let Ok(info_ref) = doc.trailer.get(b"Info")
        && let Ok(info_ref) = info_ref.as_reference()
        && let Ok(dict) = doc.get_dictionary(info_ref)
    {
        let field = |key: &[u8]| {
            dict.get(key)
                .ok()
                .and_then(|v| v.as_str().ok())
                .map(to_clean_string)
                .filter(|s| !s.is_empty())
        };
        meta.title = field(b"Title");
        meta.author = field(b"Author");
        meta.creation_date = field(b"CreationDate");
    }
    meta
}

fn to_clean_string(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_pdf_errors() {
        let result = PdfExtractor.extract(b"%PDF-not-really");
        assert!(matches!(result, Err(ExtractError::Parse(_))));
    }

    #[test]
    fn failed_extraction_downgrades_to_empty() {
        let extraction = extract_or_empty(&PdfExtractor, b"not-a-pdf");
        assert_eq!(extraction, PrimaryExtraction::default());
    }

    #[test]
    fn plain_text_passes_through() {
        let extraction = PlainTextExtractor.extract("\u{FEFF}Topics\nDNA".as_bytes()).unwrap();
        assert_eq!(extraction.text, "Topics\nDNA");
        assert_eq!(extraction.page_count, 1);
    }

    #[test]
    fn empty_plain_text_has_no_pages() {
        let extraction = PlainTextExtractor.extract(b"  \n").unwrap();
        assert_eq!(extraction.page_count, 0);
    }

    #[test]
    fn images_have_no_text_layer() {
        let extraction = AutoExtractor.extract(b"\x89PNG\r\n\x1a\nrest").unwrap();
        assert!(extraction.text.is_empty());
        assert_eq!(extraction.page_count, 1);
    }

    #[test]
    fn auto_reads_text_uploads() {
        let extraction = AutoExtractor.extract(b"Lesson notes").unwrap();
        assert_eq!(extraction.text, "Lesson notes");
    }
}
