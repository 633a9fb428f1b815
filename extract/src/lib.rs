//! Document ingestion: text extraction, OCR fallback and section recovery.
//!
//! An [`Ingestor`] takes the raw bytes of an upload and produces an
//! [`IngestReport`]:
//!
//! 1. a [`PrimaryExtractor`] reads the native text layer on a blocking thread;
//! 2. the [`FallbackCoordinator`] decides whether that text is usable and,
//!    if not, asks an [`OcrClient`] for a second opinion;
//! 3. [`folio_structure`] turns the chosen text into titled sections.
//!
//! Ingestion never fails. Unreadable documents, OCR outages and timeouts are
//! reported through [`IngestReport::needs_fallback`] and
//! [`IngestReport::diagnostic`].
//!
//! ```rust,no_run
//! use folio_extract::{Ingestor, MistralOcr};
//!
//! # async fn run(bytes: Vec<u8>) -> Result<(), folio_extract::OcrError> {
//! let ingestor = Ingestor::new(MistralOcr::from_env()?);
//! let report = ingestor.ingest(&bytes).await;
//! for section in &report.sections {
//!     println!("{}", section.heading);
//! }
//! # Ok(())
//! # }
//! ```

mod error;
mod fallback;
mod mistral;
mod model;
mod ocr;
mod primary;
mod sufficiency;

use std::sync::Arc;
use std::time::Duration;

use folio_structure::{HeuristicConfig, Normalizer, Section};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

pub use error::{ExtractError, OcrError, Result};
pub use fallback::FallbackCoordinator;
pub use folio_structure;
pub use mistral::{DEFAULT_OCR_MODEL, MISTRAL_API_BASE_URL, MISTRAL_API_KEY_ENV, MistralOcr};
pub use model::{
    DocumentKind, DocumentMeta, OcrOutput, PrimaryExtraction, Provenance, RawText, Resolution,
    TextSource,
};
pub use ocr::{NoOcr, OcrClient};
pub use primary::{AutoExtractor, PdfExtractor, PlainTextExtractor, PrimaryExtractor};
pub use sufficiency::{MIN_TEXT_CHARS, SufficiencyPolicy, is_insufficient};

/// Default bound on a single OCR call.
pub const DEFAULT_OCR_TIMEOUT: Duration = Duration::from_secs(120);

/// Tuning for an [`Ingestor`].
#[derive(Debug, Clone, PartialEq)]
pub struct IngestOptions {
    /// Upper bound on the OCR call; `None` waits indefinitely.
    pub ocr_timeout: Option<Duration>,
    /// Threshold below which primary text triggers OCR.
    pub sufficiency: SufficiencyPolicy,
    /// Heading and section heuristics.
    pub heuristics: HeuristicConfig,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            ocr_timeout: Some(DEFAULT_OCR_TIMEOUT),
            sufficiency: SufficiencyPolicy::default(),
            heuristics: HeuristicConfig::default(),
        }
    }
}

impl IngestOptions {
    /// Creates options with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the OCR timeout.
    #[must_use]
    pub const fn with_ocr_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.ocr_timeout = timeout;
        self
    }

    /// Sets the minimum number of non-whitespace characters for primary text.
    #[must_use]
    pub const fn with_min_chars(mut self, min_chars: usize) -> Self {
        self.sufficiency = SufficiencyPolicy::new(min_chars);
        self
    }

    /// Replaces the heading heuristics.
    #[must_use]
    pub fn with_heuristics(mut self, heuristics: HeuristicConfig) -> Self {
        self.heuristics = heuristics;
        self
    }
}

/// Outcome of one ingestion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngestReport {
    /// Recovered sections in document order.
    pub sections: Vec<Section>,
    /// Set when no usable text could be recovered.
    pub needs_fallback: bool,
    /// Pages in the document that produced the final text.
    pub page_count: usize,
    /// Path that produced the final text.
    pub provenance: Provenance,
    /// Human-readable outcome of the extraction.
    pub diagnostic: String,
    /// Metadata from the primary extractor.
    pub metadata: DocumentMeta,
}

/// Turns document bytes into sections.
///
/// Cheap to clone; clones share the extractor.
#[derive(Debug)]
pub struct Ingestor<E = AutoExtractor, O = NoOcr> {
    extractor: Arc<E>,
    coordinator: FallbackCoordinator<O>,
    normalizer: Normalizer,
}

impl<E, O: Clone> Clone for Ingestor<E, O> {
    fn clone(&self) -> Self {
        Self {
            extractor: Arc::clone(&self.extractor),
            coordinator: self.coordinator.clone(),
            normalizer: self.normalizer.clone(),
        }
    }
}

impl Default for Ingestor {
    fn default() -> Self {
        Self::new(NoOcr)
    }
}

impl<O: OcrClient> Ingestor<AutoExtractor, O> {
    /// Creates an ingestor that sniffs the document type and uses `ocr` as
    /// the fallback.
    #[must_use]
    pub fn new(ocr: O) -> Self {
        Self::with_parts(AutoExtractor, ocr, IngestOptions::default())
    }
}

impl<E: PrimaryExtractor + 'static, O: OcrClient> Ingestor<E, O> {
    fn with_parts(extractor: E, ocr: O, options: IngestOptions) -> Self {
        Self {
            extractor: Arc::new(extractor),
            coordinator: FallbackCoordinator::new(ocr)
                .with_policy(options.sufficiency)
                .with_timeout(options.ocr_timeout),
            normalizer: Normalizer::new(options.heuristics),
        }
    }

    /// Replaces the primary extractor.
    #[must_use]
    pub fn with_extractor<X: PrimaryExtractor + 'static>(self, extractor: X) -> Ingestor<X, O> {
        Ingestor {
            extractor: Arc::new(extractor),
            coordinator: self.coordinator,
            normalizer: self.normalizer,
        }
    }

    /// Applies new options.
    #[must_use]
    pub fn with_options(self, options: IngestOptions) -> Self {
        Self {
            extractor: self.extractor,
            coordinator: self
                .coordinator
                .with_policy(options.sufficiency)
                .with_timeout(options.ocr_timeout),
            normalizer: Normalizer::new(options.heuristics),
        }
    }

    /// Extracts, resolves and structures one document.
    pub async fn ingest(&self, bytes: &[u8]) -> IngestReport {
        let extractor = Arc::clone(&self.extractor);
        let owned = bytes.to_vec();
        let extraction =
            blocking::unblock(move || primary::extract_or_empty(&*extractor, &owned)).await;
        debug!(
            pages = extraction.page_count,
            chars = extraction.text.chars().count(),
            "primary extraction finished"
        );

        let primary = RawText::primary(extraction.text, Some(extraction.page_count));
        let resolution = self.coordinator.resolve(primary, bytes).await;
        let sections = self.normalizer.normalize(&resolution.final_text);

        info!(
            sections = sections.len(),
            provenance = resolution.provenance.as_str(),
            "document ingested"
        );

        IngestReport {
            sections,
            needs_fallback: resolution.needs_fallback,
            page_count: resolution.page_count.unwrap_or(0),
            provenance: resolution.provenance,
            diagnostic: resolution.diagnostic,
            metadata: extraction.metadata,
        }
    }
}
