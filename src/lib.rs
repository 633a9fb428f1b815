//! # folio
//!
//! Façade crate for the folio workspace. Turns uploaded documents into an
//! ordered list of titled sections that a downstream generator can consume.
//!
//! - [`structure`] (always on): sanitizing flat text, classifying lines and
//!   assembling `(heading, body)` sections. Pure and synchronous.
//! - [`extract`] (feature `extract`, on by default): reading PDFs with
//!   `lopdf`, deciding when the text layer is too thin, and falling back to
//!   an injected OCR client such as [`extract::MistralOcr`].
//!
//! ## Example
//!
//! ```rust
//! use folio::{Section, normalize};
//!
//! let sections = normalize("Topics\n1. DNA\n2) RNA\n");
//! assert_eq!(sections, vec![Section::new("Topics", "- DNA\n- RNA")]);
//! ```
//!
//! With extraction:
//!
//! ```rust,no_run
//! # #[cfg(feature = "extract")]
//! # async fn demo(bytes: &[u8]) -> Result<(), folio::extract::OcrError> {
//! use folio::extract::{Ingestor, MistralOcr};
//!
//! let report = Ingestor::new(MistralOcr::from_env()?).ingest(bytes).await;
//! if report.needs_fallback {
//!     eprintln!("{}", report.diagnostic);
//! }
//! # Ok(())
//! # }
//! ```

pub use folio_structure as structure;
pub use folio_structure::{HeuristicConfig, Normalizer, Section, SectionSequence, normalize};

#[cfg(feature = "extract")]
pub use folio_extract as extract;

#[cfg(feature = "extract")]
pub use folio_extract::{IngestOptions, IngestReport, Ingestor, Provenance, is_insufficient};
