use std::time::Duration;

use thiserror::Error;

/// Errors emitted by primary text extractors.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The input bytes do not decode as a valid PDF structure.
    #[error("failed to parse PDF: {0}")]
    Parse(String),
}

/// Errors emitted by OCR clients.
///
/// The fallback coordinator never propagates these; they end up in the
/// ingestion diagnostic.
#[derive(Debug, Error)]
pub enum OcrError {
    /// Transport-level failure talking to the OCR service.
    #[error("OCR request failed: {0}")]
    Http(#[from] reqwest::Error),
    /// The OCR service answered with a non-success status.
    #[error("OCR service returned {status}: {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error message from the response body.
        message: String,
    },
    /// The OCR call did not finish within the configured limit.
    #[error("OCR timed out after {0:?}")]
    Timeout(Duration),
    /// The document type cannot be sent to the OCR service.
    #[error("unsupported document type for OCR: {0}")]
    Unsupported(&'static str),
    /// No OCR client was configured.
    #[error("OCR is not configured")]
    NotConfigured,
    /// A required credential is missing from the environment.
    #[error("missing API key; set {0}")]
    MissingApiKey(&'static str),
}

/// Result alias for primary extraction.
pub type Result<T> = std::result::Result<T, ExtractError>;
