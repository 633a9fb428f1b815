use std::future::Future;
use std::sync::Arc;

use crate::error::OcrError;
use crate::model::OcrOutput;

/// Recognizes text in a document the primary extractor could not read.
///
/// Clients are constructed by the caller (credentials, endpoint, model) and
/// injected into the [`Ingestor`](crate::Ingestor); nothing in this crate
/// reads process-wide OCR state.
pub trait OcrClient: Send + Sync {
    /// Runs OCR over the original document bytes.
    ///
    /// Dropping the returned future must abort the request.
    fn recognize(&self, document: &[u8])
    -> impl Future<Output = Result<OcrOutput, OcrError>> + Send;
}

impl<T: OcrClient> OcrClient for Arc<T> {
    fn recognize(
        &self,
        document: &[u8],
    ) -> impl Future<Output = Result<OcrOutput, OcrError>> + Send {
        (**self).recognize(document)
    }
}

impl<T: OcrClient> OcrClient for &T {
    fn recognize(
        &self,
        document: &[u8],
    ) -> impl Future<Output = Result<OcrOutput, OcrError>> + Send {
        (**self).recognize(document)
    }
}

/// OCR client that is never available.
///
/// Insufficient documents resolve with their primary text and the
/// `needs_fallback` flag set.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOcr;

impl OcrClient for NoOcr {
    async fn recognize(&self, _document: &[u8]) -> Result<OcrOutput, OcrError> {
        Err(OcrError::NotConfigured)
    }
}
