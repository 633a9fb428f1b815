//! OCR backend selection for the CLI.

use folio_extract::{
    MISTRAL_API_KEY_ENV, MistralOcr, NoOcr, OcrClient, OcrError, OcrOutput,
};
use tracing::warn;

/// OCR service used when a document has no usable text layer.
#[derive(Debug, Clone)]
pub enum OcrBackend {
    /// Mistral document OCR.
    Mistral(MistralOcr),
    /// OCR turned off; thin documents are reported, not recovered.
    Disabled,
}

impl OcrBackend {
    /// Builds the backend from command-line overrides and `MISTRAL_API_KEY`.
    ///
    /// A missing key downgrades to [`OcrBackend::Disabled`] with a warning so
    /// documents with a text layer still ingest.
    pub fn detect(enabled: bool, base_url: Option<&str>, model: Option<&str>) -> Self {
        if !enabled {
            return Self::Disabled;
        }
        match MistralOcr::from_env() {
            Ok(mut client) => {
                if let Some(url) = base_url {
                    client = client.with_base_url(url);
                }
                if let Some(model) = model {
                    client = client.with_model(model);
                }
                Self::Mistral(client)
            }
            Err(error) => {
                warn!(%error, "set {MISTRAL_API_KEY_ENV} to enable OCR; continuing without it");
                Self::Disabled
            }
        }
    }

    /// Short label for logs.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Mistral(_) => "mistral",
            Self::Disabled => "disabled",
        }
    }
}

impl OcrClient for OcrBackend {
    async fn recognize(&self, document: &[u8]) -> Result<OcrOutput, OcrError> {
        match self {
            Self::Mistral(client) => client.recognize(document).await,
            Self::Disabled => NoOcr.recognize(document).await,
        }
    }
}
