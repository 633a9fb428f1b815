//! Mistral OCR client (`POST /v1/ocr`).

use std::sync::Arc;

use base64::{Engine as _, engine::general_purpose};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::OcrError;
use crate::model::{DocumentKind, OcrOutput};
use crate::ocr::OcrClient;

/// Mistral REST base URL.
pub const MISTRAL_API_BASE_URL: &str = "https://api.mistral.ai/v1";
/// Environment variable read by [`MistralOcr::from_env`].
pub const MISTRAL_API_KEY_ENV: &str = "MISTRAL_API_KEY";
/// Default OCR model.
pub const DEFAULT_OCR_MODEL: &str = "mistral-ocr-latest";

const USER_AGENT: &str = "folio-extract/0.1";

#[derive(Debug, Clone)]
struct MistralConfig {
    api_key: String,
    base_url: String,
    model: String,
}

/// OCR backed by the Mistral document OCR endpoint.
///
/// Cheap to clone; clones share one connection pool.
#[derive(Clone)]
pub struct MistralOcr {
    inner: Arc<MistralConfig>,
    http: reqwest::Client,
}

impl std::fmt::Debug for MistralOcr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MistralOcr")
            .field("base_url", &self.inner.base_url)
            .field("model", &self.inner.model)
            .finish_non_exhaustive()
    }
}

impl MistralOcr {
    /// Creates a client with the default endpoint and model.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(MistralConfig {
                api_key: api_key.into(),
                base_url: MISTRAL_API_BASE_URL.to_string(),
                model: DEFAULT_OCR_MODEL.to_string(),
            }),
            http: reqwest::Client::new(),
        }
    }

    /// Creates a client from `MISTRAL_API_KEY`.
    ///
    /// # Errors
    /// Returns [`OcrError::MissingApiKey`] when the variable is unset or empty.
    pub fn from_env() -> Result<Self, OcrError> {
        match std::env::var(MISTRAL_API_KEY_ENV) {
            Ok(key) if !key.trim().is_empty() => Ok(Self::new(key.trim())),
            _ => Err(OcrError::MissingApiKey(MISTRAL_API_KEY_ENV)),
        }
    }

    /// Overrides the REST base URL (proxies, self-hosted gateways).
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Arc::make_mut(&mut self.inner).base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Overrides the OCR model.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        Arc::make_mut(&mut self.inner).model = model.into();
        self
    }

    /// Uses a preconfigured HTTP client.
    #[must_use]
    pub fn with_http_client(mut self, http: reqwest::Client) -> Self {
        self.http = http;
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/ocr", self.inner.base_url)
    }
}

impl OcrClient for MistralOcr {
    async fn recognize(&self, document: &[u8]) -> Result<OcrOutput, OcrError> {
        let request = OcrRequest::new(&self.inner.model, document)?;
        debug!(endpoint = %self.endpoint(), bytes = document.len(), "sending OCR request");

        let response = self
            .http
            .post(self.endpoint())
            .bearer_auth(&self.inner.api_key)
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(OcrError::Api {
                status: status.as_u16(),
                message: api_error_message(&body),
            });
        }

        let parsed: OcrResponse = response.json().await?;
        Ok(parsed.into_output())
    }
}

#[derive(Debug, Serialize)]
struct OcrRequest<'a> {
    model: &'a str,
    document: DocumentChunk,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum DocumentChunk {
    DocumentUrl { document_url: String },
    ImageUrl { image_url: String },
}

impl<'a> OcrRequest<'a> {
    fn new(model: &'a str, document: &[u8]) -> Result<Self, OcrError> {
        let kind = DocumentKind::sniff(document);
        let data_url = format!(
            "data:{};base64,{}",
            kind.mime(),
            general_purpose::STANDARD.encode(document)
        );
        let document = match kind {
            DocumentKind::Pdf => DocumentChunk::DocumentUrl {
                document_url: data_url,
            },
            DocumentKind::Png | DocumentKind::Jpeg => DocumentChunk::ImageUrl {
                image_url: data_url,
            },
            DocumentKind::Text => return Err(OcrError::Unsupported(kind.mime())),
        };
        Ok(Self { model, document })
    }
}

#[derive(Debug, Deserialize)]
struct OcrResponse {
    #[serde(default)]
    pages: Vec<OcrPage>,
}

#[derive(Debug, Deserialize)]
struct OcrPage {
    #[serde(default)]
    index: usize,
    #[serde(default)]
    markdown: String,
}

impl OcrResponse {
    fn into_output(mut self) -> OcrOutput {
        self.pages.sort_by_key(|page| page.index);
        let page_count = self.pages.len();
        let text = self
            .pages
            .iter()
            .map(|page| markdown_to_text(&page.markdown))
            .filter(|text| !text.is_empty())
            .collect::<Vec<_>>()
            .join("\n\n");
        OcrOutput { text, page_count }
    }
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: Option<serde_json::Value>,
    detail: Option<serde_json::Value>,
}

fn api_error_message(body: &str) -> String {
    let parsed = serde_json::from_str::<ApiErrorBody>(body).ok();
    let value = parsed.and_then(|b| b.message.or(b.detail));
    match value {
        Some(serde_json::Value::String(message)) => message,
        Some(other) => other.to_string(),
        None if body.trim().is_empty() => "empty response body".to_string(),
        None => body.trim().to_string(),
    }
}

/// Flattens OCR markdown into plain lines.
///
/// Heading markers and emphasis are dropped and image references removed;
/// a markdown heading is surrounded by blank lines so it stays eligible as a
/// section heading.
fn markdown_to_text(markdown: &str) -> String {
    let mut lines: Vec<String> = Vec::new();
    for line in markdown.lines() {
        let trimmed = line.trim();
        if trimmed.starts_with("![") && trimmed.ends_with(')') {
            continue;
        }
        let without_hashes = trimmed.trim_start_matches('#');
        let is_heading = without_hashes.len() < trimmed.len() && without_hashes.starts_with(' ');
        let cleaned = without_hashes.trim().replace("**", "").replace("__", "");
        if is_heading {
            lines.push(String::new());
            lines.push(cleaned);
            lines.push(String::new());
        } else {
            lines.push(cleaned);
        }
    }
    lines.join("\n").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pdf_requests_use_document_url() {
        let request = OcrRequest::new("mistral-ocr-latest", b"%PDF-1.4").unwrap();
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "mistral-ocr-latest");
        assert_eq!(json["document"]["type"], "document_url");
        assert_eq!(
            json["document"]["document_url"],
            "data:application/pdf;base64,JVBERi0xLjQ="
        );
    }

    #[test]
    fn image_requests_use_image_url() {
        let request = OcrRequest::new("m", &[0xFF, 0xD8, 0xFF, 0xE0]).unwrap();
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["document"]["type"], "image_url");
        assert!(
            json["document"]["image_url"]
                .as_str()
                .unwrap()
                .starts_with("data:image/jpeg;base64,")
        );
    }

    #[test]
    fn text_documents_are_rejected() {
        let result = OcrRequest::new("m", b"plain words");
        assert!(matches!(result, Err(OcrError::Unsupported("text/plain"))));
    }

    #[test]
    fn response_pages_are_joined_in_order() {
        let body = r###"{
            "pages": [
                {"index": 1, "markdown": "## Topics\nDNA and RNA"},
                {"index": 0, "markdown": "# BIOLOGY UNIT\n![img-0.jpeg](img-0.jpeg)\n**LESSON PLAN**"}
            ],
            "model": "mistral-ocr-2505",
            "usage_info": {"pages_processed": 2}
        }"###;
        let response: OcrResponse = serde_json::from_str(body).unwrap();
        let output = response.into_output();
        assert_eq!(output.page_count, 2);
        assert_eq!(
            output.text,
            "BIOLOGY UNIT\n\nLESSON PLAN\n\nTopics\n\nDNA and RNA"
        );
    }

    #[test]
    fn empty_response_has_no_text() {
        let response: OcrResponse = serde_json::from_str(r#"{"pages": []}"#).unwrap();
        let output = response.into_output();
        assert!(output.text.is_empty());
        assert_eq!(output.page_count, 0);
    }

    #[test]
    fn api_errors_prefer_message_field() {
        assert_eq!(
            api_error_message(r#"{"message": "Unauthorized"}"#),
            "Unauthorized"
        );
        assert_eq!(
            api_error_message(r#"{"detail": [{"msg": "bad"}]}"#),
            r#"[{"msg":"bad"}]"#
        );
        assert_eq!(api_error_message("gateway down"), "gateway down");
        assert_eq!(api_error_message(""), "empty response body");
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let client = MistralOcr::new("key").with_base_url("http://localhost:9000/v1/");
        assert_eq!(client.endpoint(), "http://localhost:9000/v1/ocr");
    }
}
