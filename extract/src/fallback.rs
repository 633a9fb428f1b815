//! Primary → OCR fallback decision.

use std::time::Duration;

use futures_lite::future;
use tracing::{debug, info, warn};

use crate::error::OcrError;
use crate::model::{OcrOutput, Provenance, RawText, Resolution};
use crate::ocr::OcrClient;
use crate::sufficiency::SufficiencyPolicy;

/// Coordinator progress. Every path ends in `Resolved`.
#[derive(Debug)]
enum State {
    Primary(RawText),
    FallbackAttempted {
        primary: RawText,
        outcome: Result<OcrOutput, OcrError>,
    },
    Resolved(Resolution),
}

/// Chooses between primary text and OCR output.
///
/// No branch fails: OCR errors and timeouts are logged and folded into the
/// returned [`Resolution`] with `needs_fallback` set.
#[derive(Debug, Clone)]
pub struct FallbackCoordinator<O> {
    ocr: O,
    policy: SufficiencyPolicy,
    timeout: Option<Duration>,
}

impl<O: OcrClient> FallbackCoordinator<O> {
    /// Creates a coordinator with the default sufficiency policy and no
    /// timeout.
    #[must_use]
    pub fn new(ocr: O) -> Self {
        Self {
            ocr,
            policy: SufficiencyPolicy::default(),
            timeout: None,
        }
    }

    /// Overrides the sufficiency policy.
    #[must_use]
    pub const fn with_policy(mut self, policy: SufficiencyPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Bounds the OCR call; `None` waits indefinitely.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Resolves the final text for a document.
    ///
    /// `document` is the original upload, forwarded to OCR only when the
    /// primary text is insufficient.
    pub async fn resolve(&self, primary: RawText, document: &[u8]) -> Resolution {
        let mut state = State::Primary(primary);
        loop {
            state = match state {
                State::Primary(primary) => {
                    if self.policy.is_insufficient(primary.text()) {
                        debug!(
                            chars = primary.text().chars().count(),
                            min_chars = self.policy.min_chars,
                            "primary text insufficient; attempting OCR"
                        );
                        let outcome = self.recognize(document).await;
                        State::FallbackAttempted { primary, outcome }
                    } else {
                        State::Resolved(Resolution {
                            page_count: primary.page_count(),
                            final_text: primary.into_text(),
                            needs_fallback: false,
                            provenance: Provenance::Primary,
                            diagnostic: "no fallback needed".to_string(),
                        })
                    }
                }
                State::FallbackAttempted { primary, outcome } => {
                    State::Resolved(Self::settle(primary, outcome))
                }
                State::Resolved(resolution) => {
                    info!(
                        provenance = resolution.provenance.as_str(),
                        needs_fallback = resolution.needs_fallback,
                        "extraction resolved"
                    );
                    return resolution;
                }
            };
        }
    }

    async fn recognize(&self, document: &[u8]) -> Result<OcrOutput, OcrError> {
        match self.timeout {
            None => self.ocr.recognize(document).await,
            Some(limit) => {
                future::or(self.ocr.recognize(document), async move {
                    async_io::Timer::after(limit).await;
                    Err(OcrError::Timeout(limit))
                })
                .await
            }
        }
    }

    fn settle(primary: RawText, outcome: Result<OcrOutput, OcrError>) -> Resolution {
        match outcome {
            Ok(output) if !output.text.trim().is_empty() => {
                let ocr = RawText::fallback(output.text, Some(output.page_count));
                Resolution {
                    diagnostic: format!("OCR succeeded on {} page(s)", output.page_count),
                    page_count: ocr.page_count(),
                    final_text: ocr.into_text(),
                    needs_fallback: false,
                    provenance: Provenance::Ocr,
                }
            }
            Ok(_) => Resolution {
                page_count: primary.page_count(),
                final_text: primary.into_text(),
                needs_fallback: true,
                provenance: Provenance::OcrEmpty,
                diagnostic: "OCR found no readable text".to_string(),
            },
            Err(error) => {
                warn!(%error, "OCR fallback failed; keeping primary text");
                Resolution {
                    page_count: primary.page_count(),
                    final_text: primary.into_text(),
                    needs_fallback: true,
                    provenance: Provenance::OcrFailed,
                    diagnostic: format!("OCR failed: {error}"),
                }
            }
        }
    }
}
