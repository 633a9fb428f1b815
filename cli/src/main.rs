//! Command-line document ingestion.
//!
//! Reads a PDF, image or text file, recovers its sections and prints them.
//!
//! # Usage
//!
//! ```bash
//! # JSON report, OCR through Mistral when the text layer is too thin
//! MISTRAL_API_KEY=xxx cargo run -p folio-cli -- lesson.pdf
//!
//! # Readable outline, no OCR
//! cargo run -p folio-cli -- notes.txt --format outline --no-ocr
//!
//! # Verbose logging
//! RUST_LOG=folio_extract=debug,folio_structure=debug cargo run -p folio-cli -- scan.png
//! ```

mod backend;
mod format;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use folio_extract::{IngestOptions, Ingestor, MIN_TEXT_CHARS};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::backend::OcrBackend;
use crate::format::OutputFormat;

/// Extract a document and print its sections.
#[derive(Parser, Debug)]
#[command(name = "folio", version, about)]
struct Args {
    /// Document to ingest (PDF, PNG, JPEG or plain text).
    file: PathBuf,

    /// Output format (json, outline).
    #[arg(short, long, default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    /// Never call the OCR service.
    #[arg(long)]
    no_ocr: bool,

    /// Seconds to wait for OCR before giving up. 0 waits indefinitely.
    #[arg(long, default_value_t = 120)]
    ocr_timeout: u64,

    /// Minimum non-whitespace characters before the text layer is trusted.
    #[arg(long, default_value_t = MIN_TEXT_CHARS)]
    min_chars: usize,

    /// Custom OCR API base URL (proxies, gateways).
    #[arg(long)]
    ocr_base_url: Option<String>,

    /// OCR model name.
    #[arg(long)]
    ocr_model: Option<String>,
}

impl Args {
    fn options(&self) -> IngestOptions {
        let timeout = (self.ocr_timeout > 0).then(|| Duration::from_secs(self.ocr_timeout));
        IngestOptions::new()
            .with_ocr_timeout(timeout)
            .with_min_chars(self.min_chars)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let bytes = std::fs::read(&args.file)
        .with_context(|| format!("failed to read {}", args.file.display()))?;

    let backend = OcrBackend::detect(
        !args.no_ocr,
        args.ocr_base_url.as_deref(),
        args.ocr_model.as_deref(),
    );
    info!(
        file = %args.file.display(),
        bytes = bytes.len(),
        ocr = backend.name(),
        "ingesting document"
    );

    let ingestor = Ingestor::new(backend).with_options(args.options());
    let report = ingestor.ingest(&bytes).await;

    if report.needs_fallback {
        warn!(diagnostic = %report.diagnostic, "no usable text recovered");
    }

    let rendered = args
        .format
        .render(&report)
        .context("failed to render report")?;
    println!("{rendered}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_flags() {
        let args = Args::try_parse_from([
            "folio",
            "scan.pdf",
            "--format",
            "outline",
            "--no-ocr",
            "--ocr-timeout",
            "0",
            "--min-chars",
            "10",
        ])
        .unwrap();
        assert_eq!(args.format, OutputFormat::Outline);
        assert!(args.no_ocr);
        let options = args.options();
        assert_eq!(options.ocr_timeout, None);
        assert_eq!(options.sufficiency.min_chars, 10);
    }

    #[test]
    fn defaults_match_library() {
        let args = Args::try_parse_from(["folio", "notes.txt"]).unwrap();
        assert_eq!(args.format, OutputFormat::Json);
        assert_eq!(args.options(), IngestOptions::default());
    }
}
