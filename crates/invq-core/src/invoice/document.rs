//! PDF-backed document extractor.

use async_trait::async_trait;
use tracing::{debug, info};

use super::parser::{ExtractionResult, InvoiceParser, RuleBasedParser};
use super::{DocumentExtractor, Result};
use crate::error::ExtractionError;
use crate::models::{FieldMapping, PdfConfig};
use crate::pdf::{PdfExtractor, PdfProcessor};
use crate::source::DocumentSource;

/// Everything learned from one document.
#[derive(Debug, Clone)]
pub struct ExtractedDocument {
    /// Number of pages in the PDF.
    pub page_count: u32,
    /// Plain text as extracted from the PDF.
    pub text: String,
    /// Recognized fields and parser diagnostics.
    pub result: ExtractionResult,
}

/// Extracts invoice fields from PDFs reachable by URL or local path.
#[derive(Debug, Clone)]
pub struct PdfDocumentExtractor {
    client: reqwest::Client,
    config: PdfConfig,
    parser: RuleBasedParser,
}

impl PdfDocumentExtractor {
    pub fn new(config: PdfConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("invq/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ExtractionError::Client)?;

        Ok(Self {
            client,
            config,
            parser: RuleBasedParser::new(),
        })
    }

    /// Fetch, read and parse one document.
    pub async fn extract_document(&self, file_ref: &str) -> Result<ExtractedDocument> {
        let source = DocumentSource::parse(file_ref);
        info!("Extracting invoice fields from {}", source);

        let data = source
            .load(&self.client, self.config.max_document_bytes)
            .await?;

        let parser = self.parser.clone();
        let min_text_length = self.config.min_text_length;

        // lopdf and pdf-extract are CPU-bound and may panic on hostile input
        tokio::task::spawn_blocking(move || parse_pdf(&data, &parser, min_text_length))
            .await
            .map_err(|e| ExtractionError::Task(e.to_string()))?
    }
}

#[async_trait]
impl DocumentExtractor for PdfDocumentExtractor {
    async fn extract(&self, file_ref: &str) -> Result<FieldMapping> {
        let document = self.extract_document(file_ref).await?;
        Ok(document.result.fields)
    }
}

fn parse_pdf(
    data: &[u8],
    parser: &RuleBasedParser,
    min_text_length: usize,
) -> Result<ExtractedDocument> {
    let mut pdf = PdfExtractor::new();
    pdf.load(data)?;
    let content = pdf.extract_all()?;

    let meaningful = content.meaningful_len();
    if meaningful < min_text_length {
        debug!(
            "Only {} meaningful characters, need {}",
            meaningful, min_text_length
        );
        return Err(ExtractionError::NoText);
    }

    let result = parser.parse(&content.text)?;
    for warning in &result.warnings {
        debug!("{}", warning);
    }

    Ok(ExtractedDocument {
        page_count: content.page_count,
        text: content.text,
        result,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fields;
    use crate::pdf::testing::pdf_with_lines;
    use std::io::Write;

    fn pdf_file(lines: &[&str]) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".pdf").tempfile().unwrap();
        file.write_all(&pdf_with_lines(lines)).unwrap();
        file
    }

    #[tokio::test]
    async fn test_extract_fields_from_pdf() {
        let file = pdf_file(&[
            "Acme Supplies",
            "Invoice Number: INV-1",
            "Invoice Date: 2024-03-01",
            "Total: 42.50",
        ]);

        let extractor = PdfDocumentExtractor::new(PdfConfig::default()).unwrap();
        let fields = extractor
            .extract(file.path().to_str().unwrap())
            .await
            .unwrap();

        assert_eq!(fields.text(fields::INVOICE_NUMBER).as_deref(), Some("INV-1"));
        assert_eq!(fields.text(fields::INVOICE_DATE).as_deref(), Some("2024-03-01"));
        assert_eq!(fields.text(fields::TOTAL_AMOUNT).as_deref(), Some("42.50"));
        assert!(!fields.contains(fields::DUE_DATE));
    }

    #[tokio::test]
    async fn test_short_text_is_no_text() {
        let file = pdf_file(&["Hi"]);

        let extractor = PdfDocumentExtractor::new(PdfConfig::default()).unwrap();
        let err = extractor
            .extract(file.path().to_str().unwrap())
            .await
            .unwrap_err();

        assert!(matches!(err, ExtractionError::NoText));
        assert_eq!(err.to_string(), "no text could be extracted from the PDF");
    }

    #[tokio::test]
    async fn test_not_a_pdf() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"plain text, not a PDF").unwrap();

        let extractor = PdfDocumentExtractor::new(PdfConfig::default()).unwrap();
        let err = extractor
            .extract(file.path().to_str().unwrap())
            .await
            .unwrap_err();

        assert!(matches!(err, ExtractionError::Pdf(_)));
    }

    #[tokio::test]
    async fn test_size_limit_applies() {
        let file = pdf_file(&["Acme Supplies", "Total: 42.50"]);
        let config = PdfConfig {
            max_document_bytes: 32,
            ..PdfConfig::default()
        };

        let extractor = PdfDocumentExtractor::new(config).unwrap();
        let err = extractor
            .extract(file.path().to_str().unwrap())
            .await
            .unwrap_err();

        assert!(matches!(err, ExtractionError::TooLarge { limit: 32, .. }));
    }
}
