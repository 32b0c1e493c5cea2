//! Core library for invoice ingestion.
//!
//! This crate provides:
//! - PDF text extraction (lopdf + pdf-extract)
//! - Rule-based recognition of vendor, invoice number, dates and total
//! - The `DocumentExtractor` seam used by the request handler
//! - Invoice records and the configuration file model

pub mod error;
pub mod invoice;
pub mod models;
pub mod pdf;
pub mod source;

pub use error::{ExtractionError, FieldError, InvqError, PdfError, Result};
pub use invoice::{
    DocumentExtractor, ExtractedDocument, ExtractionResult, InvoiceParser, PdfDocumentExtractor,
    RuleBasedParser,
};
pub use models::{FieldMapping, InvoiceRecord, InvoiceStatus, InvqConfig, PdfConfig, ServerConfig};
pub use pdf::{PdfContent, PdfExtractor, PdfProcessor};
pub use source::DocumentSource;
