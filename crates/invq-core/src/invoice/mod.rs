//! Invoice field extraction module.

mod document;
mod parser;
pub mod rules;

pub use document::{ExtractedDocument, PdfDocumentExtractor};
pub use parser::{ExtractionResult, InvoiceParser, RuleBasedParser};

use async_trait::async_trait;

use crate::error::ExtractionError;
use crate::models::FieldMapping;

/// Result type for extraction operations.
pub type Result<T> = std::result::Result<T, ExtractionError>;

/// Turns a file reference into structured invoice fields.
///
/// Fields that could not be found are left out of the mapping; filling in
/// defaults is the caller's job.
#[async_trait]
pub trait DocumentExtractor: Send + Sync {
    /// Extract invoice fields from the document behind `file_ref`.
    async fn extract(&self, file_ref: &str) -> Result<FieldMapping>;
}
