//! Data models for the ingestion pipeline.

pub mod config;
pub mod fields;
pub mod invoice;

pub use config::{InvqConfig, PdfConfig, ServerConfig};
pub use fields::FieldMapping;
pub use invoice::{InvoiceRecord, InvoiceStatus};
