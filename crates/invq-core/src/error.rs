//! Error types for the invq-core library.

use thiserror::Error;

/// Main error type for the invq library.
#[derive(Error, Debug)]
pub enum InvqError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to PDF processing.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,
}

/// Errors raised while turning a file reference into a field mapping.
///
/// The request handler reports these to callers by their `Display` text only,
/// so the messages are written to stand on their own.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// The HTTP client used for downloads could not be created.
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// The document could not be downloaded.
    #[error("failed to fetch {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The document host answered with a non-success status.
    #[error("failed to fetch {url}: HTTP {status}")]
    HttpStatus { url: String, status: u16 },

    /// The document could not be read from disk.
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The document exceeds the configured size limit.
    #[error("document is {size} bytes, limit is {limit} bytes")]
    TooLarge { size: u64, limit: u64 },

    /// The PDF itself could not be processed.
    #[error(transparent)]
    Pdf(#[from] PdfError),

    /// The PDF was readable but contained no usable text.
    #[error("no text could be extracted from the PDF")]
    NoText,

    /// The blocking extraction task did not complete.
    #[error("extraction task failed: {0}")]
    Task(String),

    /// Any other failure, reported verbatim.
    #[error("{0}")]
    Other(String),
}

/// Errors raised while building an invoice record from extracted fields.
#[derive(Error, Debug, PartialEq)]
pub enum FieldError {
    /// A numeric field held a value that is not a number.
    #[error("could not convert {field} to a number: {value}")]
    NotANumber { field: String, value: String },
}

/// Result type for the invq library.
pub type Result<T> = std::result::Result<T, InvqError>;
