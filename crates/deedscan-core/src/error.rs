//! Error types for the deedscan-core library.
//!
//! Field extraction itself never fails; these errors come from the edges
//! (reading source documents, loading configuration, composing output).

use thiserror::Error;

/// Main error type for the deedscan library.
#[derive(Error, Debug)]
pub enum DeedscanError {
    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// Deed or PCOR composition error.
    #[error("composition error: {0}")]
    Compose(#[from] ComposeError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// County name outside the supported set.
    #[error("unsupported county: {0}")]
    InvalidCounty(String),
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

    /// The PDF is a scan with no text layer; it must go through OCR first.
    #[error("PDF has no text layer ({pages} scanned page(s)); run it through OCR first")]
    NoTextLayer { pages: u32 },
}

/// Errors raised while preparing deed or PCOR data.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ComposeError {
    /// Required field is empty.
    #[error("missing required field: {0}")]
    MissingField(String),
}

/// Result type for the deedscan library.
pub type Result<T> = std::result::Result<T, DeedscanError>;
