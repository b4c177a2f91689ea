//! Error types for the qtotals-core library.

use thiserror::Error;

/// Main error type for the qtotals library.
#[derive(Error, Debug)]
pub enum QtError {
    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// Table extraction error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// Artifact emission error.
    #[error("emit error: {0}")]
    Emit(#[from] EmitError),

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

/// Errors related to table extraction.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// Not a single row survived classification and aggregation.
    #[error(
        "no qualifying-total rows extracted from {lines} lines ({orphans} orphan data lines); \
         the source layout has probably changed"
    )]
    NoRows { lines: usize, orphans: usize },
}

/// Errors related to artifact emission.
#[derive(Error, Debug)]
pub enum EmitError {
    /// JSON serialization failed.
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV serialization failed.
    #[error("CSV serialization failed: {0}")]
    Csv(#[from] csv::Error),

    /// Serialized output was not valid UTF-8.
    #[error("output is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// The declaration name is not a valid TypeScript identifier.
    #[error("invalid identifier for declaration: {0:?}")]
    InvalidIdentifier(String),
}

/// Result type for the qtotals library.
pub type Result<T> = std::result::Result<T, QtError>;
