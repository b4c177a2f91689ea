//! PDF processing module.

mod extractor;

pub use extractor::{PdfContent, PdfExtractor};

use crate::error::PdfError;

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, PdfError>;

/// Trait for PDF processing implementations.
pub trait PdfProcessor {
    /// Load a PDF from bytes.
    fn load(&mut self, data: &[u8]) -> Result<()>;

    /// Get the number of pages in the PDF.
    fn page_count(&self) -> u32;

    /// Render the whole document as newline-delimited text.
    fn extract_text(&self) -> Result<String>;
}
