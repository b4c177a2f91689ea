//! PDF text rendering using lopdf and pdf-extract.

use lopdf::Document;
use tracing::{debug, warn};

use super::{PdfProcessor, Result};
use crate::error::PdfError;

/// PDF text extractor.
///
/// lopdf validates and, when needed, decrypts the document; pdf-extract
/// renders the text from the resulting bytes.
pub struct PdfExtractor {
    document: Option<Document>,
    raw_data: Vec<u8>,
}

/// Rendered content of a PDF.
#[derive(Debug, Clone)]
pub struct PdfContent {
    /// Number of pages.
    pub page_count: u32,
    /// Rendered text of the whole document.
    pub text: String,
}

impl PdfContent {
    /// Whether the text is too short to hold a table (likely a scan).
    pub fn is_sparse(&self, min_text_length: usize) -> bool {
        self.text.trim().len() < min_text_length
    }
}

impl PdfExtractor {
    /// Create a new PDF extractor.
    pub fn new() -> Self {
        Self {
            document: None,
            raw_data: Vec::new(),
        }
    }

    /// Load `data` and render it in one go.
    pub fn render(data: &[u8]) -> Result<PdfContent> {
        let mut extractor = Self::new();
        extractor.load(data)?;
        extractor.extract_all()
    }

    /// Extract all content from the loaded PDF.
    pub fn extract_all(&self) -> Result<PdfContent> {
        if self.document.is_none() {
            return Err(PdfError::Parse("No document loaded".to_string()));
        }

        let page_count = self.page_count();
        let text = self.extract_text()?;

        debug!("Rendered {} pages into {} chars of text", page_count, text.len());
        if text.trim().is_empty() {
            warn!("PDF produced no text; it may be a scanned document");
        }

        Ok(PdfContent { page_count, text })
    }
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfProcessor for PdfExtractor {
    fn load(&mut self, data: &[u8]) -> Result<()> {
        let mut doc = Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;

        // Handle PDFs with empty password encryption
        if doc.is_encrypted() {
            if doc.decrypt("").is_err() {
                return Err(PdfError::Encrypted);
            }
            debug!("Decrypted PDF with empty password");

            // Save decrypted document to raw_data for pdf_extract
            let mut decrypted_data = Vec::new();
            doc.save_to(&mut decrypted_data)
                .map_err(|e| PdfError::Parse(format!("Failed to save decrypted PDF: {}", e)))?;
            self.raw_data = decrypted_data;
        } else {
            self.raw_data = data.to_vec();
        }

        let page_count = doc.get_pages().len();
        if page_count == 0 {
            return Err(PdfError::NoPages);
        }

        debug!("Loaded PDF with {} pages", page_count);
        self.document = Some(doc);
        Ok(())
    }

    fn page_count(&self) -> u32 {
        self.document
            .as_ref()
            .map(|doc| doc.get_pages().len() as u32)
            .unwrap_or(0)
    }

    fn extract_text(&self) -> Result<String> {
        pdf_extract::extract_text_from_mem(&self.raw_data)
            .map_err(|e| PdfError::TextExtraction(e.to_string()))
    }
}
