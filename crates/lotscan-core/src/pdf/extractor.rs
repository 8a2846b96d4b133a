//! PDF text extraction using lopdf and pdf-extract.

use lopdf::Document;
use tracing::{debug, trace, warn};

use super::{PdfProcessor, Result};
use crate::document::{PageText, PAGE_BREAK};
use crate::error::DocumentError;

/// PDF text extractor using lopdf, with pdf-extract as the whole-document fallback.
pub struct PdfExtractor {
    document: Option<Document>,
    raw_data: Vec<u8>,
}

impl PdfExtractor {
    /// Create a new PDF extractor.
    pub fn new() -> Self {
        Self {
            document: None,
            raw_data: Vec::new(),
        }
    }

    fn document(&self) -> Result<&Document> {
        self.document
            .as_ref()
            .ok_or_else(|| DocumentError::Parse("No document loaded".to_string()))
    }

    /// Split pdf-extract output into pages, padding to the real page count.
    fn fallback_pages(&self) -> Result<Vec<PageText>> {
        let text = self.extract_text()?;
        let page_count = self.page_count() as usize;

        let mut pages: Vec<PageText> = if text.contains(PAGE_BREAK) {
            text.split(PAGE_BREAK).map(str::to_string).collect()
        } else {
            vec![text]
        };

        while pages.len() < page_count {
            pages.push(String::new());
        }

        Ok(pages)
    }
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfProcessor for PdfExtractor {
    fn load(&mut self, data: &[u8]) -> Result<()> {
        let mut doc = Document::load_mem(data).map_err(|e| DocumentError::Parse(e.to_string()))?;

        // Handle PDFs with empty password encryption
        if doc.is_encrypted() {
            if doc.decrypt("").is_err() {
                return Err(DocumentError::Encrypted);
            }
            debug!("Decrypted PDF with empty password");

            // pdf-extract needs the decrypted bytes
            let mut decrypted_data = Vec::new();
            doc.save_to(&mut decrypted_data)
                .map_err(|e| DocumentError::Parse(format!("Failed to save decrypted PDF: {}", e)))?;
            self.raw_data = decrypted_data;
        } else {
            self.raw_data = data.to_vec();
        }

        let page_count = doc.get_pages().len();
        if page_count == 0 {
            return Err(DocumentError::NoPages);
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
            .map_err(|e| DocumentError::TextExtraction(e.to_string()))
    }

    fn extract_page_text(&self, page: u32) -> Result<String> {
        let doc = self.document()?;
        if page == 0 || page > self.page_count() {
            return Err(DocumentError::TextExtraction(format!("invalid page number: {}", page)));
        }

        doc.extract_text(&[page])
            .map_err(|e| DocumentError::TextExtraction(e.to_string()))
    }

    fn extract_pages(&self) -> Result<Vec<PageText>> {
        let page_count = self.page_count();
        if page_count == 0 {
            return Err(DocumentError::NoPages);
        }

        let mut pages = Vec::with_capacity(page_count as usize);
        for page in 1..=page_count {
            match self.extract_page_text(page) {
                Ok(text) => {
                    trace!("Page {}: {} chars", page, text.len());
                    pages.push(text);
                }
                Err(e) => {
                    warn!("Failed to extract text from page {}: {}", page, e);
                    pages.push(String::new());
                }
            }
        }

        // Fonts lopdf cannot decode leave every page blank
        if pages.iter().all(|p| p.trim().is_empty()) {
            debug!("Per-page extraction found no text, falling back to pdf-extract");
            return self.fallback_pages();
        }

        Ok(pages)
    }
}
