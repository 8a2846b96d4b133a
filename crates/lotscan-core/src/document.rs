//! Document reading: one document in, ordered page texts out.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::DocumentError;

/// Plain text of one page. Page order is significant.
pub type PageText = String;

/// Result type for document reading.
pub type Result<T> = std::result::Result<T, DocumentError>;

/// Form feed, the page separator of plain-text catalog exports.
pub const PAGE_BREAK: char = '\x0C';

/// Trait for document readers.
pub trait DocumentReader: Send + Sync {
    /// Extract the page texts of a document, in page order.
    fn extract_page_texts(&self, path: &Path) -> Result<Vec<PageText>>;
}

/// Reader that dispatches on the file extension.
///
/// `.pdf` goes through the PDF text layer, `.txt` is split on form feeds.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileDocumentReader;

impl FileDocumentReader {
    pub fn new() -> Self {
        Self
    }
}

impl DocumentReader for FileDocumentReader {
    fn extract_page_texts(&self, path: &Path) -> Result<Vec<PageText>> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        let pages = match extension.as_str() {
            "pdf" => read_pdf(path)?,
            "txt" | "text" => split_pages(&fs::read_to_string(path)?),
            _ => return Err(DocumentError::Unsupported(extension)),
        };

        if pages.iter().all(|p| p.trim().is_empty()) {
            return Err(DocumentError::NoText);
        }

        debug!("Read {} pages from {}", pages.len(), path.display());
        Ok(pages)
    }
}

#[cfg(feature = "pdf")]
fn read_pdf(path: &Path) -> Result<Vec<PageText>> {
    use crate::pdf::{PdfExtractor, PdfProcessor};

    let data = fs::read(path)?;
    let mut extractor = PdfExtractor::new();
    extractor.load(&data)?;
    extractor.extract_pages()
}

#[cfg(not(feature = "pdf"))]
fn read_pdf(_path: &Path) -> Result<Vec<PageText>> {
    Err(DocumentError::Unsupported("pdf (built without the `pdf` feature)".to_string()))
}

/// Split exported text into pages on form feeds.
pub fn split_pages(text: &str) -> Vec<PageText> {
    text.split(PAGE_BREAK).map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_split_pages() {
        let pages = split_pages("first page\n\x0Csecond page\x0C");
        assert_eq!(pages, vec!["first page\n", "second page", ""]);
    }

    #[test]
    fn test_read_text_export() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.txt");
        fs::write(&path, "Jonas Wood\nTitle Untitled\x0CMedium Oil on canvas").unwrap();

        let pages = FileDocumentReader::new().extract_page_texts(&path).unwrap();
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[1], "Medium Oil on canvas");
    }

    #[test]
    fn test_blank_document_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blank.txt");
        fs::write(&path, "  \n\x0C\n").unwrap();

        let err = FileDocumentReader::new().extract_page_texts(&path).unwrap_err();
        assert!(matches!(err, DocumentError::NoText));
    }

    #[test]
    fn test_unsupported_extension() {
        let err = FileDocumentReader::new()
            .extract_page_texts(Path::new("catalog.docx"))
            .unwrap_err();
        assert!(matches!(err, DocumentError::Unsupported(ext) if ext == "docx"));
    }
}
