//! Error types for the lotscan-core library.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the lotscan library.
#[derive(Error, Debug)]
pub enum LotscanError {
    /// Document reading error.
    #[error("document error: {0}")]
    Document(#[from] DocumentError),

    /// Lot field extraction error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// Table output error.
    #[error("table error: {0}")]
    Table(#[from] TableError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// The input location does not exist or cannot be listed.
    #[error("input not found: {}", .0.display())]
    InputNotFound(PathBuf),

    /// No documents were handed to the run.
    #[error("no documents to process: {0}")]
    NoDocuments(String),
}

/// Errors related to reading a single document.
#[derive(Error, Debug)]
pub enum DocumentError {
    /// Failed to open/parse the document.
    #[error("failed to parse document: {0}")]
    Parse(String),

    /// Failed to extract text from the document.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The document is empty or has no pages.
    #[error("document has no pages")]
    NoPages,

    /// Every page of the document is empty.
    #[error("document yielded no text")]
    NoText,

    /// No reader for this kind of document.
    #[error("unsupported document type: {0}")]
    Unsupported(String),

    /// I/O error while reading the document.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while extracting fields from one lot segment.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// A rule matched but its captures are not usable.
    #[error("inconsistent match for {field} (rule {rule}): {reason}")]
    InconsistentMatch {
        field: &'static str,
        rule: &'static str,
        reason: String,
    },

    /// A pattern built at runtime failed to compile.
    #[error("invalid pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Errors related to writing the output table.
#[derive(Error, Debug)]
pub enum TableError {
    /// CSV serialization failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error while writing.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for the lotscan library.
pub type Result<T> = std::result::Result<T, LotscanError>;
