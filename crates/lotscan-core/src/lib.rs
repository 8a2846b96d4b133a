//! Core library for auction catalog extraction.
//!
//! This crate provides:
//! - Document reading (PDF text layer and plain-text exports, page by page)
//! - Catalog text normalization with boundary and field markers
//! - Lot segmentation (artist-name or lot-index anchored)
//! - Per-field rule cascades for artist, title, medium, year, dimensions, sale, prices
//! - Flat table output (CSV, JSON)

pub mod error;
pub mod models;
pub mod document;
#[cfg(feature = "pdf")]
pub mod pdf;
pub mod catalog;
pub mod table;

pub use error::{LotscanError, Result};
pub use models::record::{AuctionRecord, Dataset, Dimensions, SaleInfo, COLUMNS};
pub use models::config::{LotscanConfig, ExtractionConfig, SegmentationMode, ValidityGate};
pub use document::{DocumentReader, FileDocumentReader, PageText};
pub use catalog::{
    DocumentOutcome, DocumentReport, FailedDocument, FieldProvenance, LotExtraction, LotExtractor,
    NormalizedText, RecordAssembler, RecordSegmenter, RunReport, Segment, TextNormalizer,
};
pub use table::{CsvTableWriter, JsonTableWriter, TableFormat, TableWriter};
