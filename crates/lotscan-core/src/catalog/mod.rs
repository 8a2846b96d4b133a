//! Auction catalog lot extraction.
//!
//! Pages are normalized into one text blob with boundary and field markers,
//! split into lot segments, and each segment is turned into one record.

pub mod markers;
pub mod rules;
mod normalizer;
mod segmenter;
mod extractor;
mod assembler;

pub use normalizer::{NormalizedText, TextNormalizer};
pub use segmenter::{RecordSegmenter, Segment};
pub use extractor::{FieldProvenance, LotExtraction, LotExtractor};
pub use assembler::{
    source_name, DocumentOutcome, DocumentReport, FailedDocument, RecordAssembler, RunReport,
};

use crate::error::ExtractionError;

/// Result type for catalog operations.
pub type Result<T> = std::result::Result<T, ExtractionError>;
