//! Document-level pipeline: normalize, segment, extract, gate, write.

use std::path::Path;

use serde::Serialize;
use tracing::{debug, info, warn};

use super::extractor::LotExtractor;
use super::normalizer::TextNormalizer;
use super::segmenter::RecordSegmenter;
use crate::document::{DocumentReader, PageText};
use crate::error::{DocumentError, LotscanError};
use crate::models::config::{ExtractionConfig, ValidityGate};
use crate::models::record::{AuctionRecord, Dataset};
use crate::table::TableWriter;

/// Characters of segment text included in skip warnings.
const LEADING_TEXT_CHARS: usize = 200;

/// Counts for one processed document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DocumentReport {
    /// Document name (file name for files on disk).
    pub source: String,
    pub pages: usize,
    pub segments: usize,
    /// Records that passed the validity gate.
    pub records: usize,
    /// Segments rejected by the validity gate.
    pub discarded: usize,
    /// Segments skipped because a field rule failed.
    pub skipped: usize,
}

/// Records of one document and its report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentOutcome {
    pub records: Vec<AuctionRecord>,
    pub report: DocumentReport,
}

/// A document that could not be read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedDocument {
    pub source: String,
    pub reason: String,
}

/// Summary of a whole run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunReport {
    /// Reports of documents that were read, in input order.
    pub documents: Vec<DocumentReport>,
    pub failed: Vec<FailedDocument>,
    pub total_records: usize,
}

/// Turns catalog documents into one dataset.
pub struct RecordAssembler {
    normalizer: TextNormalizer,
    segmenter: RecordSegmenter,
    extractor: LotExtractor,
    gate: ValidityGate,
}

impl RecordAssembler {
    /// Build the pipeline. Mode and gate are fixed for every document of the run.
    pub fn new(config: &ExtractionConfig) -> crate::Result<Self> {
        Ok(Self {
            normalizer: TextNormalizer::from_config(config)?,
            segmenter: RecordSegmenter::new(config.segmentation_mode),
            extractor: LotExtractor::new(config.segmentation_mode),
            gate: config.field_validity_gate,
        })
    }

    pub fn normalizer(&self) -> &TextNormalizer {
        &self.normalizer
    }

    pub fn segmenter(&self) -> &RecordSegmenter {
        &self.segmenter
    }

    pub fn extractor(&self) -> &LotExtractor {
        &self.extractor
    }

    pub fn gate(&self) -> ValidityGate {
        self.gate
    }

    /// Run one document's pages through the pipeline.
    ///
    /// Never fails: failing segments are skipped and counted.
    pub fn process_pages(&self, source: &str, pages: &[PageText]) -> DocumentOutcome {
        let text = self.normalizer.normalize(pages);
        let segments = self.segmenter.segment(&text);

        let mut records = Vec::new();
        let mut report = DocumentReport {
            source: source.to_string(),
            pages: pages.len(),
            segments: segments.len(),
            ..Default::default()
        };

        for segment in &segments {
            match self.extractor.extract(segment) {
                Ok(extraction) => {
                    let record = extraction.record;
                    if self.gate.admits(&record.artist, &record.title) {
                        records.push(record);
                    } else {
                        debug!("{}: segment {} rejected by validity gate", source, segment.index());
                        report.discarded += 1;
                    }
                }
                Err(e) => {
                    warn!(
                        "{}: skipping segment {}: {} [{}]",
                        source,
                        segment.index(),
                        e,
                        segment.leading_text(LEADING_TEXT_CHARS)
                    );
                    report.skipped += 1;
                }
            }
        }

        report.records = records.len();
        if records.is_empty() {
            warn!("{}: no records extracted from {} segments", source, report.segments);
        } else {
            info!(
                "{}: {} records from {} segments ({} discarded, {} skipped)",
                source, report.records, report.segments, report.discarded, report.skipped
            );
        }

        DocumentOutcome { records, report }
    }

    /// Read one document and process its pages.
    pub fn process_document(
        &self,
        path: &Path,
        reader: &dyn DocumentReader,
    ) -> std::result::Result<DocumentOutcome, DocumentError> {
        let pages = reader.extract_page_texts(path)?;
        Ok(self.process_pages(&source_name(path), &pages))
    }

    /// Process documents in order and write one table.
    pub fn run<P: AsRef<Path>>(
        &self,
        documents: &[P],
        reader: &dyn DocumentReader,
        writer: &mut dyn TableWriter,
    ) -> crate::Result<RunReport> {
        if documents.is_empty() {
            return Err(LotscanError::NoDocuments("input set is empty".to_string()));
        }

        let results = documents
            .iter()
            .map(|path| {
                let path = path.as_ref();
                (source_name(path), self.process_document(path, reader))
            })
            .collect();

        Self::finish(results, writer)
    }

    /// Concatenate per-document results in the given order and write the table.
    ///
    /// Documents that failed to read are logged and reported, not fatal.
    pub fn finish(
        results: Vec<(String, std::result::Result<DocumentOutcome, DocumentError>)>,
        writer: &mut dyn TableWriter,
    ) -> crate::Result<RunReport> {
        if results.is_empty() {
            return Err(LotscanError::NoDocuments("input set is empty".to_string()));
        }

        let mut dataset = Dataset::new();
        let mut report = RunReport::default();

        for (source, result) in results {
            match result {
                Ok(outcome) => {
                    dataset.extend(outcome.records);
                    report.documents.push(outcome.report);
                }
                Err(e) => {
                    warn!("Skipping {}: {}", source, e);
                    report.failed.push(FailedDocument {
                        source,
                        reason: e.to_string(),
                    });
                }
            }
        }

        report.total_records = dataset.len();
        if dataset.is_empty() {
            warn!("No records extracted from {} documents", report.documents.len() + report.failed.len());
        }

        writer.write_table(dataset.records())?;
        Ok(report)
    }
}

/// File name of a document, or the whole path when it has none.
pub fn source_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
