//! Lot segmentation of normalized catalog text.

use tracing::{debug, trace};

use super::markers::BOUNDARY_MARKER;
use super::normalizer::NormalizedText;
use super::rules::patterns::INDEX_FALLBACK_ANCHOR;
use crate::models::config::SegmentationMode;

/// Text of one candidate lot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    index: usize,
    text: String,
}

impl Segment {
    pub fn new(index: usize, text: impl Into<String>) -> Self {
        Self {
            index,
            text: text.into(),
        }
    }

    /// Position of the segment within its document.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// First `max_chars` characters, for log messages.
    pub fn leading_text(&self, max_chars: usize) -> &str {
        match self.text.char_indices().nth(max_chars) {
            Some((end, _)) => &self.text[..end],
            None => &self.text,
        }
    }
}

/// Splits normalized text into lot segments.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecordSegmenter {
    mode: SegmentationMode,
}

impl RecordSegmenter {
    pub fn new(mode: SegmentationMode) -> Self {
        Self { mode }
    }

    /// Split on boundary markers. Text before the first marker is not a lot.
    pub fn segment(&self, text: &NormalizedText) -> Vec<Segment> {
        let text = text.as_str();

        if !text.contains(BOUNDARY_MARKER) {
            return match self.mode {
                SegmentationMode::NameAnchored => {
                    debug!("No lot boundaries found");
                    Vec::new()
                }
                SegmentationMode::IndexAnchored => self.fallback_segments(text),
            };
        }

        let segments = collect_segments(text.split(BOUNDARY_MARKER).skip(1));
        debug!("Split text into {} segments", segments.len());
        segments
    }

    /// Anchor on "<index> <Name> ###TITLE###" when no index line survived.
    fn fallback_segments(&self, text: &str) -> Vec<Segment> {
        let starts: Vec<usize> = INDEX_FALLBACK_ANCHOR
            .captures_iter(text)
            .filter_map(|caps| caps.get(1))
            .map(|m| m.start())
            .collect();
        trace!("Fallback anchor matched {} times", starts.len());

        let pieces = starts.iter().enumerate().map(|(i, &start)| {
            let end = starts.get(i + 1).copied().unwrap_or(text.len());
            &text[start..end]
        });

        let segments = collect_segments(pieces);
        debug!("Fallback anchors gave {} segments", segments.len());
        segments
    }
}

fn collect_segments<'a>(pieces: impl Iterator<Item = &'a str>) -> Vec<Segment> {
    pieces
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .enumerate()
        .map(|(index, piece)| Segment::new(index, piece))
        .collect()
}
