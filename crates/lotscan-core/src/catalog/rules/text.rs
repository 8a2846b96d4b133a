//! Free-text fields: artist, title, medium.

use super::patterns::{ARTIST_INDEXED, MEDIUM_SPAN, TITLE_SPAN};
use super::{clean_text, ExtractionMatch, FieldExtractor, Result, Rule, RuleCascade, RuleMatch};
use crate::catalog::markers::FIELD_MARKER_DELIMITER;
use crate::models::config::SegmentationMode;

/// Text on the first line of a segment, up to the first field marker.
///
/// A leading numeric lot index is dropped.
pub struct LeadingTextRule;

impl Rule for LeadingTextRule {
    fn name(&self) -> &'static str {
        "leading_text"
    }

    fn attempt(&self, text: &str) -> Option<RuleMatch> {
        let offset = text.len() - text.trim_start().len();
        let first_line = text[offset..].lines().next()?;
        let head = first_line
            .split(FIELD_MARKER_DELIMITER)
            .next()
            .unwrap_or(first_line);

        let value = clean_text(strip_lot_index(head));
        if value.is_empty() {
            return None;
        }

        Some(RuleMatch::new(vec![value], offset, offset + head.len()))
    }
}

/// Drop a leading "12 " lot index.
fn strip_lot_index(text: &str) -> &str {
    let trimmed = text.trim_start();
    let digits = trimmed.len() - trimmed.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    if digits == 0 {
        return trimmed;
    }

    let rest = &trimmed[digits..];
    if rest.starts_with(char::is_whitespace) {
        rest.trim_start()
    } else {
        trimmed
    }
}

/// Artist name extractor.
pub struct ArtistExtractor {
    rules: RuleCascade,
}

impl ArtistExtractor {
    /// Index-anchored segments start with "<index> <name>"; name-anchored ones with the name.
    pub fn new(mode: SegmentationMode) -> Self {
        let rules = match mode {
            SegmentationMode::NameAnchored => RuleCascade::new("artist").with_rule(LeadingTextRule),
            SegmentationMode::IndexAnchored => RuleCascade::new("artist")
                .with_pattern("indexed_name", &ARTIST_INDEXED)
                .with_rule(LeadingTextRule),
        };
        Self { rules }
    }
}

impl Default for ArtistExtractor {
    fn default() -> Self {
        Self::new(SegmentationMode::default())
    }
}

impl FieldExtractor for ArtistExtractor {
    type Output = String;

    fn field(&self) -> &'static str {
        self.rules.field()
    }

    fn extract(&self, segment: &str) -> Result<Option<ExtractionMatch<String>>> {
        Ok(self
            .rules
            .first_match(segment)
            .map(|m| m.map(|caps| caps.group(0).to_string()))
            .filter(|m| !m.value.is_empty()))
    }
}

/// Text following a field marker, up to the next marker.
pub struct LabeledSpanExtractor {
    rules: RuleCascade,
}

impl LabeledSpanExtractor {
    /// Title: up to the next marker or end of segment.
    pub fn title() -> Self {
        Self {
            rules: RuleCascade::new("title").with_pattern("title_marker", &TITLE_SPAN),
        }
    }

    /// Medium: up to the next marker or line break.
    pub fn medium() -> Self {
        Self {
            rules: RuleCascade::new("medium").with_pattern("medium_marker", &MEDIUM_SPAN),
        }
    }
}

impl FieldExtractor for LabeledSpanExtractor {
    type Output = String;

    fn field(&self) -> &'static str {
        self.rules.field()
    }

    fn extract(&self, segment: &str) -> Result<Option<ExtractionMatch<String>>> {
        Ok(self
            .rules
            .first_match(segment)
            .map(|m| m.map(|caps| caps.group(0).to_string()))
            .filter(|m| !m.value.is_empty()))
    }
}
