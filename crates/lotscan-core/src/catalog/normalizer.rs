//! Catalog text normalization.

use std::fmt;

use regex::{Captures, Regex};
use tracing::trace;

use super::markers::{FieldLabel, BOUNDARY_MARKER};
use super::rules::patterns::{
    BIRTH_YEAR, CURRENCY_PREMIUM, FIELD_LABEL, INDEX_ANCHOR_LINE, LOT_BRACKET, SENTINEL_ATS,
    SENTINEL_HASHES, WHITESPACE,
};
use super::Result;
use crate::document::PageText;
use crate::models::config::{ExtractionConfig, SegmentationMode};

/// Whitespace-collapsed catalog text carrying boundary and field markers.
///
/// Source text never contains a marker: sentinel look-alikes are escaped
/// before any marker is inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedText(String);

impl NormalizedText {
    pub(crate) fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Number of lot boundaries found.
    pub fn boundary_count(&self) -> usize {
        self.0.matches(BOUNDARY_MARKER).count()
    }
}

impl AsRef<str> for NormalizedText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NormalizedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Turns page texts into [`NormalizedText`].
#[derive(Debug, Clone)]
pub struct TextNormalizer {
    mode: SegmentationMode,
    /// Single-pass roster matcher; `None` for an empty roster.
    roster: Option<Regex>,
}

impl TextNormalizer {
    /// Create a normalizer for a segmentation mode and artist roster.
    pub fn new<S: AsRef<str>>(mode: SegmentationMode, roster: &[S]) -> Result<Self> {
        Ok(Self {
            mode,
            roster: roster_pattern(roster)?,
        })
    }

    pub fn from_config(config: &ExtractionConfig) -> Result<Self> {
        Self::new(config.segmentation_mode, &config.artist_roster)
    }

    pub fn mode(&self) -> SegmentationMode {
        self.mode
    }

    /// Normalize the pages of one document.
    pub fn normalize(&self, pages: &[PageText]) -> NormalizedText {
        let text = pages.join("\n");

        let text = SENTINEL_HASHES.replace_all(&text, "#");
        let text = SENTINEL_ATS.replace_all(&text, "@");

        // Lot index lines only exist before whitespace is collapsed
        let text = match self.mode {
            SegmentationMode::IndexAnchored => {
                let marked = INDEX_ANCHOR_LINE.replace_all(&text, |caps: &Captures| {
                    format!("{}{} {}", BOUNDARY_MARKER, &caps[1], &caps[2])
                });
                trace!("Marked {} lot index lines", count_markers(&marked));
                marked.into_owned()
            }
            SegmentationMode::NameAnchored => text.into_owned(),
        };

        let text = WHITESPACE.replace_all(&text, " ");
        let mut text = text.trim().to_string();

        if self.mode == SegmentationMode::NameAnchored {
            if let Some(roster) = &self.roster {
                text = roster
                    .replace_all(&text, format!("\n{}${{1}}", BOUNDARY_MARKER).as_str())
                    .into_owned();
                trace!("Marked {} roster names", count_markers(&text));
            }
        }

        let text = FIELD_LABEL.replace_all(&text, |caps: &Captures| {
            FieldLabel::from_label(&caps[1])
                .map(|field| field.marker().to_string())
                .unwrap_or_else(|| caps[0].to_string())
        });

        let text = BIRTH_YEAR.replace_all(&text, "born ${1}");
        let text = LOT_BRACKET.replace_all(&text, "\n[Lot");
        let text = CURRENCY_PREMIUM.replace_all(&text, "${1}");

        NormalizedText::new(text.into_owned())
    }
}

/// Build `(?:\b\d+\s+)?(\bLongest Name\b|...|\bShort\b)`, consuming a lot index before the name.
///
/// A word boundary is only asserted on a name edge that is a word character, so
/// names like "Scott Kahn Jr." or "(Anon)" still match.
fn roster_pattern<S: AsRef<str>>(roster: &[S]) -> Result<Option<Regex>> {
    let mut names: Vec<&str> = roster
        .iter()
        .map(|name| name.as_ref().trim())
        .filter(|name| !name.is_empty())
        .collect();
    if names.is_empty() {
        return Ok(None);
    }

    names.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
    names.dedup();

    let alternatives = names
        .iter()
        .map(|name| bounded(name))
        .collect::<Vec<_>>()
        .join("|");

    Ok(Some(Regex::new(&format!(r"(?:\b\d+\s+)?({})", alternatives))?))
}

fn bounded(name: &str) -> String {
    let is_word = |c: Option<char>| c.is_some_and(|c| c.is_alphanumeric() || c == '_');
    let start = if is_word(name.chars().next()) { r"\b" } else { "" };
    let end = if is_word(name.chars().next_back()) { r"\b" } else { "" };
    format!("{}{}{}", start, regex::escape(name), end)
}

fn count_markers(text: &str) -> usize {
    text.matches(BOUNDARY_MARKER).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn pages(texts: &[&str]) -> Vec<PageText> {
        texts.iter().map(|t| t.to_string()).collect()
    }

    fn name_anchored(roster: &[&str]) -> TextNormalizer {
        TextNormalizer::new(SegmentationMode::NameAnchored, roster).unwrap()
    }

    #[test]
    fn test_roster_names_marked() {
        let normalizer = name_anchored(&["Jonas Wood", "Lucy Bull"]);
        let text = normalizer.normalize(&pages(&[
            "Evening Sale\n12 Jonas Wood\nTitle: Untitled",
            "13  Lucy Bull Title Rise",
        ]));
        assert_eq!(
            text.as_str(),
            "Evening Sale \n@@@@Jonas Wood ###TITLE### Untitled \n@@@@Lucy Bull ###TITLE### Rise"
        );
        assert_eq!(text.boundary_count(), 2);
    }

    #[test]
    fn test_longest_name_wins() {
        let normalizer = name_anchored(&["Bas", "Hernan Bas"]);
        let text = normalizer.normalize(&pages(&["Hernan Bas and Bas"]));
        assert_eq!(text.as_str(), "\n@@@@Hernan Bas and \n@@@@Bas");
    }

    #[test]
    fn test_roster_names_with_punctuation_edges() {
        let normalizer = name_anchored(&["Scott Kahn Jr.", "(Anon)"]);
        let text = normalizer.normalize(&pages(&["Scott Kahn Jr. Title Moon\n(Anon) Title Sun"]));
        assert_eq!(
            text.as_str(),
            "\n@@@@Scott Kahn Jr. ###TITLE### Moon \n@@@@(Anon) ###TITLE### Sun"
        );
        assert_eq!(text.boundary_count(), 2);
    }

    #[test]
    fn test_empty_roster_inserts_nothing() {
        let normalizer = name_anchored(&[]);
        let text = normalizer.normalize(&pages(&["Jonas Wood Title Untitled"]));
        assert_eq!(text.boundary_count(), 0);
        assert_eq!(text.as_str(), "Jonas Wood ###TITLE### Untitled");
    }

    #[test]
    fn test_sentinels_escaped_before_markers() {
        let normalizer = name_anchored(&["Jonas Wood"]);
        let text = normalizer.normalize(&pages(&["#### note @@@@@ Jonas Wood"]));
        assert_eq!(text.as_str(), "# note @ \n@@@@Jonas Wood");
        assert_eq!(text.boundary_count(), 1);
    }

    #[test]
    fn test_field_labels_word_bounded() {
        let normalizer = name_anchored(&[]);
        let text = normalizer.normalize(&pages(&[
            "Subtitle Year of Work: 2015 Sold For 10 USD Estimated Sale of Christie's",
        ]));
        assert_eq!(
            text.as_str(),
            "Subtitle ###YEAR### 2015 ###SOLD### 10 USD Estimated ###SALE### Christie's"
        );
    }

    #[test]
    fn test_fixed_normalizations() {
        let normalizer = name_anchored(&[]);
        let text = normalizer.normalize(&pages(&[
            "(b. 1982) Sotheby's [Lot 4] Sold For 1,000 GBP Premium b. late",
        ]));
        assert_eq!(
            text.as_str(),
            "(born 1982) Sotheby's \n[Lot 4] ###SOLD### 1,000 GBP b. late"
        );
    }

    #[test]
    fn test_index_lines_marked_before_collapse() {
        let normalizer = TextNormalizer::new::<&str>(SegmentationMode::IndexAnchored, &[]).unwrap();
        let text = normalizer.normalize(&pages(&[
            "Contemporary Art\n12 Jonas Wood\nTitle Untitled\n40 in.",
            "13 Lucy Bull\r\nTitle Rise",
        ]));
        assert_eq!(
            text.as_str(),
            "Contemporary Art @@@@12 Jonas Wood ###TITLE### Untitled 40 in. @@@@13 Lucy Bull ###TITLE### Rise"
        );
    }

    #[test]
    fn test_index_mode_ignores_roster() {
        let normalizer =
            TextNormalizer::new(SegmentationMode::IndexAnchored, &["Jonas Wood"]).unwrap();
        let text = normalizer.normalize(&pages(&["Lot by Jonas Wood"]));
        assert_eq!(text.boundary_count(), 0);
    }
}
