//! Year of work extraction.

use super::patterns::{
    YEAR_CREATED_IN, YEAR_DATED, YEAR_LABELED, YEAR_SIGNATURE_CORNER, YEAR_SIGNED_DATED,
};
use super::{ExtractionMatch, FieldExtractor, Result, RuleCascade};

/// Four-digit year of the work.
pub struct YearExtractor {
    rules: RuleCascade,
}

impl YearExtractor {
    pub fn new() -> Self {
        Self {
            rules: RuleCascade::new("year")
                .with_pattern("year_marker", &YEAR_LABELED)
                .with_pattern("dated", &YEAR_DATED)
                .with_pattern("signed_and_dated", &YEAR_SIGNED_DATED)
                .with_pattern("signature_corner", &YEAR_SIGNATURE_CORNER)
                .with_pattern("created_in", &YEAR_CREATED_IN),
        }
    }
}

impl Default for YearExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for YearExtractor {
    type Output = String;

    fn field(&self) -> &'static str {
        self.rules.field()
    }

    fn extract(&self, segment: &str) -> Result<Option<ExtractionMatch<String>>> {
        Ok(self
            .rules
            .first_match(segment)
            .map(|m| m.map(|caps| caps.group(0).to_string())))
    }
}
