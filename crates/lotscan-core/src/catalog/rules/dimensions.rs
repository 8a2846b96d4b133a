//! Height and width extraction in inches and centimeters.
//!
//! All four values always come from the same rule.

use std::str::FromStr;

use rust_decimal::Decimal;

use super::patterns::{
    DIMENSIONS_ABBREVIATED, DIMENSIONS_EXACT, DIMENSIONS_LENIENT, DIMENSIONS_UNITLESS,
};
use super::{ExtractionMatch, FieldExtractor, Result, RuleCascade};
use crate::error::ExtractionError;
use crate::models::record::Dimensions;

/// Dimension extractor: exact layout first, keyword-ordered scan last.
pub struct DimensionsExtractor {
    rules: RuleCascade,
}

impl DimensionsExtractor {
    pub fn new() -> Self {
        Self {
            rules: RuleCascade::new("dimensions")
                .with_pattern("size_exact", &DIMENSIONS_EXACT)
                .with_pattern("size_unitless", &DIMENSIONS_UNITLESS)
                .with_pattern("size_abbreviated", &DIMENSIONS_ABBREVIATED)
                .with_pattern("size_lenient", &DIMENSIONS_LENIENT),
        }
    }
}

impl Default for DimensionsExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for DimensionsExtractor {
    type Output = Dimensions;

    fn field(&self) -> &'static str {
        self.rules.field()
    }

    fn extract(&self, segment: &str) -> Result<Option<ExtractionMatch<Dimensions>>> {
        let Some(m) = self.rules.first_match(segment) else {
            return Ok(None);
        };

        let rule = m.rule;
        let mut values = Vec::with_capacity(4);
        for index in 0..4 {
            values.push(parse_measure(m.value.group(index), rule)?);
        }

        let [height_in, width_in, height_cm, width_cm]: [String; 4] = values
            .try_into()
            .map_err(|_| ExtractionError::InconsistentMatch {
                field: "dimensions",
                rule,
                reason: "expected four measurements".to_string(),
            })?;

        Ok(Some(m.map(|_| Dimensions {
            height_in,
            width_in,
            height_cm,
            width_cm,
        })))
    }
}

/// Validate a captured measurement, dropping a trailing dot ("40." -> "40").
fn parse_measure(raw: &str, rule: &'static str) -> Result<String> {
    let value = raw.strip_suffix('.').unwrap_or(raw);

    Decimal::from_str(value).map_err(|e| ExtractionError::InconsistentMatch {
        field: "dimensions",
        rule,
        reason: format!("'{}' is not a decimal: {}", raw, e),
    })?;

    Ok(value.to_string())
}
