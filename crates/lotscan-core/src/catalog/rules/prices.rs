//! Estimate and sold price extraction.

use super::patterns::{DISPOSITION_TOKENS, ESTIMATE_RANGE, SOLD_AMOUNT, SOLD_WITH_USD_EQUIVALENT};
use super::{ExtractionMatch, FieldExtractor, Result, Rule, RuleCascade, RuleMatch};
use crate::catalog::markers::FieldLabel;
use crate::models::config::SegmentationMode;

/// Estimate range in its original currency, e.g. "50,000-70,000 USD".
pub struct EstimateExtractor {
    rules: RuleCascade,
}

impl EstimateExtractor {
    pub fn new() -> Self {
        Self {
            rules: RuleCascade::new("estimate_price").with_pattern("estimate_range", &ESTIMATE_RANGE),
        }
    }
}

impl Default for EstimateExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for EstimateExtractor {
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

/// A lot that did not sell for a price: "###SOLD### Bought In".
pub struct DispositionRule {
    token: &'static str,
    name: &'static str,
}

impl DispositionRule {
    pub fn new(token: &'static str) -> Self {
        let name = match token {
            "Bought In" => "bought_in",
            "Withdrawn" => "withdrawn",
            "Passed" => "passed",
            "Not Sold" => "not_sold",
            _ => "disposition",
        };
        Self { token, name }
    }
}

impl Rule for DispositionRule {
    fn name(&self) -> &'static str {
        self.name
    }

    fn attempt(&self, text: &str) -> Option<RuleMatch> {
        let marker = FieldLabel::SoldFor.marker();

        text.match_indices(marker).find_map(|(start, _)| {
            let after = &text[start + marker.len()..];
            let rest = after.trim_start();
            if !rest.starts_with(self.token) {
                return None;
            }
            let end = start + marker.len() + (after.len() - rest.len()) + self.token.len();
            Some(RuleMatch::new(vec![self.token.to_string()], start, end))
        })
    }
}

/// Sold price, or the disposition of an unsold lot.
pub struct SoldPriceExtractor {
    rules: RuleCascade,
}

impl SoldPriceExtractor {
    /// Index-anchored catalogs also print a USD equivalent, which is kept.
    pub fn new(mode: SegmentationMode) -> Self {
        let mut rules = RuleCascade::new("sold_price");
        if mode == SegmentationMode::IndexAnchored {
            rules = rules.with_pattern("sold_with_usd", &SOLD_WITH_USD_EQUIVALENT);
        }
        rules = rules.with_pattern("sold_amount", &SOLD_AMOUNT);
        for token in DISPOSITION_TOKENS {
            rules = rules.with_rule(DispositionRule::new(token));
        }
        Self { rules }
    }
}

impl Default for SoldPriceExtractor {
    fn default() -> Self {
        Self::new(SegmentationMode::default())
    }
}

impl FieldExtractor for SoldPriceExtractor {
    type Output = String;

    fn field(&self) -> &'static str {
        self.rules.field()
    }

    fn extract(&self, segment: &str) -> Result<Option<ExtractionMatch<String>>> {
        Ok(self.rules.first_match(segment).map(|m| {
            m.map(|caps| match caps.group(1) {
                "" => caps.group(0).to_string(),
                usd => format!("{} ({})", caps.group(0), usd),
            })
        }))
    }
}
