//! Rule-based field extractors for auction catalog lots.
//!
//! Each field owns a [`RuleCascade`]: an ordered list of rules, strictest first.
//! The first rule that matches wins; later rules are only tried when every
//! earlier rule failed, and captures from two rules are never combined.

pub mod patterns;
pub mod text;
pub mod year;
pub mod dimensions;
pub mod sale;
pub mod prices;

pub use text::{ArtistExtractor, LabeledSpanExtractor};
pub use year::YearExtractor;
pub use dimensions::DimensionsExtractor;
pub use sale::SaleExtractor;
pub use prices::{EstimateExtractor, SoldPriceExtractor};
pub use patterns::*;

use regex::Regex;

use crate::error::ExtractionError;

/// Result type for field extraction.
pub type Result<T> = std::result::Result<T, ExtractionError>;

/// A single matching rule.
pub trait Rule: Send + Sync {
    /// Stable rule name, reported in field provenance.
    fn name(&self) -> &'static str;

    /// Try the rule against segment text.
    fn attempt(&self, text: &str) -> Option<RuleMatch>;
}

/// Captured values of a successful rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleMatch {
    groups: Vec<String>,
    position: (usize, usize),
}

impl RuleMatch {
    /// Create a match from already cleaned capture values.
    pub fn new(groups: Vec<String>, start: usize, end: usize) -> Self {
        Self {
            groups,
            position: (start, end),
        }
    }

    /// Capture value by index (0 = first capture group). Missing groups are empty.
    pub fn group(&self, index: usize) -> &str {
        self.groups.get(index).map(String::as_str).unwrap_or("")
    }

    pub fn groups(&self) -> &[String] {
        &self.groups
    }

    /// Byte range of the whole match in the segment.
    pub fn position(&self) -> (usize, usize) {
        self.position
    }
}

/// Rule backed by a compiled regex; every capture group becomes a cleaned value.
pub struct PatternRule {
    name: &'static str,
    pattern: &'static Regex,
}

impl PatternRule {
    pub fn new(name: &'static str, pattern: &'static Regex) -> Self {
        Self { name, pattern }
    }
}

impl Rule for PatternRule {
    fn name(&self) -> &'static str {
        self.name
    }

    fn attempt(&self, text: &str) -> Option<RuleMatch> {
        let caps = self.pattern.captures(text)?;
        let whole = caps.get(0)?;

        let groups = (1..caps.len())
            .map(|i| caps.get(i).map(|m| clean_text(m.as_str())).unwrap_or_default())
            .collect();

        Some(RuleMatch::new(groups, whole.start(), whole.end()))
    }
}

/// A value produced by one rule of a cascade.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionMatch<T> {
    /// Extracted value.
    pub value: T,
    /// Name of the rule that produced the value.
    pub rule: &'static str,
    /// Position of the rule in its cascade (0 = strictest).
    pub tier: usize,
    /// Position in source text.
    pub position: Option<(usize, usize)>,
}

impl<T> ExtractionMatch<T> {
    pub fn new(value: T, rule: &'static str, tier: usize) -> Self {
        Self {
            value,
            rule,
            tier,
            position: None,
        }
    }

    pub fn with_position(mut self, start: usize, end: usize) -> Self {
        self.position = Some((start, end));
        self
    }

    /// Convert the value, keeping its provenance.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ExtractionMatch<U> {
        ExtractionMatch {
            value: f(self.value),
            rule: self.rule,
            tier: self.tier,
            position: self.position,
        }
    }
}

/// Ordered rules for one field, evaluated lazily until one matches.
pub struct RuleCascade {
    field: &'static str,
    rules: Vec<Box<dyn Rule>>,
}

impl RuleCascade {
    pub fn new(field: &'static str) -> Self {
        Self {
            field,
            rules: Vec::new(),
        }
    }

    /// Append a rule after the existing ones.
    pub fn with_rule(mut self, rule: impl Rule + 'static) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Append a regex rule.
    pub fn with_pattern(self, name: &'static str, pattern: &'static Regex) -> Self {
        self.with_rule(PatternRule::new(name, pattern))
    }

    pub fn field(&self) -> &'static str {
        self.field
    }

    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// First matching rule, strictest first.
    pub fn first_match(&self, text: &str) -> Option<ExtractionMatch<RuleMatch>> {
        self.rules.iter().enumerate().find_map(|(tier, rule)| {
            rule.attempt(text).map(|m| {
                let (start, end) = m.position();
                ExtractionMatch::new(m, rule.name(), tier).with_position(start, end)
            })
        })
    }
}

/// Trait for per-field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Field name used in provenance and errors.
    fn field(&self) -> &'static str;

    /// Extract the field from one lot segment.
    ///
    /// `Ok(None)` means no rule matched; an error means a rule matched
    /// but its captures could not be turned into a value.
    fn extract(&self, segment: &str) -> Result<Option<ExtractionMatch<Self::Output>>>;
}

/// Collapse whitespace runs to single spaces and trim.
pub fn clean_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
