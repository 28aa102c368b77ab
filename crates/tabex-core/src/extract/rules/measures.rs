//! Quantity, weight and price extraction.

use std::str::FromStr;

use rust_decimal::Decimal;

use super::patterns::{PatternHit, PatternKind, PatternSet};
use super::{ExtractionMatch, FieldExtractor};
use crate::models::extraction::Measurement;

/// Extracts numeric measurements of one kind from text.
#[derive(Debug, Clone)]
pub struct MeasureExtractor {
    kind: PatternKind,
    patterns: PatternSet,
    confidence: f32,
}

impl MeasureExtractor {
    /// Create an extractor for a pattern kind.
    pub fn new(kind: PatternKind, patterns: PatternSet) -> Self {
        Self {
            kind,
            patterns,
            confidence: 0.9,
        }
    }

    /// Extractor for `qty:` labels and counted units.
    pub fn quantity(patterns: PatternSet) -> Self {
        Self::new(PatternKind::Quantity, patterns)
    }

    /// Extractor for lbs, kg and pounds.
    pub fn weight(patterns: PatternSet) -> Self {
        Self::new(PatternKind::Weight, patterns)
    }

    /// Extractor for dollar amounts.
    pub fn price(patterns: PatternSet) -> Self {
        Self::new(PatternKind::Price, patterns)
    }

    /// Set the confidence assigned to every match.
    pub fn with_confidence(mut self, confidence: f32) -> Self {
        self.confidence = confidence;
        self
    }

    /// First measurement in a single line, without match context.
    pub fn measure(&self, line: &str) -> Option<Measurement> {
        self.patterns
            .find_all(self.kind, line)
            .iter()
            .find_map(to_measurement)
    }
}

impl FieldExtractor for MeasureExtractor {
    type Output = ExtractionMatch<Measurement>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        self.patterns
            .find_all(self.kind, text)
            .iter()
            .filter_map(|hit| {
                to_measurement(hit).map(|m| {
                    ExtractionMatch::new(m, self.confidence, hit.text)
                        .with_position(hit.start, hit.end)
                })
            })
            .collect()
    }
}

fn to_measurement(hit: &PatternHit<'_>) -> Option<Measurement> {
    let value = parse_number(hit.value?)?;
    let unit = hit
        .unit
        .map(str::to_lowercase)
        .or_else(|| hit.default_unit.map(String::from));
    Some(Measurement::new(value, unit))
}

/// Parse a number such as `1,250.50`, ignoring thousands separators.
pub fn parse_number(s: &str) -> Option<Decimal> {
    let normalized: String = s.trim().chars().filter(|c| *c != ',').collect();
    Decimal::from_str(&normalized).ok()
}
