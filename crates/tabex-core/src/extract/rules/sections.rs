//! Commodity section mining.
//!
//! A section opens at a header line such as "Description of Goods" and covers
//! a fixed number of following lines. Every line in it that starts with a
//! product-like token becomes a [`CommodityLine`].

use super::measures::MeasureExtractor;
use super::patterns::{KeywordSet, PatternKind, PatternSet};
use super::products::ProductNameMiner;
use crate::models::extraction::CommodityLine;

/// Reads commodity lines out of header-delimited sections.
#[derive(Debug, Clone)]
pub struct SectionMiner {
    patterns: PatternSet,
    skip: KeywordSet,
    window: usize,
    min_line_length: usize,
    names: ProductNameMiner,
    quantity: MeasureExtractor,
    weight: MeasureExtractor,
    price: MeasureExtractor,
}

impl SectionMiner {
    pub fn new(patterns: PatternSet, skip: KeywordSet) -> Self {
        Self {
            names: ProductNameMiner::new(patterns.clone(), skip.clone()),
            quantity: MeasureExtractor::quantity(patterns.clone()),
            weight: MeasureExtractor::weight(patterns.clone()),
            price: MeasureExtractor::price(patterns.clone()),
            patterns,
            skip,
            window: 20,
            min_line_length: 3,
        }
    }

    /// Set the number of lines a header opens.
    pub fn with_window(mut self, window: usize) -> Self {
        self.window = window;
        self
    }

    /// Set the minimum length of a line worth parsing.
    pub fn with_min_line_length(mut self, len: usize) -> Self {
        self.min_line_length = len;
        self
    }

    /// Set the minimum length of a product-name token.
    pub fn with_min_token_length(mut self, len: usize) -> Self {
        self.names = self.names.with_min_token_length(len);
        self
    }

    /// Mine commodity lines from non-blank trimmed lines.
    ///
    /// A header met inside an open section restarts the window.
    pub fn mine(&self, lines: &[&str]) -> Vec<CommodityLine> {
        let mut commodities = Vec::new();
        let mut remaining = 0usize;

        for (line_number, line) in lines.iter().enumerate() {
            if self.patterns.is_match(PatternKind::CommodityHeader, line) {
                remaining = self.window;
                continue;
            }

            if remaining == 0 {
                continue;
            }
            remaining -= 1;

            if line.chars().count() < self.min_line_length || self.skip.matches(line) {
                continue;
            }

            if let Some(commodity) = self.parse_line(line, line_number) {
                commodities.push(commodity);
            }
        }

        commodities
    }

    /// Parse one section line; `None` if it names no product.
    pub fn parse_line(&self, line: &str, line_number: usize) -> Option<CommodityLine> {
        let name = self.names.first_name(line)?;

        Some(CommodityLine {
            name,
            quantity: self.quantity.measure(line),
            weight: self.weight.measure(line),
            price: self.price.measure(line),
            line: line.to_string(),
            line_number,
        })
    }
}
