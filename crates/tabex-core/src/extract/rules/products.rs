//! Standalone product-name mining.

use std::collections::HashSet;

use super::patterns::{KeywordSet, PatternKind, PatternSet};
use crate::models::extraction::ProductCandidate;

/// Strip punctuation other than hyphens from a token.
pub fn clean_token(token: &str) -> String {
    token
        .chars()
        .filter(|c| !c.is_ascii_punctuation() || *c == '-')
        .collect()
}

/// Score how much a token looks like a product name.
///
/// Starts at 0.5; longer tokens, tokens mixing capitals and digits, and
/// SKU-like codes score higher. Never exceeds 1.0.
pub fn score_product_name(name: &str, patterns: &PatternSet) -> f32 {
    let len = name.chars().count();
    let mut score = 0.5f32;

    if len >= 5 {
        score += 0.2;
    }
    if len >= 10 {
        score += 0.1;
    }

    let has_upper = name.chars().any(|c| c.is_ascii_uppercase());
    let has_digit = name.chars().any(|c| c.is_ascii_digit());
    if has_upper && has_digit {
        score += 0.2;
    }

    if patterns.is_match(PatternKind::ProductCode, name) {
        score += 0.1;
    }

    score.min(1.0)
}

/// Finds product-name tokens in recognized text.
#[derive(Debug, Clone)]
pub struct ProductNameMiner {
    patterns: PatternSet,
    skip: KeywordSet,
    min_token_length: usize,
}

impl ProductNameMiner {
    pub fn new(patterns: PatternSet, skip: KeywordSet) -> Self {
        Self {
            patterns,
            skip,
            min_token_length: 3,
        }
    }

    /// Set the minimum token length.
    pub fn with_min_token_length(mut self, len: usize) -> Self {
        self.min_token_length = len;
        self
    }

    /// Clean a token and keep it if it has the shape of a product name.
    pub fn candidate(&self, token: &str) -> Option<String> {
        let cleaned = clean_token(token);
        (cleaned.chars().count() >= self.min_token_length
            && self.patterns.is_match(PatternKind::ProductName, &cleaned))
        .then_some(cleaned)
    }

    /// The first product-name token of a line.
    pub fn first_name(&self, line: &str) -> Option<String> {
        line.split_whitespace().find_map(|t| self.candidate(t))
    }

    /// Check if a line is a section header or mentions a skip keyword.
    pub fn is_excluded(&self, line: &str) -> bool {
        self.skip.matches(line) || self.patterns.is_match(PatternKind::CommodityHeader, line)
    }

    /// Mine product names from non-blank trimmed lines.
    ///
    /// Names are de-duplicated case-insensitively, keeping the first
    /// occurrence, and returned by descending confidence.
    pub fn mine(&self, lines: &[&str]) -> Vec<ProductCandidate> {
        let mut seen = HashSet::new();
        let mut candidates = Vec::new();

        for (line_number, line) in lines.iter().enumerate() {
            if self.is_excluded(line) {
                continue;
            }

            for token in line.split_whitespace() {
                let Some(name) = self.candidate(token) else {
                    continue;
                };

                if !seen.insert(name.to_lowercase()) {
                    continue;
                }

                candidates.push(ProductCandidate {
                    confidence: score_product_name(&name, &self.patterns),
                    name,
                    line_number,
                });
            }
        }

        candidates.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
        candidates
    }
}
