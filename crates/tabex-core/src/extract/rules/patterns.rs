//! Declarative pattern table for text extraction.
//!
//! Every rule is a `(PatternKind, regex, default unit)` row. Regexes expose
//! their number as the named group `value` and, where present, the unit as
//! `unit`. [`PatternSet`] evaluates the rows of one kind in declaration order.

use std::collections::HashMap;

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::Result;

/// What a pattern recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatternKind {
    /// Line that opens a commodity section.
    CommodityHeader,
    Quantity,
    Weight,
    Price,
    /// Whole token that may be a product name.
    ProductName,
    /// Letter prefix followed by digits (SKU-like codes).
    ProductCode,
}

/// Rule rows: kind, pattern, default unit.
const STANDARD_RULES: &[(PatternKind, &str, Option<&str>)] = &[
    (
        PatternKind::Quantity,
        r"(?i)\b(?:qty|quantity)\s*[:.]?\s*(?P<value>\d{1,3}(?:,\d{3})+(?:\.\d+)?|\d+(?:\.\d+)?)(?:\s*(?P<unit>pcs|pieces|units|boxes|cases)\b)?",
        None,
    ),
    (
        PatternKind::Quantity,
        r"(?i)\b(?P<value>\d{1,3}(?:,\d{3})+(?:\.\d+)?|\d+(?:\.\d+)?)\s*(?P<unit>pcs|pieces|units|boxes|cases)\b",
        None,
    ),
    (
        PatternKind::Weight,
        r"(?i)\b(?P<value>\d{1,3}(?:,\d{3})+(?:\.\d+)?|\d+(?:\.\d+)?)\s*(?P<unit>lbs|kg|pounds)\b",
        None,
    ),
    (
        PatternKind::Price,
        r"(?i)\bprice\s*:\s*\$\s*(?P<value>\d{1,3}(?:,\d{3})+(?:\.\d+)?|\d+(?:\.\d+)?)",
        Some("USD"),
    ),
    (
        PatternKind::Price,
        r"\$\s*(?P<value>\d{1,3}(?:,\d{3})+(?:\.\d+)?|\d+(?:\.\d+)?)",
        Some("USD"),
    ),
    (
        PatternKind::Price,
        r"(?i)\b(?P<value>\d{1,3}(?:,\d{3})+(?:\.\d+)?|\d+(?:\.\d+)?)\s*dollars\b",
        Some("USD"),
    ),
    (
        PatternKind::ProductName,
        r"^[A-Za-z0-9-]*[A-Za-z][A-Za-z0-9-]*$",
        None,
    ),
    (PatternKind::ProductCode, r"^[A-Z]{2,}\d+", None),
];

/// Phrases that open a commodity section by default.
pub const DEFAULT_SECTION_HEADERS: &[&str] = &[
    "commodity and description",
    "commodity description",
    "product description",
    "description of goods",
    "goods description",
    "item description",
];

lazy_static! {
    static ref STANDARD: PatternSet = {
        let mut set = PatternSet::from_rules(STANDARD_RULES).unwrap();
        set.set_section_headers(DEFAULT_SECTION_HEADERS).unwrap();
        set
    };
}

/// One compiled rule.
#[derive(Debug, Clone)]
pub struct Matcher {
    regex: Regex,
    default_unit: Option<&'static str>,
}

/// A match produced by the pattern engine.
#[derive(Debug, Clone, PartialEq)]
pub struct PatternHit<'t> {
    /// Byte range of the whole match.
    pub start: usize,
    pub end: usize,
    /// Matched text.
    pub text: &'t str,
    /// The `value` capture, if the rule has one.
    pub value: Option<&'t str>,
    /// The `unit` capture, if present.
    pub unit: Option<&'t str>,
    /// Unit implied by the rule.
    pub default_unit: Option<&'static str>,
}

impl PatternHit<'_> {
    fn overlaps(&self, other: &PatternHit<'_>) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// Compiled rule table keyed by pattern kind.
#[derive(Debug, Clone)]
pub struct PatternSet {
    rules: HashMap<PatternKind, Vec<Matcher>>,
}

impl PatternSet {
    /// The built-in rule table.
    pub fn standard() -> Self {
        STANDARD.clone()
    }

    /// Compile a rule table.
    pub fn from_rules(rules: &[(PatternKind, &str, Option<&'static str>)]) -> Result<Self> {
        let mut compiled: HashMap<PatternKind, Vec<Matcher>> = HashMap::new();

        for (kind, pattern, default_unit) in rules {
            compiled.entry(*kind).or_default().push(Matcher {
                regex: Regex::new(pattern)?,
                default_unit: *default_unit,
            });
        }

        Ok(Self { rules: compiled })
    }

    /// Replace the commodity-header rule with one built from plain phrases.
    ///
    /// Phrases match case-insensitively on word boundaries, and any run of
    /// whitespace in a phrase matches any run of whitespace in the text.
    pub fn with_section_headers<S: AsRef<str>>(mut self, phrases: &[S]) -> Result<Self> {
        self.set_section_headers(phrases)?;
        Ok(self)
    }

    fn set_section_headers<S: AsRef<str>>(&mut self, phrases: &[S]) -> Result<()> {
        let alternatives: Vec<String> = phrases
            .iter()
            .map(|p| {
                p.as_ref()
                    .split_whitespace()
                    .map(regex::escape)
                    .collect::<Vec<_>>()
                    .join(r"\s+")
            })
            .filter(|p| !p.is_empty())
            .collect();

        let matchers = if alternatives.is_empty() {
            Vec::new()
        } else {
            let pattern = format!(r"(?i)\b(?:{})\b", alternatives.join("|"));
            vec![Matcher {
                regex: Regex::new(&pattern)?,
                default_unit: None,
            }]
        };

        self.rules.insert(PatternKind::CommodityHeader, matchers);
        Ok(())
    }

    /// Rules of one kind, in evaluation order.
    pub fn matchers(&self, kind: PatternKind) -> &[Matcher] {
        self.rules.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Check if any rule of a kind matches.
    pub fn is_match(&self, kind: PatternKind, text: &str) -> bool {
        self.matchers(kind).iter().any(|m| m.regex.is_match(text))
    }

    /// All non-overlapping matches of a kind, ordered by position.
    ///
    /// Rules are tried in declaration order; a match overlapping one already
    /// accepted from an earlier rule is dropped.
    pub fn find_all<'t>(&self, kind: PatternKind, text: &'t str) -> Vec<PatternHit<'t>> {
        let mut accepted: Vec<PatternHit<'t>> = Vec::new();

        for matcher in self.matchers(kind) {
            for caps in matcher.regex.captures_iter(text) {
                let Some(whole) = caps.get(0) else {
                    continue;
                };

                let hit = PatternHit {
                    start: whole.start(),
                    end: whole.end(),
                    text: whole.as_str(),
                    value: caps.name("value").map(|m| m.as_str()),
                    unit: caps.name("unit").map(|m| m.as_str()),
                    default_unit: matcher.default_unit,
                };

                if !accepted.iter().any(|a| a.overlaps(&hit)) {
                    accepted.push(hit);
                }
            }
        }

        accepted.sort_by_key(|h| h.start);
        accepted
    }
}

impl Default for PatternSet {
    fn default() -> Self {
        Self::standard()
    }
}

/// Case-insensitive substring keyword matcher.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordSet {
    keywords: Vec<String>,
}

impl KeywordSet {
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            keywords: keywords
                .into_iter()
                .map(|k| k.as_ref().trim().to_lowercase())
                .filter(|k| !k.is_empty())
                .collect(),
        }
    }

    /// The first keyword contained in the lowercased text.
    pub fn find(&self, text: &str) -> Option<&str> {
        let lower = text.to_lowercase();
        self.keywords
            .iter()
            .find(|k| lower.contains(k.as_str()))
            .map(String::as_str)
    }

    /// Check if the text mentions any keyword.
    pub fn matches(&self, text: &str) -> bool {
        self.find(text).is_some()
    }
}
