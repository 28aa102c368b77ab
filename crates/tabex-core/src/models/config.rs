//! Configuration structures for the extraction pipeline.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TabexError};
use crate::extract::rules::DEFAULT_SECTION_HEADERS;

/// Main configuration for the tabex pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TabexConfig {
    /// Table reconstruction configuration.
    pub table: TableConfig,

    /// Text fallback configuration.
    pub text: TextConfig,

    /// Path selection configuration.
    pub pipeline: PipelineConfig,
}

/// How product cells are addressed within a data row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnAddressing {
    /// By order of appearance within the row.
    #[default]
    Positional,
    /// By the column span the word's x-coordinate falls into.
    Aligned,
}

/// Table reconstruction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    /// Maximum vertical distance (pixels) from the row centroid for a word to join the row.
    pub row_threshold: f32,

    /// Minimum horizontal gap (pixels) between word starts that opens a new column.
    pub column_gap: f32,

    /// Number of leading rows treated as headers.
    pub header_rows: usize,

    /// Keywords marking the commodity/description column.
    pub commodity_keywords: Vec<String>,

    /// Keywords marking totals and footer rows.
    pub border_keywords: Vec<String>,

    /// Build one table per page instead of one per document.
    pub table_per_page: bool,

    /// Cell addressing used when reading product names.
    pub column_addressing: ColumnAddressing,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            row_threshold: 30.0,
            column_gap: 50.0,
            header_rows: 2,
            commodity_keywords: strings(&[
                "commodity",
                "description",
                "product",
                "item",
                "goods",
                "material",
                "article",
            ]),
            border_keywords: strings(&[
                "total",
                "subtotal",
                "grand total",
                "sum",
                "amount",
                "end",
                "footer",
            ]),
            table_per_page: false,
            column_addressing: ColumnAddressing::Positional,
        }
    }
}

/// Text fallback configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TextConfig {
    /// Phrases that open a commodity section.
    pub section_headers: Vec<String>,

    /// Number of lines scanned after a section header.
    pub section_window: usize,

    /// Lines shorter than this are skipped inside a section.
    pub min_line_length: usize,

    /// Keywords of lines that never carry product names.
    pub skip_keywords: Vec<String>,

    /// Minimum length of a product-name token.
    pub min_token_length: usize,

    /// Confidence assigned to quantity, weight and price matches.
    pub match_confidence: f32,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            section_headers: strings(DEFAULT_SECTION_HEADERS),
            section_window: 20,
            min_line_length: 3,
            skip_keywords: strings(&[
                "total", "subtotal", "tax", "amount", "date", "invoice", "bill", "receipt",
            ]),
            min_token_length: 3,
            match_confidence: 0.9,
        }
    }
}

/// Path selection configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Run the text path when a document structure yields no rows but text is present.
    pub fallback_to_text: bool,
}

impl TabexConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Reject values the pipeline cannot work with.
    pub fn validate(&self) -> Result<()> {
        if !(self.table.row_threshold >= 0.0) {
            return Err(TabexError::Config(
                "table.row_threshold must be a non-negative number".to_string(),
            ));
        }
        if !(self.table.column_gap >= 0.0) {
            return Err(TabexError::Config(
                "table.column_gap must be a non-negative number".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.text.match_confidence) {
            return Err(TabexError::Config(
                "text.match_confidence must be within 0.0 - 1.0".to_string(),
            ));
        }
        Ok(())
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
