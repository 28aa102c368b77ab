//! Extraction results for the table path and the text path.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::ocr::OcrResult;
use super::table::Table;
use crate::error::FailureReason;
use crate::extract::rules::ExtractionMatch;

/// Outcome of one pipeline pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "data", rename_all = "snake_case")]
pub enum ExtractionResult {
    /// Tables were reconstructed from the document structure.
    Table(TableExtraction),
    /// Data was mined from recognized text.
    Text(TextExtraction),
    /// Nothing could be extracted.
    Failure(FailureReason),
}

impl ExtractionResult {
    /// Check if the pass produced data.
    pub fn is_success(&self) -> bool {
        !matches!(self, Self::Failure(_))
    }

    /// Failure reason as a message, if the pass failed.
    pub fn reason(&self) -> Option<String> {
        match self {
            Self::Failure(reason) => Some(reason.to_string()),
            _ => None,
        }
    }

    /// Summary counts of either path.
    pub fn summary(&self) -> Option<Summary> {
        match self {
            Self::Table(t) => Some(Summary::Table(t.summary.clone())),
            Self::Text(t) => Some(Summary::Text(t.summary.clone())),
            Self::Failure(_) => None,
        }
    }
}

/// Table path output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableExtraction {
    pub tables: Vec<Table>,
    pub commodity_column: Option<CommodityColumnRef>,
    pub products: Vec<ProductRecord>,
    pub summary: TableSummary,
}

/// Location of the commodity column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommodityColumnRef {
    pub table_index: usize,
    /// Position of the header among the flattened header words.
    pub column_index: usize,
    pub header_text: String,
    pub confidence: f32,
    /// Column span of the header word.
    pub span_index: Option<usize>,
}

/// A product name read from the commodity column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub name: String,
    pub row_index: usize,
    pub table_index: usize,
    pub confidence: f32,
    /// Full text of the row the name was read from.
    pub context: String,
}

/// Text path output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextExtraction {
    pub commodities: Vec<CommodityLine>,
    pub products: Vec<ProductCandidate>,
    pub quantities: Vec<ExtractionMatch<Measurement>>,
    pub weights: Vec<ExtractionMatch<Measurement>>,
    pub prices: Vec<ExtractionMatch<Measurement>>,
    pub metadata: ExtractionMetadata,
    pub summary: TextSummary,
}

/// A numeric value with an optional unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Measurement {
    /// Written to JSON as a number.
    #[serde(with = "rust_decimal::serde::float")]
    pub value: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

impl Measurement {
    pub fn new(value: Decimal, unit: Option<String>) -> Self {
        Self { value, unit }
    }
}

/// A line from a commodity section that names a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommodityLine {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<Measurement>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<Measurement>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Measurement>,
    /// The source line, trimmed.
    pub line: String,
    /// Zero-based index among non-blank lines.
    pub line_number: usize,
}

/// A token that looks like a product name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductCandidate {
    pub name: String,
    pub confidence: f32,
    /// Zero-based index among non-blank lines.
    pub line_number: usize,
}

/// Caller-supplied file details plus the extraction time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_size: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ocr_confidence: Option<f32>,
    pub is_scanned_pdf: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_count: Option<u32>,
    pub extracted_at: DateTime<Utc>,
}

impl ExtractionMetadata {
    /// Carry the file details of an OCR result, stamped with the current time.
    pub fn from_ocr(ocr: &OcrResult) -> Self {
        Self {
            file_name: ocr.file_name.clone(),
            file_size: ocr.file_size,
            file_type: ocr.file_type.clone(),
            ocr_confidence: ocr.confidence,
            is_scanned_pdf: ocr.is_scanned_pdf,
            page_count: ocr.page_count,
            extracted_at: Utc::now(),
        }
    }
}

/// Counts over a table path result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSummary {
    pub total_tables: usize,
    pub total_rows: usize,
    pub total_columns: usize,
    pub tables_with_commodity: usize,
    pub commodity_column_found: bool,
    pub product_names_count: usize,
}

/// Counts over a text path result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextSummary {
    pub total_commodities: usize,
    pub total_products: usize,
    pub total_quantities: usize,
    pub total_weights: usize,
    pub total_prices: usize,
}

/// Summary of either path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Summary {
    Table(TableSummary),
    Text(TextSummary),
}
