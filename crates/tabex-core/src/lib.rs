//! Core library for commodity extraction from OCR output.
//!
//! This crate provides:
//! - Table reconstruction from OCR word positions (rows, columns, headers)
//! - Commodity column location and product name extraction
//! - Text fallback mining of commodity sections, quantities, weights and prices
//! - A pipeline choosing between the two paths

pub mod error;
pub mod extract;
pub mod models;
pub mod table;

#[cfg(test)]
mod test_support;

pub use error::{FailureReason, Result, TabexError};
pub use extract::rules::{ExtractionMatch, PatternKind, PatternSet};
pub use extract::{CommodityPipeline, ProductNameExtractor, TextFallbackExtractor};
pub use models::config::{ColumnAddressing, PipelineConfig, TableConfig, TabexConfig, TextConfig};
pub use models::extraction::{
    CommodityColumnRef, CommodityLine, ExtractionMetadata, ExtractionResult, Measurement,
    ProductCandidate, ProductRecord, Summary, TableExtraction, TableSummary, TextExtraction,
    TextSummary,
};
pub use models::ocr::{DocumentStructure, OcrResult};
pub use models::table::{DataRow, HeaderCell, Table};
pub use table::TableParser;
