//! Path selection between table reconstruction and text fallback.

use tracing::{debug, info};

use super::commodity::{locate_commodity_column, ProductNameExtractor};
use super::fallback::TextFallbackExtractor;
use super::summary::summarize_tables;
use crate::error::{FailureReason, Result};
use crate::models::config::{PipelineConfig, TabexConfig};
use crate::models::extraction::{ExtractionMetadata, ExtractionResult, TableExtraction};
use crate::models::ocr::{DocumentStructure, OcrResult};
use crate::table::TableParser;

/// End-to-end commodity extraction from an OCR result.
#[derive(Debug, Clone)]
pub struct CommodityPipeline {
    tables: TableParser,
    products: ProductNameExtractor,
    text: TextFallbackExtractor,
    config: PipelineConfig,
}

impl CommodityPipeline {
    /// Create a pipeline from configuration.
    pub fn new(config: &TabexConfig) -> Result<Self> {
        Ok(Self {
            tables: TableParser::new(&config.table),
            products: ProductNameExtractor::new(config.table.column_addressing),
            text: TextFallbackExtractor::new(&config.text)?,
            config: config.pipeline.clone(),
        })
    }

    /// Process an OCR result that may be missing.
    pub fn process(&self, ocr: Option<&OcrResult>) -> ExtractionResult {
        match ocr {
            Some(ocr) => self.process_result(ocr),
            None => {
                info!("No OCR result supplied");
                ExtractionResult::Failure(FailureReason::InputMissing)
            }
        }
    }

    /// Process an OCR result.
    pub fn process_result(&self, ocr: &OcrResult) -> ExtractionResult {
        if !ocr.success {
            info!("OCR result reports failure");
            return ExtractionResult::Failure(FailureReason::InputMissing);
        }

        if let Some(structure) = ocr.document_structure() {
            return self.process_structure(structure, ocr);
        }

        match ocr.text() {
            Some(text) => {
                info!("No document structure, using text fallback");
                ExtractionResult::Text(self.text.extract(text, ExtractionMetadata::from_ocr(ocr)))
            }
            None => {
                info!("OCR result carries neither structure nor text");
                ExtractionResult::Failure(FailureReason::InputMissing)
            }
        }
    }

    fn process_structure(
        &self,
        structure: &DocumentStructure,
        ocr: &OcrResult,
    ) -> ExtractionResult {
        let tables = self.tables.parse(structure);

        if tables.is_empty() {
            if let Some(text) = ocr.text().filter(|_| self.config.fallback_to_text) {
                info!("Document structure held no rows, falling back to text");
                return ExtractionResult::Text(
                    self.text.extract(text, ExtractionMetadata::from_ocr(ocr)),
                );
            }

            info!("Document structure held no rows");
            return ExtractionResult::Failure(FailureReason::StructureAbsent);
        }

        let commodity_column = locate_commodity_column(&tables);
        let products = self.products.extract(&tables, commodity_column.as_ref());
        let summary = summarize_tables(&tables, commodity_column.as_ref(), &products);

        debug!(
            "Table path: {} tables, {} rows, {} products",
            summary.total_tables, summary.total_rows, summary.product_names_count
        );

        ExtractionResult::Table(TableExtraction {
            tables,
            commodity_column,
            products,
            summary,
        })
    }
}

impl Default for CommodityPipeline {
    fn default() -> Self {
        Self {
            tables: TableParser::default(),
            products: ProductNameExtractor::default(),
            text: TextFallbackExtractor::default(),
            config: PipelineConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::config::ColumnAddressing;
    use crate::models::ocr::TableData;
    use crate::test_support::{structure, word};
    use pretty_assertions::assert_eq;

    fn widget_structure() -> DocumentStructure {
        structure(vec![
            word("Shipping", 10.0, 10.0),
            word("Manifest", 200.0, 10.0),
            word("Description", 10.0, 60.0),
            word("Qty", 200.0, 60.0),
            word("Price", 450.0, 60.0),
            word("WIDGET-100", 10.0, 110.0),
            word("4", 200.0, 110.0),
            word("$12", 450.0, 110.0),
            word("TOTAL", 10.0, 160.0),
            word("$48", 450.0, 160.0),
            word(" ", 10.0, 210.0),
        ])
    }

    #[test]
    fn test_missing_input() {
        let pipeline = CommodityPipeline::default();

        assert_eq!(
            pipeline.process(None),
            ExtractionResult::Failure(FailureReason::InputMissing)
        );

        let failed = OcrResult {
            success: false,
            full_text: Some("Widget 3 pcs".to_string()),
            ..OcrResult::default()
        };
        let result = pipeline.process(Some(&failed));
        assert!(!result.is_success());
        assert_eq!(result.reason().as_deref(), Some("no valid result"));

        let empty = OcrResult {
            success: true,
            ..OcrResult::default()
        };
        assert_eq!(
            pipeline.process_result(&empty),
            ExtractionResult::Failure(FailureReason::InputMissing)
        );
    }

    #[test]
    fn test_blank_text_is_missing_input() {
        let pipeline = CommodityPipeline::default();

        for text in ["", "   ", "\n\t\n"] {
            let ocr = OcrResult {
                success: true,
                full_text: Some(text.to_string()),
                ..OcrResult::default()
            };
            assert_eq!(
                pipeline.process_result(&ocr),
                ExtractionResult::Failure(FailureReason::InputMissing)
            );
        }
    }

    #[test]
    fn test_default_reads_cells_by_position() {
        let ocr = OcrResult::from_structure(structure(vec![
            word("No", 10.0, 10.0),
            word("Item", 50.0, 10.0),
            word("Qty", 300.0, 10.0),
            word("pcs", 300.0, 60.0),
            word("1", 10.0, 110.0),
            word("Gear", 50.0, 110.0),
            word("4", 300.0, 110.0),
        ]));

        let ExtractionResult::Table(extraction) = CommodityPipeline::default().process_result(&ocr)
        else {
            panic!("expected table path");
        };
        let column = extraction.commodity_column.as_ref().unwrap();
        assert_eq!(column.header_text, "Item");
        assert_eq!(column.column_index, 1);
        let names: Vec<&str> = extraction.products.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Gear"]);

        // "No" and "Item" start within one column gap and share a span.
        let mut config = TabexConfig::default();
        config.table.column_addressing = ColumnAddressing::Aligned;
        let ExtractionResult::Table(aligned) =
            CommodityPipeline::new(&config).unwrap().process_result(&ocr)
        else {
            panic!("expected table path");
        };
        assert_eq!(aligned.products[0].name, "1 Gear");
    }

    #[test]
    fn test_table_path_end_to_end() {
        let mut config = TabexConfig::default();
        config.table.column_addressing = ColumnAddressing::Aligned;

        let ocr = OcrResult::from_structure(widget_structure());
        let result = CommodityPipeline::new(&config).unwrap().process_result(&ocr);

        let ExtractionResult::Table(extraction) = result else {
            panic!("expected table path, got {:?}", result);
        };

        let column = extraction.commodity_column.as_ref().unwrap();
        assert_eq!(column.header_text, "Description");
        assert_eq!(column.column_index, 2);

        let names: Vec<&str> = extraction.products.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["WIDGET-100"]);
        assert_eq!(extraction.products[0].context, "WIDGET-100 4 $12");

        assert_eq!(extraction.summary.total_tables, extraction.tables.len());
        assert_eq!(extraction.summary.product_names_count, extraction.products.len());
        assert!(extraction.summary.commodity_column_found);

        // The title row shifts header indices, so positional reads the price.
        let result = CommodityPipeline::default().process_result(&ocr);
        let ExtractionResult::Table(positional) = result else {
            panic!("expected table path, got {:?}", result);
        };
        assert_eq!(positional.products[0].name, "$12");
    }

    #[test]
    fn test_empty_structure() {
        let mut ocr = OcrResult::from_structure(DocumentStructure::default());
        ocr.full_text = Some("Description of goods\nWidget 3 pcs".to_string());

        assert_eq!(
            CommodityPipeline::default().process_result(&ocr),
            ExtractionResult::Failure(FailureReason::StructureAbsent)
        );

        let config = TabexConfig {
            pipeline: PipelineConfig {
                fallback_to_text: true,
            },
            ..TabexConfig::default()
        };
        let result = CommodityPipeline::new(&config).unwrap().process_result(&ocr);

        let ExtractionResult::Text(extraction) = result else {
            panic!("expected text path, got {:?}", result);
        };
        assert_eq!(extraction.commodities.len(), 1);
        assert_eq!(extraction.commodities[0].name, "Widget");
    }

    #[test]
    fn test_failed_detection_uses_text() {
        let ocr = OcrResult {
            success: true,
            full_text: Some("Qty: 12 pcs\nWeight: 5.5 kg\nPrice: $20.00".to_string()),
            table_data: Some(TableData {
                success: false,
                document_structure: Some(widget_structure()),
            }),
            file_name: Some("manifest.pdf".to_string()),
            page_count: Some(1),
            ..OcrResult::default()
        };

        let result = CommodityPipeline::default().process_result(&ocr);
        let ExtractionResult::Text(extraction) = result else {
            panic!("expected text path, got {:?}", result);
        };

        assert_eq!(extraction.metadata.file_name.as_deref(), Some("manifest.pdf"));
        assert_eq!(extraction.metadata.page_count, Some(1));
        assert_eq!(extraction.summary.total_quantities, extraction.quantities.len());
        assert_eq!(extraction.summary.total_weights, extraction.weights.len());
        assert_eq!(extraction.summary.total_prices, extraction.prices.len());
        assert_eq!(extraction.summary.total_products, extraction.products.len());
        assert_eq!(extraction.summary.total_commodities, extraction.commodities.len());
    }

    #[test]
    fn test_result_serializes_tagged() {
        let result = ExtractionResult::Failure(FailureReason::StructureAbsent);
        let json = serde_json::to_value(result).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"status": "failure", "data": "structure_absent"})
        );
    }
}
