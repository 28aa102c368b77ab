//! Text fallback extraction for documents without a detected structure.

use tracing::{debug, info};

use super::rules::{
    FieldExtractor, KeywordSet, MeasureExtractor, PatternSet, ProductNameMiner, SectionMiner,
};
use super::summary::summarize_text;
use crate::error::Result;
use crate::models::config::TextConfig;
use crate::models::extraction::{ExtractionMetadata, TextExtraction};

/// Mines commodities, product names, quantities, weights and prices from
/// recognized text.
#[derive(Debug, Clone)]
pub struct TextFallbackExtractor {
    sections: SectionMiner,
    names: ProductNameMiner,
    quantity: MeasureExtractor,
    weight: MeasureExtractor,
    price: MeasureExtractor,
}

impl TextFallbackExtractor {
    /// Create an extractor from text configuration.
    ///
    /// Fails if a configured section header cannot be compiled.
    pub fn new(config: &TextConfig) -> Result<Self> {
        let patterns = PatternSet::standard().with_section_headers(&config.section_headers)?;
        Ok(Self::with_patterns(patterns, config))
    }

    /// Create an extractor with the built-in rule table and defaults.
    pub fn standard() -> Self {
        Self::with_patterns(PatternSet::standard(), &TextConfig::default())
    }

    fn with_patterns(patterns: PatternSet, config: &TextConfig) -> Self {
        let skip = KeywordSet::new(&config.skip_keywords);

        Self {
            sections: SectionMiner::new(patterns.clone(), skip.clone())
                .with_window(config.section_window)
                .with_min_line_length(config.min_line_length)
                .with_min_token_length(config.min_token_length),
            names: ProductNameMiner::new(patterns.clone(), skip)
                .with_min_token_length(config.min_token_length),
            quantity: MeasureExtractor::quantity(patterns.clone())
                .with_confidence(config.match_confidence),
            weight: MeasureExtractor::weight(patterns.clone())
                .with_confidence(config.match_confidence),
            price: MeasureExtractor::price(patterns).with_confidence(config.match_confidence),
        }
    }

    /// Run every text miner over the recognized text.
    pub fn extract(&self, text: &str, metadata: ExtractionMetadata) -> TextExtraction {
        info!("Mining {} characters of recognized text", text.len());

        let lines: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();

        let commodities = self.sections.mine(&lines);
        let products = self.names.mine(&lines);
        let quantities = self.quantity.extract_all(text);
        let weights = self.weight.extract_all(text);
        let prices = self.price.extract_all(text);

        let summary = summarize_text(&commodities, &products, &quantities, &weights, &prices);

        debug!(
            "Text fallback found {} commodities, {} products, {} quantities, {} weights, {} prices",
            summary.total_commodities,
            summary.total_products,
            summary.total_quantities,
            summary.total_weights,
            summary.total_prices
        );

        TextExtraction {
            commodities,
            products,
            quantities,
            weights,
            prices,
            metadata,
            summary,
        }
    }
}

impl Default for TextFallbackExtractor {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ocr::OcrResult;
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn metadata() -> ExtractionMetadata {
        ExtractionMetadata::from_ocr(&OcrResult::from_text(""))
    }

    #[test]
    fn test_labeled_lines() {
        let result = TextFallbackExtractor::standard()
            .extract("Qty: 12 pcs\nWeight: 5.5 kg\nPrice: $20.00", metadata());

        let quantities: Vec<_> = result.quantities.iter().map(|m| m.value.value).collect();
        assert_eq!(quantities, vec![Decimal::from(12)]);

        assert_eq!(result.weights.len(), 1);
        assert_eq!(result.weights[0].value.value, Decimal::from_str("5.5").unwrap());
        assert_eq!(result.weights[0].value.unit.as_deref(), Some("kg"));

        let prices: Vec<_> = result.prices.iter().map(|m| m.value.value).collect();
        assert_eq!(prices, vec![Decimal::from(20)]);

        assert!(result.commodities.is_empty());
        assert_eq!(result.summary.total_quantities, result.quantities.len());
        assert_eq!(result.summary.total_weights, result.weights.len());
        assert_eq!(result.summary.total_prices, result.prices.len());
        assert_eq!(result.summary.total_products, result.products.len());
    }

    #[test]
    fn test_bill_of_lading() {
        let text = "
            BILL OF LADING
            Description of Goods
            HX200 hydraulic pump 2 units 88 lbs $1,450.00
            Gasket-kit 40 pcs

            Total amount $1,450.00
        ";

        let result = TextFallbackExtractor::standard().extract(text, metadata());

        let names: Vec<&str> = result.commodities.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["HX200", "Gasket-kit"]);
        assert_eq!(
            result.commodities[0].price.as_ref().map(|p| p.value),
            Some(Decimal::from(1450))
        );

        assert_eq!(result.products[0].name, "HX200");
        assert!(result.products.iter().all(|p| p.name != "BILL"));
        assert_eq!(result.summary.total_commodities, 2);
        assert_eq!(result.quantities.len(), 2);
        assert_eq!(result.prices.len(), 2);
    }

    #[test]
    fn test_custom_section_headers() {
        let config = TextConfig {
            section_headers: vec!["cargo".to_string()],
            ..TextConfig::default()
        };
        let extractor = TextFallbackExtractor::new(&config).unwrap();

        let result = extractor.extract("Cargo\nPallet of tiles", metadata());
        assert_eq!(result.commodities.len(), 1);
        assert_eq!(result.commodities[0].name, "Pallet");
    }
}
