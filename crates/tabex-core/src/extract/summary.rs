//! Summary counts for extraction results.

use super::rules::ExtractionMatch;
use crate::models::extraction::{
    CommodityColumnRef, CommodityLine, Measurement, ProductCandidate, ProductRecord, TableSummary,
    TextSummary,
};
use crate::models::table::Table;

/// Summarize a table path result.
pub fn summarize_tables(
    tables: &[Table],
    commodity_column: Option<&CommodityColumnRef>,
    products: &[ProductRecord],
) -> TableSummary {
    TableSummary {
        total_tables: tables.len(),
        total_rows: tables.iter().map(|t| t.total_rows).sum(),
        total_columns: tables.iter().map(|t| t.total_columns).sum(),
        tables_with_commodity: tables.iter().filter(|t| t.has_commodity_column).count(),
        commodity_column_found: commodity_column.is_some(),
        product_names_count: products.len(),
    }
}

/// Summarize a text path result.
pub fn summarize_text(
    commodities: &[CommodityLine],
    products: &[ProductCandidate],
    quantities: &[ExtractionMatch<Measurement>],
    weights: &[ExtractionMatch<Measurement>],
    prices: &[ExtractionMatch<Measurement>],
) -> TextSummary {
    TextSummary {
        total_commodities: commodities.len(),
        total_products: products.len(),
        total_quantities: quantities.len(),
        total_weights: weights.len(),
        total_prices: prices.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::TableParser;
    use crate::test_support::word;

    #[test]
    fn test_table_summary_sums_over_tables() {
        let parser = TableParser::default().with_header_rows(1);
        let with_item = parser
            .build(&[word("Item", 10.0, 10.0), word("Bolt", 10.0, 60.0)], None)
            .unwrap();
        let plain = parser
            .build(&[word("Qty", 10.0, 10.0), word("Price", 200.0, 10.0)], None)
            .unwrap();
        let tables = vec![with_item, plain];

        let summary = summarize_tables(&tables, None, &[]);
        assert_eq!(
            summary,
            TableSummary {
                total_tables: 2,
                total_rows: 3,
                total_columns: 3,
                tables_with_commodity: 1,
                commodity_column_found: false,
                product_names_count: 0,
            }
        );
    }

    #[test]
    fn test_empty_text_summary() {
        assert_eq!(summarize_text(&[], &[], &[], &[], &[]), TextSummary::default());
    }
}
