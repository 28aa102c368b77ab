//! Commodity column location and product name extraction.

use tracing::debug;

use crate::models::config::ColumnAddressing;
use crate::models::extraction::{CommodityColumnRef, ProductRecord};
use crate::models::table::{DataRow, Table};

/// Find the first header flagged as commodity column, scanning tables in
/// order and headers by column index.
pub fn locate_commodity_column(tables: &[Table]) -> Option<CommodityColumnRef> {
    tables.iter().enumerate().find_map(|(table_index, table)| {
        let mut headers: Vec<_> = table.headers.iter().collect();
        headers.sort_by_key(|h| h.column_index);

        headers
            .into_iter()
            .find(|h| h.is_commodity_column)
            .map(|h| CommodityColumnRef {
                table_index,
                column_index: h.column_index,
                header_text: h.text.clone(),
                confidence: h.confidence,
                span_index: h.span_index,
            })
    })
}

/// Reads product names out of the commodity column.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProductNameExtractor {
    addressing: ColumnAddressing,
}

impl ProductNameExtractor {
    pub fn new(addressing: ColumnAddressing) -> Self {
        Self { addressing }
    }

    /// Extract one product per itemized row of the referenced table.
    ///
    /// Border and empty rows are skipped, as are rows whose commodity cell is
    /// missing or blank. No reference means no products.
    pub fn extract(
        &self,
        tables: &[Table],
        column: Option<&CommodityColumnRef>,
    ) -> Vec<ProductRecord> {
        let Some(column) = column else {
            return Vec::new();
        };
        let Some(table) = tables.get(column.table_index) else {
            return Vec::new();
        };

        let products: Vec<ProductRecord> = table
            .item_rows()
            .filter_map(|row| {
                let (text, confidence) = self.read_cell(row, column)?;
                let name = text.trim();
                if name.is_empty() {
                    return None;
                }

                Some(ProductRecord {
                    name: name.to_string(),
                    row_index: row.row_index,
                    table_index: column.table_index,
                    confidence,
                    context: row.text.clone(),
                })
            })
            .collect();

        debug!(
            "Extracted {} product names from column {:?} of table {}",
            products.len(),
            column.header_text,
            column.table_index
        );

        products
    }

    fn read_cell(&self, row: &DataRow, column: &CommodityColumnRef) -> Option<(String, f32)> {
        match (self.addressing, column.span_index) {
            (ColumnAddressing::Aligned, Some(span)) => {
                row.cell_at_span(span).map(|c| (c.text, c.confidence))
            }
            _ => row
                .cell_at(column.column_index)
                .map(|c| (c.text.clone(), c.confidence)),
        }
    }
}
