//! Table assembly from clustered rows.

use std::collections::BTreeMap;

use tracing::debug;

use super::columns::ColumnLayout;
use super::header::classify_headers;
use super::ingest::ingest_words;
use super::rows::cluster_rows;
use super::tagger::tag_rows;
use crate::extract::rules::KeywordSet;
use crate::models::config::TableConfig;
use crate::models::ocr::DocumentStructure;
use crate::models::table::{Table, Word};

/// Rebuilds tables from OCR word positions.
#[derive(Debug, Clone)]
pub struct TableParser {
    row_threshold: f32,
    column_gap: f32,
    header_rows: usize,
    table_per_page: bool,
    commodity: KeywordSet,
    border: KeywordSet,
}

impl TableParser {
    /// Create a parser from table configuration.
    pub fn new(config: &TableConfig) -> Self {
        Self {
            row_threshold: config.row_threshold,
            column_gap: config.column_gap,
            header_rows: config.header_rows,
            table_per_page: config.table_per_page,
            commodity: KeywordSet::new(&config.commodity_keywords),
            border: KeywordSet::new(&config.border_keywords),
        }
    }

    /// Build one table per page instead of one per document.
    pub fn with_table_per_page(mut self, per_page: bool) -> Self {
        self.table_per_page = per_page;
        self
    }

    /// Set the number of header rows.
    pub fn with_header_rows(mut self, header_rows: usize) -> Self {
        self.header_rows = header_rows;
        self
    }

    /// Reconstruct the tables of a document. An empty result means the
    /// structure held no words.
    pub fn parse(&self, structure: &DocumentStructure) -> Vec<Table> {
        let words = ingest_words(structure);

        if !self.table_per_page {
            return self.build(&words, None).into_iter().collect();
        }

        let mut pages: BTreeMap<usize, Vec<Word>> = BTreeMap::new();
        for word in words {
            pages.entry(word.page_index).or_default().push(word);
        }

        pages
            .into_iter()
            .filter_map(|(page_index, words)| self.build(&words, Some(page_index)))
            .collect()
    }

    /// Reconstruct a single table from words, or `None` if there are no rows.
    pub fn build(&self, words: &[Word], page_index: Option<usize>) -> Option<Table> {
        let rows = cluster_rows(words, self.row_threshold);
        if rows.is_empty() {
            return None;
        }

        let layout = ColumnLayout::survey(&rows, self.column_gap);
        let split = self.header_rows.min(rows.len());
        let (header_rows, body_rows) = rows.split_at(split);

        let headers = classify_headers(header_rows, &layout, &self.commodity);
        let data_rows = tag_rows(body_rows, &layout, &self.border);

        let has_commodity_column = headers.iter().any(|h| h.is_commodity_column)
            || data_rows
                .iter()
                .flat_map(|r| r.cells.iter())
                .any(|c| self.commodity.matches(&c.text));

        debug!(
            "Assembled table: {} rows ({} header), {} columns, commodity column: {}",
            rows.len(),
            split,
            layout.len(),
            has_commodity_column
        );

        Some(Table {
            headers,
            rows: data_rows,
            total_rows: rows.len(),
            total_columns: layout.len(),
            has_commodity_column,
            columns: layout.into_spans(),
            page_index,
        })
    }
}

impl Default for TableParser {
    fn default() -> Self {
        Self::new(&TableConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{structure, word};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_build_invoice_table() {
        let words = vec![
            word("Commodity", 10.0, 10.0),
            word("Qty", 300.0, 10.0),
            word("Weight", 450.0, 10.0),
            word("Bolt", 10.0, 60.0),
            word("100", 300.0, 60.0),
            word("Nut", 10.0, 110.0),
            word("200", 300.0, 110.0),
            word("Total", 10.0, 160.0),
            word("300", 300.0, 160.0),
        ];

        let table = TableParser::default().with_header_rows(1).build(&words, None).unwrap();

        assert_eq!(table.total_rows, 4);
        assert_eq!(table.total_columns, 3);
        assert_eq!(table.headers.len(), 3);
        assert!(table.headers[0].is_commodity_column);
        assert!(table.has_commodity_column);

        assert_eq!(table.rows.len(), 3);
        assert_eq!(table.rows[0].row_index, 0);
        assert!(table.rows[2].is_border_row);
        assert_eq!(table.item_rows().count(), 2);
    }

    #[test]
    fn test_commodity_keyword_in_data_row() {
        let words = vec![
            word("No", 10.0, 10.0),
            word("Qty", 300.0, 10.0),
            word("Code", 10.0, 60.0),
            word("Price", 300.0, 60.0),
            word("Goods", 10.0, 110.0),
            word("1", 300.0, 110.0),
        ];

        let table = TableParser::default().build(&words, None).unwrap();
        assert!(table.headers.iter().all(|h| !h.is_commodity_column));
        assert!(table.has_commodity_column);
    }

    #[test]
    fn test_fewer_rows_than_header_region() {
        let table = TableParser::default()
            .build(&[word("Description", 10.0, 10.0)], None)
            .unwrap();

        assert_eq!(table.headers.len(), 1);
        assert!(table.rows.is_empty());
        assert_eq!(table.total_rows, 1);
    }

    #[test]
    fn test_no_words_no_table() {
        assert!(TableParser::default().build(&[], None).is_none());
        assert!(TableParser::default().parse(&structure(vec![])).is_empty());
    }

    #[test]
    fn test_table_per_page() {
        let mut second = word("Item", 10.0, 10.0);
        second.page_index = 1;

        let doc = structure(vec![word("Description", 10.0, 10.0), second]);

        let single = TableParser::default().parse(&doc);
        assert_eq!(single.len(), 1);
        assert_eq!(single[0].page_index, None);

        let per_page = TableParser::default().with_table_per_page(true).parse(&doc);
        assert_eq!(per_page.len(), 2);
        assert_eq!(per_page[1].page_index, Some(1));
        assert_eq!(per_page[1].headers[0].text, "Item");
    }
}
