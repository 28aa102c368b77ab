//! Data row tagging.

use super::columns::ColumnLayout;
use crate::extract::rules::KeywordSet;
use crate::models::table::{DataCell, DataRow, Row};

/// Build data rows from the rows below the header region.
///
/// A row is a border row when any cell mentions a border keyword, and empty
/// when it has no cells or only blank ones.
pub fn tag_rows(rows: &[Row], layout: &ColumnLayout, border: &KeywordSet) -> Vec<DataRow> {
    rows.iter()
        .enumerate()
        .map(|(row_index, row)| {
            let cells: Vec<DataCell> = row
                .words
                .iter()
                .enumerate()
                .map(|(column_index, word)| DataCell {
                    text: word.text.clone(),
                    column_index,
                    confidence: word.confidence,
                    bounding_box: word.bounding_box,
                    span_index: layout.span_of(word.x()),
                })
                .collect();

            let is_border_row = cells.iter().any(|c| border.matches(&c.text));
            let is_empty = cells.iter().all(|c| c.text.trim().is_empty());

            DataRow {
                row_index,
                cells,
                is_border_row,
                is_empty,
                text: row.text.clone(),
            }
        })
        .collect()
}
