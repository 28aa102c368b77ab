//! Header region classification.

use super::columns::ColumnLayout;
use crate::extract::rules::KeywordSet;
use crate::models::table::{HeaderCell, Row};

/// Turn the header rows into header cells.
///
/// Words are flattened row by row, left to right; a cell's `column_index` is
/// its position in that sequence. Cells whose text mentions a commodity
/// keyword are flagged as the commodity column.
pub fn classify_headers(
    header_rows: &[Row],
    layout: &ColumnLayout,
    commodity: &KeywordSet,
) -> Vec<HeaderCell> {
    header_rows
        .iter()
        .flat_map(|row| row.words.iter())
        .enumerate()
        .map(|(column_index, word)| HeaderCell {
            text: word.text.clone(),
            column_index,
            confidence: word.confidence,
            is_commodity_column: commodity.matches(&word.text),
            span_index: layout.span_of(word.x()),
        })
        .collect()
}
