//! Reconstructed table structures.
//!
//! A [`Table`] is rebuilt from free-floating OCR words: words are grouped into
//! [`Row`]s by vertical proximity, and horizontal gaps between word starts
//! give the [`ColumnSpan`]s. Cells carry both their position within the row
//! and the span id their x-coordinate falls into.

use serde::{Deserialize, Serialize};

use super::ocr::{BlockType, Vertex};

/// Four ordered corner points: top-left, top-right, bottom-right, bottom-left.
pub type BoundingBox = [Vertex; 4];

/// A recognized word with its location on the page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Word {
    /// Recognized text.
    pub text: String,
    /// Corner points in image pixels.
    pub bounding_box: BoundingBox,
    /// Recognition confidence (0.0 - 1.0).
    pub confidence: f32,
    /// Zero-based page the word was found on.
    pub page_index: usize,
    /// Type of the block containing the word.
    pub block_type: BlockType,
}

impl Word {
    /// X of the top-left corner.
    pub fn x(&self) -> f32 {
        self.bounding_box[0].x
    }

    /// Y of the top-left corner.
    pub fn y(&self) -> f32 {
        self.bounding_box[0].y
    }
}

/// A horizontal line of words.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    /// Member words, ascending by x.
    pub words: Vec<Word>,
    /// Running centroid of the member words' y.
    pub y: f32,
    /// Member words' text joined by a space.
    pub text: String,
}

impl Row {
    /// Close a row: order its words left to right and record the joined text.
    pub fn new(mut words: Vec<Word>, y: f32) -> Self {
        words.sort_by(|a, b| a.x().total_cmp(&b.x()));
        let text = words
            .iter()
            .map(|w| w.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");

        Self { words, y, text }
    }
}

/// Horizontal extent of a detected column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColumnSpan {
    pub start: f32,
    pub end: f32,
}

impl ColumnSpan {
    /// Check if an x-coordinate falls inside this span.
    pub fn contains(&self, x: f32) -> bool {
        x >= self.start && x <= self.end
    }
}

/// A word from the header region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeaderCell {
    pub text: String,
    /// Position among the flattened header words.
    pub column_index: usize,
    pub confidence: f32,
    /// Whether the header names the commodity/description column.
    pub is_commodity_column: bool,
    /// Column span the word starts in.
    pub span_index: Option<usize>,
}

/// A word from a data row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataCell {
    pub text: String,
    /// Position within the row.
    pub column_index: usize,
    pub confidence: f32,
    pub bounding_box: BoundingBox,
    /// Column span the word starts in.
    pub span_index: Option<usize>,
}

/// Content of one column span within a row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignedCell {
    /// Text of every cell in the span, joined by a space.
    pub text: String,
    /// Mean confidence of those cells.
    pub confidence: f32,
}

/// A table row below the header region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataRow {
    /// Zero-based index among non-header rows.
    pub row_index: usize,
    pub cells: Vec<DataCell>,
    /// Row marks the end of itemized data (totals, footer).
    pub is_border_row: bool,
    /// Row has no cells or only blank ones.
    pub is_empty: bool,
    /// The row's joined text.
    pub text: String,
}

impl DataRow {
    /// Cell at a row-relative position.
    pub fn cell_at(&self, column_index: usize) -> Option<&DataCell> {
        self.cells.iter().find(|c| c.column_index == column_index)
    }

    /// Cells starting inside a column span, left to right.
    pub fn cells_in_span(&self, span: usize) -> impl Iterator<Item = &DataCell> {
        self.cells
            .iter()
            .filter(move |c| c.span_index == Some(span))
    }

    /// Merged content of a column span, or `None` if the span is empty here.
    pub fn cell_at_span(&self, span: usize) -> Option<AlignedCell> {
        let cells: Vec<&DataCell> = self.cells_in_span(span).collect();
        if cells.is_empty() {
            return None;
        }

        let text = cells
            .iter()
            .map(|c| c.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        let confidence = cells.iter().map(|c| c.confidence).sum::<f32>() / cells.len() as f32;

        Some(AlignedCell { text, confidence })
    }

    /// One entry per column span; `None` marks a missing cell.
    pub fn aligned_cells(&self, total_columns: usize) -> Vec<Option<AlignedCell>> {
        (0..total_columns).map(|span| self.cell_at_span(span)).collect()
    }
}

/// A reconstructed table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub headers: Vec<HeaderCell>,
    pub rows: Vec<DataRow>,
    /// Number of clustered rows, header region included.
    pub total_rows: usize,
    /// Number of detected column spans.
    pub total_columns: usize,
    /// Any header or data cell mentions a commodity keyword.
    pub has_commodity_column: bool,
    /// Detected column spans, left to right.
    pub columns: Vec<ColumnSpan>,
    /// Page the table was built from, when tables are built per page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_index: Option<usize>,
}

impl Table {
    /// Data rows as a dense grid over the column spans.
    pub fn grid(&self) -> Vec<Vec<Option<AlignedCell>>> {
        self.rows
            .iter()
            .map(|row| row.aligned_cells(self.total_columns))
            .collect()
    }

    /// Rows that carry itemized data.
    pub fn item_rows(&self) -> impl Iterator<Item = &DataRow> {
        self.rows
            .iter()
            .filter(|r| !r.is_border_row && !r.is_empty)
    }
}
