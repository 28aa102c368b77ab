//! Column spans from horizontal gaps between word starts.

use crate::models::table::{ColumnSpan, Row};

/// Ordered column spans of one table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnLayout {
    spans: Vec<ColumnSpan>,
}

impl ColumnLayout {
    /// Survey the x-start of every word and split wherever consecutive starts
    /// are more than `gap` apart.
    pub fn survey(rows: &[Row], gap: f32) -> Self {
        let mut starts: Vec<f32> = rows
            .iter()
            .flat_map(|r| r.words.iter().map(|w| w.x()))
            .collect();
        starts.sort_by(f32::total_cmp);
        starts.dedup();

        let mut spans = Vec::new();
        let mut iter = starts.into_iter();

        if let Some(first) = iter.next() {
            let mut span = ColumnSpan {
                start: first,
                end: first,
            };

            for x in iter {
                if x - span.end > gap {
                    spans.push(span);
                    span = ColumnSpan { start: x, end: x };
                } else {
                    span.end = x;
                }
            }

            spans.push(span);
        }

        Self { spans }
    }

    /// Number of detected columns.
    pub fn len(&self) -> usize {
        self.spans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// Index of the span containing an x-start.
    pub fn span_of(&self, x: f32) -> Option<usize> {
        self.spans.iter().position(|s| s.contains(x))
    }

    pub fn spans(&self) -> &[ColumnSpan] {
        &self.spans
    }

    pub fn into_spans(self) -> Vec<ColumnSpan> {
        self.spans
    }
}
