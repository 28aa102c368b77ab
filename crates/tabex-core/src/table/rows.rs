//! Group words into horizontal rows.

use tracing::debug;

use crate::models::table::{Row, Word};

/// Cluster words into rows by vertical proximity.
///
/// Words are visited top to bottom. A word joins the open row when its y lies
/// within `threshold` of the row's running centroid, which then moves to the
/// midpoint of the old centroid and the word's y.
pub fn cluster_rows(words: &[Word], threshold: f32) -> Vec<Row> {
    let mut sorted: Vec<&Word> = words.iter().collect();
    sorted.sort_by(|a, b| a.y().total_cmp(&b.y()));

    let mut rows = Vec::new();
    let mut current: Vec<Word> = Vec::new();
    let mut current_y = 0.0f32;

    for word in sorted {
        let y = word.y();

        if current.is_empty() {
            current_y = y;
        } else if (y - current_y).abs() <= threshold {
            current_y = (current_y + y) / 2.0;
        } else {
            rows.push(Row::new(std::mem::take(&mut current), current_y));
            current_y = y;
        }

        current.push(word.clone());
    }

    if !current.is_empty() {
        rows.push(Row::new(current, current_y));
    }

    debug!("Clustered {} words into {} rows", words.len(), rows.len());

    rows
}
