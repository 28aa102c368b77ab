//! Flatten the OCR document structure into words.

use tracing::{debug, warn};

use crate::models::ocr::{DocumentStructure, OcrWord};
use crate::models::table::{BoundingBox, Word};

/// Collect every word of the document in page → block → paragraph order.
///
/// Words whose bounding box has fewer than four vertices are skipped; the
/// rest of the document is still ingested.
pub fn ingest_words(structure: &DocumentStructure) -> Vec<Word> {
    let mut words = Vec::new();
    let mut rejected = 0usize;

    for (page_index, page) in structure.pages.iter().enumerate() {
        for block in &page.blocks {
            for paragraph in &block.paragraphs {
                for ocr_word in &paragraph.words {
                    match bounding_box(ocr_word) {
                        Some(bounding_box) => words.push(Word {
                            text: ocr_word.text(),
                            bounding_box,
                            confidence: ocr_word.confidence.unwrap_or(0.0).clamp(0.0, 1.0),
                            page_index,
                            block_type: block.block_type,
                        }),
                        None => {
                            rejected += 1;
                            warn!(
                                "Skipping word {:?} on page {}: {} bounding box vertices",
                                ocr_word.text(),
                                page_index,
                                ocr_word.bounding_box.vertices.len()
                            );
                        }
                    }
                }
            }
        }
    }

    debug!(
        "Ingested {} words from {} pages ({} rejected)",
        words.len(),
        structure.pages.len(),
        rejected
    );

    words
}

fn bounding_box(word: &OcrWord) -> Option<BoundingBox> {
    match word.bounding_box.vertices.as_slice() {
        [a, b, c, d, ..] => Some([*a, *b, *c, *d]),
        _ => None,
    }
}
