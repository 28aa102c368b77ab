//! Builders shared by unit tests.

use std::collections::BTreeMap;

use crate::models::ocr::{
    Block, BlockType, BoundingPoly, DocumentStructure, OcrWord, Page, Paragraph, Symbol, Vertex,
};
use crate::models::table::Word;

/// A word with a 40x12 box whose top-left corner is at (x, y).
pub fn word(text: &str, x: f32, y: f32) -> Word {
    Word {
        text: text.to_string(),
        bounding_box: [
            Vertex { x, y },
            Vertex { x: x + 40.0, y },
            Vertex { x: x + 40.0, y: y + 12.0 },
            Vertex { x, y: y + 12.0 },
        ],
        confidence: 0.9,
        page_index: 0,
        block_type: BlockType::Text,
    }
}

/// A document structure holding the given words, one block per page.
pub fn structure(words: Vec<Word>) -> DocumentStructure {
    let mut pages: BTreeMap<usize, Vec<OcrWord>> = BTreeMap::new();

    for word in words {
        pages.entry(word.page_index).or_default().push(OcrWord {
            symbols: vec![Symbol { text: word.text }],
            bounding_box: BoundingPoly {
                vertices: word.bounding_box.to_vec(),
            },
            confidence: Some(word.confidence),
        });
    }

    let last = pages.keys().next_back().copied();
    let page_count = last.map(|p| p + 1).unwrap_or(0);

    DocumentStructure {
        pages: (0..page_count)
            .map(|index| Page {
                blocks: vec![Block {
                    block_type: BlockType::Text,
                    paragraphs: vec![Paragraph {
                        words: pages.remove(&index).unwrap_or_default(),
                    }],
                }],
            })
            .collect(),
    }
}
