//! OCR engine output as delivered by the document-detection collaborator.
//!
//! Field names follow the camelCase JSON the vision service emits. Every
//! nested level is optional-friendly: vision engines drop empty arrays and
//! zero coordinates, so missing fields deserialize to their defaults.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Result of a document OCR call.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OcrResult {
    /// Whether the OCR call succeeded.
    pub success: bool,

    /// Recognized full text, if the engine produced it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_text: Option<String>,

    /// Document-structure detection output.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_data: Option<TableData>,

    /// Source file name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,

    /// Source file size in bytes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_size: Option<u64>,

    /// Source MIME type.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_type: Option<String>,

    /// Overall OCR confidence (0.0 - 1.0).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f32>,

    /// Whether the source was a scanned (image-only) PDF.
    #[serde(rename = "isScannedPDF")]
    pub is_scanned_pdf: bool,

    /// Number of pages in the source document.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_count: Option<u32>,
}

impl OcrResult {
    /// Decode an OCR result from its JSON representation.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Build a successful result carrying only recognized text.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            success: true,
            full_text: Some(text.into()),
            ..Self::default()
        }
    }

    /// Build a successful result carrying a document structure.
    pub fn from_structure(structure: DocumentStructure) -> Self {
        Self {
            success: true,
            table_data: Some(TableData {
                success: true,
                document_structure: Some(structure),
            }),
            ..Self::default()
        }
    }

    /// The document structure, if detection succeeded and produced one.
    pub fn document_structure(&self) -> Option<&DocumentStructure> {
        self.table_data
            .as_ref()
            .filter(|t| t.success)
            .and_then(|t| t.document_structure.as_ref())
    }

    /// Recognized text, if present and not blank.
    pub fn text(&self) -> Option<&str> {
        self.full_text
            .as_deref()
            .filter(|t| !t.trim().is_empty())
    }
}

/// Document-structure detection envelope.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TableData {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_structure: Option<DocumentStructure>,
}

/// Hierarchical page → block → paragraph → word output.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentStructure {
    pub pages: Vec<Page>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Page {
    pub blocks: Vec<Block>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Block {
    pub block_type: BlockType,
    pub paragraphs: Vec<Paragraph>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Paragraph {
    pub words: Vec<OcrWord>,
}

/// A recognized word, as the engine reports it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OcrWord {
    pub symbols: Vec<Symbol>,
    pub bounding_box: BoundingPoly,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f32>,
}

impl OcrWord {
    /// Word text assembled from its symbols.
    pub fn text(&self) -> String {
        self.symbols.iter().map(|s| s.text.as_str()).collect()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Symbol {
    pub text: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BoundingPoly {
    pub vertices: Vec<Vertex>,
}

/// A polygon vertex in image pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Vertex {
    pub x: f32,
    pub y: f32,
}

/// Block type tag reported by the engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BlockType {
    Text,
    Table,
    Picture,
    Ruler,
    Barcode,
    #[default]
    #[serde(other)]
    Unknown,
}
