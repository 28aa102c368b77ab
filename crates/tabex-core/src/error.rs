//! Error types for the tabex-core library.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for the tabex library.
#[derive(Error, Debug)]
pub enum TabexError {
    /// OCR payload could not be decoded.
    #[error("invalid OCR payload: {0}")]
    Json(#[from] serde_json::Error),

    /// A configured pattern failed to compile.
    #[error("invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Why an extraction pass produced no data.
///
/// These are outcomes, not errors: the pipeline returns them inside
/// [`ExtractionResult::Failure`](crate::models::extraction::ExtractionResult)
/// and never raises.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureReason {
    /// No OCR result, `success = false`, or neither text nor structure present.
    #[error("no valid result")]
    InputMissing,

    /// A document structure was present but produced no rows.
    #[error("no document structure found")]
    StructureAbsent,
}

/// Result type for the tabex library.
pub type Result<T> = std::result::Result<T, TabexError>;
