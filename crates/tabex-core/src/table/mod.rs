//! Table reconstruction from OCR word positions.
//!
//! Words are flattened out of the document structure, clustered into rows by
//! vertical proximity, and assembled into a [`Table`](crate::models::table::Table)
//! whose first rows are read as headers.

mod assembler;
mod columns;
mod header;
mod ingest;
mod rows;
mod tagger;

pub use assembler::TableParser;
pub use columns::ColumnLayout;
pub use header::classify_headers;
pub use ingest::ingest_words;
pub use rows::cluster_rows;
pub use tagger::tag_rows;
