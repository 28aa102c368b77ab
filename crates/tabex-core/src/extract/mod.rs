//! Commodity extraction over reconstructed tables and recognized text.

mod commodity;
mod fallback;
mod pipeline;
pub mod rules;
mod summary;

pub use commodity::{locate_commodity_column, ProductNameExtractor};
pub use fallback::TextFallbackExtractor;
pub use pipeline::CommodityPipeline;
pub use summary::{summarize_tables, summarize_text};
