//! Data models shared by the table and text extraction paths.

pub mod config;
pub mod extraction;
pub mod ocr;
pub mod table;
