//! docsum-extract
//!
//! Plain-text extraction from uploaded documents: UTF-8 text, PDF and DOCX.

pub mod docx;
pub mod error;
pub mod extractor;
pub mod format;
pub mod pdf;
pub mod text;
