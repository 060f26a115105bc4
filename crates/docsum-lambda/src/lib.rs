//! docsum-lambda
//!
//! The S3-triggered handler: routes each uploaded object, extracts its
//! text, asks Bedrock for a summary and writes the summary back.

pub mod dispatch;
pub mod error;
