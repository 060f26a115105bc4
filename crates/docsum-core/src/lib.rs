//! docsum-core
//!
//! Pure domain types for the summarization pipeline: upload events, S3 key
//! conventions, handler outcomes and configuration.
//! No AWS SDK dependency. This is the shared vocabulary of the other crates.

pub mod config;
pub mod document;
pub mod error;
pub mod event;
pub mod outcome;
pub mod s3_keys;
