//! docsum-bedrock
//!
//! Bedrock model invocation for document summaries, with bounded retry on
//! throttling.

pub mod error;
pub mod invoke;
pub mod messages;
pub mod retry;
pub mod summarize;
