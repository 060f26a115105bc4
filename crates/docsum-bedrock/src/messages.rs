//! Anthropic Messages request and response bodies, as InvokeModel expects
//! them for Claude models on Bedrock.

use serde::{Deserialize, Serialize};

use crate::error::SummarizeError;

pub const ANTHROPIC_VERSION: &str = "bedrock-2023-05-31";

pub const SUMMARY_INSTRUCTION: &str = "Summarize the following document:";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessagesRequest {
    pub anthropic_version: String,
    pub max_tokens: u32,
    pub messages: Vec<RequestMessage>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RequestMessage {
    pub role: String,
    pub content: String,
}

impl MessagesRequest {
    /// A single user turn asking for a summary of `document_text`.
    pub fn summary(document_text: &str, max_tokens: u32) -> Self {
        Self {
            anthropic_version: ANTHROPIC_VERSION.to_string(),
            max_tokens,
            messages: vec![RequestMessage {
                role: "user".to_string(),
                content: format!("{SUMMARY_INSTRUCTION}\n\n{document_text}"),
            }],
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct MessagesResponse {
    #[serde(default)]
    pub content: Vec<ResponseBlock>,
    #[serde(default)]
    pub stop_reason: Option<String>,
    #[serde(default)]
    pub usage: Option<Usage>,
}

/// A content block. Only `text` blocks carry summary text; other block
/// types are kept so they can be skipped rather than failing to parse.
#[derive(Debug, Clone, Deserialize)]
pub struct ResponseBlock {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Usage {
    pub input_tokens: u64,
    pub output_tokens: u64,
}

impl MessagesResponse {
    pub fn from_slice(body: &[u8]) -> Result<Self, SummarizeError> {
        serde_json::from_slice(body).map_err(|e| {
            SummarizeError::MalformedResponse(format!("invalid response body: {e}"))
        })
    }

    /// Text of the first `text` block.
    pub fn first_text(&self) -> Result<&str, SummarizeError> {
        self.content
            .iter()
            .filter(|block| block.kind == "text")
            .find_map(|block| block.text.as_deref())
            .ok_or_else(|| {
                SummarizeError::MalformedResponse("no text block in response".to_string())
            })
    }
}
