//! Values passed between the pipeline steps of one invocation.

/// Plain text pulled out of an uploaded object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedDocument {
    pub source_key: String,
    pub text: String,
}

impl ExtractedDocument {
    pub fn new(source_key: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            source_key: source_key.into(),
            text: text.into(),
        }
    }

    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    /// The text to send to the model, cut to at most `limit` characters.
    pub fn prompt_text(&self, limit: Option<usize>) -> &str {
        crate::config::truncate_chars(&self.text, limit)
    }
}

/// A generated summary and the key it will be written to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryResult {
    pub destination_key: String,
    pub text: String,
}
