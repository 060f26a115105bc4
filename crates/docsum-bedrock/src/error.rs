use thiserror::Error;

/// Failure of a single remote call, classified at the SDK boundary.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InvokeError {
    /// The service rejected the call because the caller exceeded a rate
    /// limit. Safe to retry after a delay.
    #[error("request throttled: {0}")]
    Throttled(String),

    /// Any other failure. Retrying would not change the result.
    #[error("model invocation failed: {0}")]
    Service(String),
}

#[derive(Debug, Error)]
pub enum SummarizeError {
    #[error("model still throttled after {attempts} attempts")]
    RetriesExhausted { attempts: u32 },

    #[error("model invocation failed: {0}")]
    Invocation(String),

    #[error("response parsing failed: {0}")]
    MalformedResponse(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
