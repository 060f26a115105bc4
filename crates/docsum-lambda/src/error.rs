use docsum_bedrock::error::SummarizeError;
use docsum_core::outcome::{FailureKind, Outcome};
use docsum_extract::error::ExtractError;
use docsum_storage::error::StorageError;
use thiserror::Error;

/// A failure in one of the processing steps after routing.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("failed to fetch object: {0}")]
    Fetch(#[source] StorageError),

    #[error("failed to extract text: {0}")]
    Extract(#[from] ExtractError),

    #[error("failed to summarize: {0}")]
    Summarize(#[from] SummarizeError),

    #[error("failed to write summary: {0}")]
    Write(#[source] StorageError),
}

impl PipelineError {
    pub fn kind(&self) -> FailureKind {
        match self {
            PipelineError::Fetch(_) => FailureKind::Fetch,
            PipelineError::Extract(_) => FailureKind::Extraction,
            PipelineError::Summarize(_) => FailureKind::Summarization,
            PipelineError::Write(_) => FailureKind::Write,
        }
    }
}

impl From<PipelineError> for Outcome {
    fn from(e: PipelineError) -> Self {
        Outcome::Failed {
            kind: e.kind(),
            detail: e.to_string(),
        }
    }
}
