use std::sync::Arc;

use docsum_bedrock::summarize::DocumentSummarizer;
use docsum_core::config::PipelineConfig;
use docsum_core::document::{ExtractedDocument, SummaryResult};
use docsum_core::event::{S3Notification, UploadEvent};
use docsum_core::outcome::{FailureKind, HandlerResponse, Outcome, SkipReason};
use docsum_core::s3_keys;
use docsum_extract::extractor::TextExtractor;
use docsum_extract::format::DocumentFormat;
use docsum_storage::store::{ObjectStore, TEXT_CONTENT_TYPE};
use tracing::{error, info, warn};

use crate::error::PipelineError;

/// Decides what to do with each upload and runs the
/// fetch, extract, summarize and write-back steps.
///
/// Collaborators are injected so tests can substitute in-memory doubles.
#[derive(Clone)]
pub struct Dispatcher {
    config: PipelineConfig,
    store: Arc<dyn ObjectStore>,
    extractor: Arc<dyn TextExtractor>,
    summarizer: Arc<dyn DocumentSummarizer>,
}

impl Dispatcher {
    pub fn new(
        config: PipelineConfig,
        store: Arc<dyn ObjectStore>,
        extractor: Arc<dyn TextExtractor>,
        summarizer: Arc<dyn DocumentSummarizer>,
    ) -> Self {
        Self {
            config,
            store,
            extractor,
            summarizer,
        }
    }

    /// Handle a raw Lambda payload. Never fails: malformed payloads become a
    /// 400 response.
    pub async fn handle_payload(&self, payload: serde_json::Value) -> HandlerResponse {
        match UploadEvent::from_payload(payload) {
            Ok(events) => self.handle_events(&events).await,
            Err(e) => invalid_event(e.to_string()).response(),
        }
    }

    /// Dispatch every record of a notification in order and combine the
    /// results.
    pub async fn handle_notification(&self, notification: &S3Notification) -> HandlerResponse {
        match UploadEvent::from_notification(notification) {
            Ok(events) => self.handle_events(&events).await,
            Err(e) => invalid_event(e.to_string()).response(),
        }
    }

    async fn handle_events(&self, events: &[UploadEvent]) -> HandlerResponse {
        let mut responses = Vec::with_capacity(events.len());
        for event in events {
            responses.push(self.dispatch(event).await.response());
        }

        HandlerResponse::aggregate(responses)
    }

    /// Process a single upload and log the outcome.
    pub async fn dispatch(&self, event: &UploadEvent) -> Outcome {
        let outcome = match self.route(&event.key) {
            Ok(format) => match self.process(event, format).await {
                Ok(outcome) => outcome,
                Err(e) => e.into(),
            },
            Err(skipped) => skipped,
        };

        log_outcome(event, &outcome);
        outcome
    }

    /// Apply the routing rules in order; the first rule that fails decides
    /// the skip reason. Runs before anything touches the bucket.
    fn route(&self, key: &str) -> Result<DocumentFormat, Outcome> {
        let skip = |reason: SkipReason, message: String| Outcome::Skipped {
            key: key.to_string(),
            reason,
            message,
        };

        if !key.starts_with(&self.config.source_prefix) {
            return Err(skip(
                SkipReason::WrongLocation,
                format!("File not in {} folder", self.config.source_prefix),
            ));
        }

        let format = s3_keys::extension(key)
            .filter(|ext| self.config.allows_extension(ext))
            .and_then(|ext| DocumentFormat::from_extension(&ext).ok())
            .ok_or_else(|| skip(SkipReason::UnsupportedType, "Unsupported file type".to_string()))?;

        if s3_keys::is_summary_key(key, &self.config.summary_marker) {
            return Err(skip(
                SkipReason::AlreadyProcessed,
                "File is already a summary".to_string(),
            ));
        }

        Ok(format)
    }

    async fn process(
        &self,
        event: &UploadEvent,
        format: DocumentFormat,
    ) -> Result<Outcome, PipelineError> {
        info!(bucket = %event.bucket, key = %event.key, %format, "received file");

        let bytes = self
            .store
            .get_object(&event.bucket, &event.key)
            .await
            .map_err(PipelineError::Fetch)?;

        let document = ExtractedDocument::new(
            event.key.as_str(),
            self.extractor.extract(bytes, format).await?,
        );
        let chars = document.char_count();
        info!(key = %document.source_key, chars, "document text extracted");

        let prompt_text = document.prompt_text(self.config.max_prompt_chars);
        if prompt_text.len() < document.text.len() {
            info!(
                key = %event.key,
                chars,
                kept = self.config.max_prompt_chars,
                "document truncated for prompt"
            );
        }

        let summary = SummaryResult {
            destination_key: s3_keys::summary_key(
                &document.source_key,
                &self.config.destination_prefix,
                &self.config.summary_marker,
            ),
            text: self.summarizer.summarize(prompt_text).await?,
        };

        self.store
            .put_object(
                &event.bucket,
                &summary.destination_key,
                summary.text.into_bytes(),
                TEXT_CONTENT_TYPE,
            )
            .await
            .map_err(PipelineError::Write)?;

        Ok(Outcome::Summarized {
            bucket: event.bucket.clone(),
            source_key: document.source_key,
            summary_key: summary.destination_key,
        })
    }
}

fn invalid_event(detail: String) -> Outcome {
    let outcome = Outcome::Failed {
        kind: FailureKind::InvalidEvent,
        detail,
    };
    warn!(reason = %outcome.message(), "rejected notification");
    outcome
}

fn log_outcome(event: &UploadEvent, outcome: &Outcome) {
    match outcome {
        Outcome::Summarized { summary_key, .. } => info!(
            bucket = %event.bucket,
            key = %event.key,
            summary_key = %summary_key,
            "summary saved"
        ),
        Outcome::Skipped { reason, .. } => info!(
            bucket = %event.bucket,
            key = %event.key,
            reason = %reason,
            "skipped upload"
        ),
        Outcome::Failed { kind, detail } => error!(
            bucket = %event.bucket,
            key = %event.key,
            reason = %kind,
            error = %detail,
            "failed to summarize upload"
        ),
    }
}
