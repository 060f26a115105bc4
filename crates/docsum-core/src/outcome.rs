//! What the handler decided to do with an upload event, and the
//! `{statusCode, body}` contract the Lambda platform observes.

use std::fmt;

use serde::{Deserialize, Serialize};

pub const STATUS_OK: u16 = 200;
pub const STATUS_REJECTED: u16 = 400;
pub const STATUS_INTERNAL: u16 = 500;

/// Deliberate, non-error reasons for not processing an upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    WrongLocation,
    UnsupportedType,
    AlreadyProcessed,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SkipReason::WrongLocation => "wrong location",
            SkipReason::UnsupportedType => "unsupported type",
            SkipReason::AlreadyProcessed => "already processed",
        };
        f.write_str(s)
    }
}

/// The step at which processing failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The notification itself could not be turned into an upload event.
    InvalidEvent,
    Fetch,
    Extraction,
    Summarization,
    Write,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FailureKind::InvalidEvent => "invalid event",
            FailureKind::Fetch => "fetch error",
            FailureKind::Extraction => "extraction error",
            FailureKind::Summarization => "summarization error",
            FailureKind::Write => "write error",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Summarized {
        bucket: String,
        source_key: String,
        summary_key: String,
    },
    Skipped {
        key: String,
        reason: SkipReason,
        /// Human-readable explanation returned in the response body.
        message: String,
    },
    Failed {
        kind: FailureKind,
        detail: String,
    },
}

impl Outcome {
    pub fn status_code(&self) -> u16 {
        match self {
            Outcome::Summarized { .. } => STATUS_OK,
            Outcome::Skipped { .. } => STATUS_REJECTED,
            Outcome::Failed {
                kind: FailureKind::InvalidEvent,
                ..
            } => STATUS_REJECTED,
            Outcome::Failed { .. } => STATUS_INTERNAL,
        }
    }

    pub fn message(&self) -> String {
        match self {
            Outcome::Summarized {
                bucket,
                summary_key,
                ..
            } => format!("Summary saved at s3://{bucket}/{summary_key}"),
            Outcome::Skipped { message, .. } => message.clone(),
            Outcome::Failed { kind, detail } => format!("Error ({kind}): {detail}"),
        }
    }

    pub fn response(&self) -> HandlerResponse {
        HandlerResponse {
            status_code: self.status_code(),
            body: self.message(),
        }
    }
}

/// The return value of the Lambda handler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandlerResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub body: String,
}

impl HandlerResponse {
    /// Combine per-record responses into the single response for a
    /// notification. All successes stay 200 with their messages joined;
    /// otherwise the highest status code wins (first one on ties).
    pub fn aggregate(responses: Vec<HandlerResponse>) -> HandlerResponse {
        if responses.len() <= 1 {
            return responses.into_iter().next().unwrap_or_else(Self::empty);
        }

        if responses.iter().all(|r| r.status_code == STATUS_OK) {
            let body = responses
                .iter()
                .map(|r| r.body.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            return HandlerResponse {
                status_code: STATUS_OK,
                body,
            };
        }

        responses
            .into_iter()
            .fold(None::<HandlerResponse>, |worst, r| match worst {
                Some(w) if w.status_code >= r.status_code => Some(w),
                _ => Some(r),
            })
            .unwrap_or_else(Self::empty)
    }

    fn empty() -> HandlerResponse {
        HandlerResponse {
            status_code: STATUS_REJECTED,
            body: "No records in event".to_string(),
        }
    }
}
