use async_trait::async_trait;
use tracing::{info, warn};

use crate::error::{InvokeError, SummarizeError};
use crate::invoke::ModelInvoker;
use crate::messages::{MessagesRequest, MessagesResponse};
use crate::retry::{RetryPolicy, Sleeper};

/// Produces a summary for a document's text.
#[async_trait]
pub trait DocumentSummarizer: Send + Sync {
    async fn summarize(&self, text: &str) -> Result<String, SummarizeError>;
}

/// Summarizes text with a Claude model, retrying throttled calls.
pub struct Summarizer<I, S> {
    invoker: I,
    sleeper: S,
    model_id: String,
    max_output_tokens: u32,
    policy: RetryPolicy,
}

impl<I, S> Summarizer<I, S>
where
    I: ModelInvoker,
    S: Sleeper,
{
    pub fn new(
        invoker: I,
        sleeper: S,
        model_id: impl Into<String>,
        max_output_tokens: u32,
        policy: RetryPolicy,
    ) -> Self {
        Self {
            invoker,
            sleeper,
            model_id: model_id.into(),
            max_output_tokens,
            policy,
        }
    }

    /// Invoke the model, sleeping `2^attempt + jitter` units after each
    /// throttled attempt. Any other failure is returned straight away.
    async fn invoke_with_retry(&self, body: &[u8]) -> Result<Vec<u8>, SummarizeError> {
        let max_attempts = self.policy.max_attempts.max(1);

        for attempt in 0..max_attempts {
            match self.invoker.invoke(&self.model_id, body.to_vec()).await {
                Ok(response) => return Ok(response),
                Err(InvokeError::Throttled(message)) => {
                    if attempt + 1 == max_attempts {
                        warn!(
                            model_id = %self.model_id,
                            attempt,
                            error = %message,
                            "throttled on final attempt"
                        );
                        break;
                    }

                    let delay = self.policy.jittered_delay(attempt);
                    warn!(
                        model_id = %self.model_id,
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        error = %message,
                        "throttled, backing off"
                    );
                    self.sleeper.sleep(delay).await;
                }
                Err(InvokeError::Service(message)) => {
                    return Err(SummarizeError::Invocation(message));
                }
            }
        }

        Err(SummarizeError::RetriesExhausted {
            attempts: max_attempts,
        })
    }
}

#[async_trait]
impl<I, S> DocumentSummarizer for Summarizer<I, S>
where
    I: ModelInvoker,
    S: Sleeper,
{
    async fn summarize(&self, text: &str) -> Result<String, SummarizeError> {
        let request = MessagesRequest::summary(text, self.max_output_tokens);
        let body = serde_json::to_vec(&request)?;

        let response_body = self.invoke_with_retry(&body).await?;
        let response = MessagesResponse::from_slice(&response_body)?;
        let summary = response.first_text()?.to_string();

        info!(
            model_id = %self.model_id,
            input_tokens = response.usage.map(|u| u.input_tokens),
            output_tokens = response.usage.map(|u| u.output_tokens),
            stop_reason = response.stop_reason.as_deref(),
            chars = summary.chars().count(),
            "summary received"
        );

        Ok(summary)
    }
}
