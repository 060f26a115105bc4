use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use docsum_bedrock::error::{InvokeError, SummarizeError};
use docsum_bedrock::invoke::ModelInvoker;
use docsum_bedrock::retry::{RetryPolicy, Sleeper};
use docsum_bedrock::summarize::{DocumentSummarizer, Summarizer};

const MODEL: &str = "anthropic.claude-3-sonnet-20240229-v1:0";

/// Replays a fixed script of results and records every request body.
struct ScriptedInvoker {
    script: Mutex<VecDeque<Result<Vec<u8>, InvokeError>>>,
    requests: Mutex<Vec<(String, Vec<u8>)>>,
}

impl ScriptedInvoker {
    fn new(script: Vec<Result<Vec<u8>, InvokeError>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl<'a> ModelInvoker for &'a ScriptedInvoker {
    async fn invoke(&self, model_id: &str, body: Vec<u8>) -> Result<Vec<u8>, InvokeError> {
        self.requests
            .lock()
            .unwrap()
            .push((model_id.to_string(), body));
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(InvokeError::Throttled("script exhausted".to_string())))
    }
}

#[derive(Default)]
struct RecordingSleeper {
    delays: Mutex<Vec<Duration>>,
}

impl RecordingSleeper {
    fn delays(&self) -> Vec<Duration> {
        self.delays.lock().unwrap().clone()
    }
}

#[async_trait]
impl<'a> Sleeper for &'a RecordingSleeper {
    async fn sleep(&self, duration: Duration) {
        self.delays.lock().unwrap().push(duration);
    }
}

fn text_response(text: &str) -> Result<Vec<u8>, InvokeError> {
    Ok(serde_json::to_vec(&serde_json::json!({
        "id": "msg_01",
        "type": "message",
        "role": "assistant",
        "content": [{"type": "text", "text": text}],
        "stop_reason": "end_turn",
        "usage": {"input_tokens": 12, "output_tokens": 5}
    }))
    .unwrap())
}

fn throttled() -> Result<Vec<u8>, InvokeError> {
    Err(InvokeError::Throttled("Too many requests".to_string()))
}

#[tokio::test]
async fn first_attempt_success_makes_one_call_and_never_sleeps() {
    let invoker = ScriptedInvoker::new(vec![text_response("A short greeting.")]);
    let sleeper = RecordingSleeper::default();
    let summarizer = Summarizer::new(&invoker, &sleeper, MODEL, 500, RetryPolicy::new(5));

    let summary = summarizer.summarize("hello world").await.unwrap();

    assert_eq!(summary, "A short greeting.");
    assert_eq!(invoker.calls(), 1);
    assert!(sleeper.delays().is_empty());
}

#[tokio::test]
async fn request_body_uses_messages_format() {
    let invoker = ScriptedInvoker::new(vec![text_response("ok")]);
    let sleeper = RecordingSleeper::default();
    let summarizer = Summarizer::new(&invoker, &sleeper, MODEL, 321, RetryPolicy::new(5));

    summarizer.summarize("hello world").await.unwrap();

    let requests = invoker.requests.lock().unwrap();
    let (model_id, body) = &requests[0];
    assert_eq!(model_id, MODEL);
    let body: serde_json::Value = serde_json::from_slice(body).unwrap();
    assert_eq!(body["anthropic_version"], "bedrock-2023-05-31");
    assert_eq!(body["max_tokens"], 321);
    assert_eq!(body["messages"][0]["role"], "user");
    assert_eq!(
        body["messages"][0]["content"],
        "Summarize the following document:\n\nhello world"
    );
}

#[tokio::test]
async fn throttled_three_times_then_succeeds() {
    let invoker = ScriptedInvoker::new(vec![
        throttled(),
        throttled(),
        throttled(),
        text_response("done"),
    ]);
    let sleeper = RecordingSleeper::default();
    let summarizer = Summarizer::new(&invoker, &sleeper, MODEL, 500, RetryPolicy::new(5));

    let summary = summarizer.summarize("text").await.unwrap();

    assert_eq!(summary, "done");
    assert_eq!(invoker.calls(), 4);

    let delays = sleeper.delays();
    assert_eq!(delays.len(), 3);
    for (attempt, delay) in delays.iter().enumerate() {
        let floor = Duration::from_secs(1 << attempt);
        assert!(*delay >= floor, "attempt {attempt}: {delay:?} < {floor:?}");
        assert!(*delay <= floor + Duration::from_secs(1));
    }
    assert!(delays.windows(2).all(|w| w[0] <= w[1]));
}

#[tokio::test]
async fn always_throttled_exhausts_after_max_attempts() {
    let invoker = ScriptedInvoker::new(Vec::new());
    let sleeper = RecordingSleeper::default();
    let summarizer = Summarizer::new(&invoker, &sleeper, MODEL, 500, RetryPolicy::new(5));

    let err = summarizer.summarize("text").await.unwrap_err();

    assert!(matches!(err, SummarizeError::RetriesExhausted { attempts: 5 }));
    assert_eq!(invoker.calls(), 5);
    assert_eq!(sleeper.delays().len(), 4);
}

#[tokio::test]
async fn non_throttling_error_is_not_retried() {
    let invoker = ScriptedInvoker::new(vec![
        Err(InvokeError::Service("AccessDeniedException".to_string())),
        text_response("never reached"),
    ]);
    let sleeper = RecordingSleeper::default();
    let summarizer = Summarizer::new(&invoker, &sleeper, MODEL, 500, RetryPolicy::new(5));

    let err = summarizer.summarize("text").await.unwrap_err();

    assert!(matches!(err, SummarizeError::Invocation(_)));
    assert_eq!(invoker.calls(), 1);
    assert!(sleeper.delays().is_empty());
}

#[tokio::test]
async fn response_without_text_block_is_malformed() {
    let body = serde_json::to_vec(&serde_json::json!({
        "content": [{"type": "tool_use", "id": "t1", "name": "x", "input": {}}]
    }))
    .unwrap();
    let invoker = ScriptedInvoker::new(vec![Ok(body)]);
    let sleeper = RecordingSleeper::default();
    let summarizer = Summarizer::new(&invoker, &sleeper, MODEL, 500, RetryPolicy::new(5));

    let err = summarizer.summarize("text").await.unwrap_err();

    assert!(matches!(err, SummarizeError::MalformedResponse(_)));
}

#[tokio::test]
async fn non_json_response_is_malformed() {
    let invoker = ScriptedInvoker::new(vec![Ok(b"<html>".to_vec())]);
    let sleeper = RecordingSleeper::default();
    let summarizer = Summarizer::new(&invoker, &sleeper, MODEL, 500, RetryPolicy::new(1));

    let err = summarizer.summarize("text").await.unwrap_err();

    assert!(matches!(err, SummarizeError::MalformedResponse(_)));
}

#[tokio::test]
async fn single_attempt_policy_never_sleeps() {
    let invoker = ScriptedInvoker::new(vec![throttled()]);
    let sleeper = RecordingSleeper::default();
    let summarizer = Summarizer::new(&invoker, &sleeper, MODEL, 500, RetryPolicy::new(1));

    let err = summarizer.summarize("text").await.unwrap_err();

    assert!(matches!(err, SummarizeError::RetriesExhausted { attempts: 1 }));
    assert_eq!(invoker.calls(), 1);
    assert!(sleeper.delays().is_empty());
}
