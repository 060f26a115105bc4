use std::sync::Arc;

use docsum_bedrock::invoke::BedrockInvoker;
use docsum_bedrock::retry::{RetryPolicy, TokioSleeper};
use docsum_bedrock::summarize::Summarizer;
use docsum_core::config::PipelineConfig;
use docsum_extract::extractor::FormatExtractor;
use docsum_lambda::dispatch::Dispatcher;
use docsum_storage::store::S3ObjectStore;
use lambda_runtime::{LambdaEvent, service_fn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Structured JSON logging for CloudWatch
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    let config = PipelineConfig::from_env()?;
    let policy = RetryPolicy::new(config.max_attempts);
    tracing::info!(
        source_prefix = %config.source_prefix,
        destination_prefix = %config.destination_prefix,
        model_id = %config.model_id,
        max_attempts = config.max_attempts,
        worst_case_backoff_ms = policy.worst_case_total_delay().as_millis() as u64,
        "starting summarizer"
    );

    let sdk_config = docsum_storage::client::load_sdk_config().await;
    let store = S3ObjectStore::new(docsum_storage::client::build_client(&sdk_config));
    let summarizer = Summarizer::new(
        BedrockInvoker::from_config(&sdk_config),
        TokioSleeper,
        config.model_id.clone(),
        config.max_output_tokens,
        policy,
    );

    let dispatcher = Arc::new(Dispatcher::new(
        config,
        Arc::new(store),
        Arc::new(FormatExtractor),
        Arc::new(summarizer),
    ));

    lambda_runtime::run(service_fn(move |event: LambdaEvent<serde_json::Value>| {
        let dispatcher = Arc::clone(&dispatcher);
        async move {
            let request_id = event.context.request_id.clone();
            let response = dispatcher.handle_payload(event.payload).await;
            tracing::info!(
                request_id = %request_id,
                status_code = response.status_code,
                "invocation complete"
            );
            Ok::<_, lambda_runtime::Error>(response)
        }
    }))
    .await
    .map_err(|e| eyre::eyre!(e))
}
