use async_trait::async_trait;
use aws_sdk_bedrockruntime::Client;
use aws_smithy_types::Blob;

use crate::error::InvokeError;

const JSON_CONTENT_TYPE: &str = "application/json";

/// One synchronous call to a hosted model.
#[async_trait]
pub trait ModelInvoker: Send + Sync {
    async fn invoke(&self, model_id: &str, body: Vec<u8>) -> Result<Vec<u8>, InvokeError>;
}

/// [`ModelInvoker`] backed by the Bedrock runtime `InvokeModel` API.
#[derive(Clone)]
pub struct BedrockInvoker {
    client: Client,
}

impl BedrockInvoker {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub fn from_config(config: &aws_config::SdkConfig) -> Self {
        Self::new(Client::new(config))
    }
}

#[async_trait]
impl ModelInvoker for BedrockInvoker {
    async fn invoke(&self, model_id: &str, body: Vec<u8>) -> Result<Vec<u8>, InvokeError> {
        let response = self
            .client
            .invoke_model()
            .model_id(model_id)
            .content_type(JSON_CONTENT_TYPE)
            .accept(JSON_CONTENT_TYPE)
            .body(Blob::new(body))
            .send()
            .await
            .map_err(|e| {
                let err = e.into_service_error();
                if err.is_throttling_exception() {
                    InvokeError::Throttled(err.to_string())
                } else {
                    InvokeError::Service(err.to_string())
                }
            })?;

        Ok(response.body.into_inner())
    }
}
