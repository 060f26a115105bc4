use aws_sdk_s3::Client;

/// Load the shared AWS configuration from the default credential and region
/// chain. Inside Lambda this picks up the execution role and `AWS_REGION`.
pub async fn load_sdk_config() -> aws_config::SdkConfig {
    aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await
}

pub fn build_client(config: &aws_config::SdkConfig) -> Client {
    Client::new(config)
}
