//! Model providers
//!
//! [`build_gateway`] turns the `[llm]` section into a ready [`LlmGateway`].

pub mod openai;

#[cfg(feature = "bedrock")]
pub mod bedrock;

use crate::config::{FileLlmConfig, ProviderKind};
use openai::OpenAiGateway;
use std::sync::Arc;
use tracing::{debug, info};
use triage_application::{GatewayError, LlmGateway};

/// Build the configured gateway.
pub async fn build_gateway(config: &FileLlmConfig) -> Result<Arc<dyn LlmGateway>, GatewayError> {
    let kind = config.provider_kind().ok_or_else(|| {
        GatewayError::Configuration(format!("unknown provider '{}'", config.provider))
    })?;

    match kind {
        ProviderKind::OpenAi => {
            let api_key = std::env::var(&config.api_key_env).ok();
            if api_key.is_none() {
                debug!(
                    "{} not set; calling {} without authorization",
                    config.api_key_env, config.base_url
                );
            }
            let gateway = OpenAiGateway::new(&config.base_url, &config.model, api_key)?
                .with_temperature(config.temperature)
                .with_max_tokens(config.max_tokens);
            info!(model = %config.model, base_url = %config.base_url, "OpenAI-compatible provider initialized");
            Ok(Arc::new(gateway))
        }
        ProviderKind::Bedrock => build_bedrock(config).await,
    }
}

#[cfg(feature = "bedrock")]
async fn build_bedrock(config: &FileLlmConfig) -> Result<Arc<dyn LlmGateway>, GatewayError> {
    let gateway = bedrock::BedrockGateway::new(&config.region, &config.model)
        .await
        .with_temperature(config.temperature)
        .with_max_tokens(config.max_tokens);
    Ok(Arc::new(gateway))
}

#[cfg(not(feature = "bedrock"))]
async fn build_bedrock(_config: &FileLlmConfig) -> Result<Arc<dyn LlmGateway>, GatewayError> {
    Err(GatewayError::Configuration(
        "provider 'bedrock' requires building with the `bedrock` feature".to_string(),
    ))
}
