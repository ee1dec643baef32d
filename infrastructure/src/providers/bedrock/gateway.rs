//! Bedrock gateway implementation
//!
//! The Converse API is stateless: every call carries the full message list,
//! which maps directly onto [`CompletionRequest`].

use super::types;
use async_trait::async_trait;
use aws_sdk_bedrockruntime::Client as BedrockClient;
use aws_sdk_bedrockruntime::types as bedrock;
use tracing::{debug, info};
use triage_application::{GatewayError, LlmGateway};
use triage_domain::CompletionRequest;

/// Default model (Claude 3 Sonnet on Bedrock).
pub const DEFAULT_BEDROCK_MODEL: &str = "anthropic.claude-3-sonnet-20240229-v1:0";

pub struct BedrockGateway {
    client: BedrockClient,
    model_id: String,
    temperature: f32,
    max_tokens: i32,
}

impl BedrockGateway {
    /// Create a gateway, resolving AWS credentials from the default chain.
    pub async fn new(region: &str, model_id: impl Into<String>) -> Self {
        let aws_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(aws_config::Region::new(region.to_string()))
            .load()
            .await;
        let model_id = model_id.into();
        info!(region = %region, model = %model_id, "Bedrock provider initialized");

        Self {
            client: BedrockClient::new(&aws_config),
            model_id,
            temperature: 0.6,
            max_tokens: 1024,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = i32::try_from(max_tokens).unwrap_or(i32::MAX);
        self
    }
}

#[async_trait]
impl LlmGateway for BedrockGateway {
    fn model(&self) -> &str {
        &self.model_id
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<String, GatewayError> {
        let messages = request
            .conversation()
            .map(types::convert_message)
            .collect::<Result<Vec<_>, _>>()?;
        let system = request
            .system_prompt()
            .map(|prompt| vec![bedrock::SystemContentBlock::Text(prompt)]);

        debug!(
            model = %self.model_id,
            messages = messages.len(),
            "Calling Bedrock Converse API"
        );

        let response = self
            .client
            .converse()
            .model_id(&self.model_id)
            .set_system(system)
            .set_messages(Some(messages))
            .inference_config(
                bedrock::InferenceConfiguration::builder()
                    .max_tokens(self.max_tokens)
                    .temperature(request.temperature.unwrap_or(self.temperature))
                    .build(),
            )
            .send()
            .await
            .map_err(|e| types::convert_converse_error(&e))?;

        let output = response.output().ok_or_else(|| {
            GatewayError::InvalidResponse("No output in Bedrock response".to_string())
        })?;

        Ok(types::converse_output_text(output))
    }
}
