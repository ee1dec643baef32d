//! Type conversions between AWS Bedrock SDK and domain types

use aws_sdk_bedrockruntime::error::DisplayErrorContext;
use aws_sdk_bedrockruntime::types as bedrock;
use triage_application::GatewayError;
use triage_domain::{Message, Role};

// ─── Domain → Bedrock ────────────────────────────────────────────

/// Convert a non-system domain message to a Bedrock message.
///
/// System messages travel separately (`SystemContentBlock`) and are
/// rejected here.
pub fn convert_message(message: &Message) -> Result<bedrock::Message, GatewayError> {
    let role = match message.role {
        Role::User => bedrock::ConversationRole::User,
        Role::Assistant => bedrock::ConversationRole::Assistant,
        Role::System => {
            return Err(GatewayError::RequestFailed(
                "System messages must be sent as the system prompt".to_string(),
            ));
        }
    };

    bedrock::Message::builder()
        .role(role)
        .content(bedrock::ContentBlock::Text(message.content.clone()))
        .build()
        .map_err(|e| GatewayError::RequestFailed(format!("Failed to build message: {}", e)))
}

// ─── Bedrock → Domain ────────────────────────────────────────────

/// Concatenate the text blocks of a Converse output.
///
/// Non-text blocks (images, tool use, guard content) are skipped.
pub fn converse_output_text(output: &bedrock::ConverseOutput) -> String {
    match output {
        bedrock::ConverseOutput::Message(message) => message
            .content()
            .iter()
            .filter_map(|block| match block {
                bedrock::ContentBlock::Text(text) => Some(text.as_str()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join(""),
        _ => String::new(),
    }
}

/// Convert a Bedrock SDK error to a GatewayError.
pub fn convert_converse_error(
    err: &aws_sdk_bedrockruntime::error::SdkError<
        aws_sdk_bedrockruntime::operation::converse::ConverseError,
    >,
) -> GatewayError {
    use aws_sdk_bedrockruntime::operation::converse::ConverseError;

    match err {
        aws_sdk_bedrockruntime::error::SdkError::ServiceError(service_err) => {
            match service_err.err() {
                ConverseError::ThrottlingException(e) => {
                    GatewayError::RequestFailed(format!("Bedrock throttled: {}", e))
                }
                ConverseError::ModelNotReadyException(e) => {
                    GatewayError::ModelNotAvailable(format!("Bedrock model not ready: {}", e))
                }
                ConverseError::ResourceNotFoundException(e) => {
                    GatewayError::ModelNotAvailable(format!("Bedrock model not found: {}", e))
                }
                ConverseError::ValidationException(e) => {
                    GatewayError::RequestFailed(format!("Bedrock validation error: {}", e))
                }
                ConverseError::ModelTimeoutException(_) => GatewayError::Timeout,
                other => GatewayError::RequestFailed(format!("Bedrock error: {:?}", other)),
            }
        }
        aws_sdk_bedrockruntime::error::SdkError::TimeoutError(_) => GatewayError::Timeout,
        other => GatewayError::ConnectionError(format!(
            "Bedrock SDK error: {}",
            DisplayErrorContext(other)
        )),
    }
}
