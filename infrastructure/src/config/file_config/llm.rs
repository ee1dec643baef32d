//! Model provider configuration from TOML (`[llm]` section)

use serde::{Deserialize, Serialize};

/// Supported model providers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    /// Any OpenAI-compatible chat completions endpoint (OpenAI, vLLM, Ollama)
    OpenAi,
    /// AWS Bedrock Converse API
    Bedrock,
}

impl ProviderKind {
    pub const NAMES: [&'static str; 2] = ["openai", "bedrock"];

    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "openai" => Some(ProviderKind::OpenAi),
            "bedrock" => Some(ProviderKind::Bedrock),
            _ => None,
        }
    }
}

/// Raw `[llm]` configuration
///
/// ```toml
/// [llm]
/// provider = "bedrock"
/// model = "anthropic.claude-3-sonnet-20240229-v1:0"
/// region = "us-east-1"
/// temperature = 0.6
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLlmConfig {
    /// Provider name (`openai` or `bedrock`)
    pub provider: String,
    /// Model identifier as the provider knows it
    pub model: String,
    /// Base URL for OpenAI-compatible endpoints
    pub base_url: String,
    /// Environment variable holding the API key (OpenAI-compatible only)
    pub api_key_env: String,
    /// Default sampling temperature for responders
    pub temperature: f32,
    /// Completion token limit
    pub max_tokens: u32,
    /// AWS region (Bedrock only)
    pub region: String,
}

impl Default for FileLlmConfig {
    fn default() -> Self {
        Self {
            provider: "openai".to_string(),
            model: "gpt-4o-mini".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
            api_key_env: "OPENAI_API_KEY".to_string(),
            temperature: 0.6,
            max_tokens: 1024,
            region: "us-east-1".to_string(),
        }
    }
}

impl FileLlmConfig {
    pub fn provider_kind(&self) -> Option<ProviderKind> {
        ProviderKind::parse(&self.provider)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_parse() {
        assert_eq!(ProviderKind::parse("OpenAI"), Some(ProviderKind::OpenAi));
        assert_eq!(ProviderKind::parse(" bedrock "), Some(ProviderKind::Bedrock));
        assert_eq!(ProviderKind::parse("vertex"), None);
    }

    #[test]
    fn test_llm_section_deserialize() {
        let toml_str = r#"
[llm]
provider = "bedrock"
model = "anthropic.claude-3-sonnet-20240229-v1:0"
"#;
        let config: super::super::FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.llm.provider_kind(), Some(ProviderKind::Bedrock));
        assert_eq!(config.llm.region, "us-east-1");
        assert_eq!(config.llm.temperature, 0.6);
    }
}
