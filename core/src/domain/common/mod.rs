use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::{NoContext, Timestamp};

use crate::domain::common::entities::app_errors::CoreError;

pub mod entities;
pub mod services;

#[derive(Clone, Debug)]
pub struct MealPlannerConfig {
    pub llm: LLMConfig,
    pub generation: GenerationConfig,
}

/// Supported text-completion vendors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum LlmProvider {
    OpenAI,
    Anthropic,
}

impl LlmProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            LlmProvider::OpenAI => "openai",
            LlmProvider::Anthropic => "anthropic",
        }
    }

    /// Name of the environment variable holding this vendor's credential.
    pub fn credential_env(&self) -> &'static str {
        match self {
            LlmProvider::OpenAI => "OPENAI_API_KEY",
            LlmProvider::Anthropic => "ANTHROPIC_API_KEY",
        }
    }
}

impl fmt::Display for LlmProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug)]
pub struct LLMConfig {
    pub provider: LlmProvider,
    pub openai_api_key: Option<String>,
    pub openai_model: String,
    pub openai_base_url: String,
    pub anthropic_api_key: Option<String>,
    pub anthropic_model: String,
    pub anthropic_base_url: String,
    pub request_timeout: Duration,
}

impl LLMConfig {
    /// Returns the credential of the selected provider, failing when it is absent or blank.
    pub fn selected_api_key(&self) -> Result<String, CoreError> {
        let key = match self.provider {
            LlmProvider::OpenAI => self.openai_api_key.as_deref(),
            LlmProvider::Anthropic => self.anthropic_api_key.as_deref(),
        };

        key.map(str::trim)
            .filter(|k| !k.is_empty())
            .map(str::to_string)
            .ok_or_else(|| {
                CoreError::Configuration(format!(
                    "{} provider selected but {} is not set",
                    self.provider,
                    self.provider.credential_env()
                ))
            })
    }

    pub fn selected_model(&self) -> &str {
        match self.provider {
            LlmProvider::OpenAI => &self.openai_model,
            LlmProvider::Anthropic => &self.anthropic_model,
        }
    }
}

#[derive(Clone, Debug)]
pub struct GenerationConfig {
    /// Re-prompt the provider once with the validation issues when its first answer is unusable.
    pub correct_invalid_output: bool,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            correct_invalid_output: true,
        }
    }
}

pub fn generate_timestamp() -> (DateTime<Utc>, Timestamp) {
    let now = Utc::now();
    let seconds = now.timestamp().try_into().unwrap_or(0);
    let timestamp = Timestamp::from_unix(NoContext, seconds, 0);

    (now, timestamp)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn llm_config(provider: LlmProvider) -> LLMConfig {
        LLMConfig {
            provider,
            openai_api_key: Some("sk-test".to_string()),
            openai_model: "gpt-3.5-turbo".to_string(),
            openai_base_url: "https://api.openai.com".to_string(),
            anthropic_api_key: None,
            anthropic_model: "claude-3-sonnet-20240229".to_string(),
            anthropic_base_url: "https://api.anthropic.com".to_string(),
            request_timeout: Duration::from_secs(30),
        }
    }

    #[test]
    fn test_selected_api_key_for_configured_provider() {
        let config = llm_config(LlmProvider::OpenAI);
        assert_eq!(config.selected_api_key().unwrap(), "sk-test");
        assert_eq!(config.selected_model(), "gpt-3.5-turbo");
    }

    #[test]
    fn test_selected_api_key_missing_is_configuration_error() {
        let config = llm_config(LlmProvider::Anthropic);
        let err = config.selected_api_key().unwrap_err();
        match err {
            CoreError::Configuration(message) => assert!(message.contains("ANTHROPIC_API_KEY")),
            other => panic!("expected configuration error, got {other:?}"),
        }
    }

    #[test]
    fn test_blank_api_key_is_rejected() {
        let mut config = llm_config(LlmProvider::OpenAI);
        config.openai_api_key = Some("   ".to_string());
        assert!(matches!(
            config.selected_api_key(),
            Err(CoreError::Configuration(_))
        ));
    }
}
