pub mod anthropic_client;
pub mod openai_client;

use crate::domain::{
    common::{LLMConfig, LlmProvider, entities::app_errors::CoreError},
    meal_plan::ports::{CompletionRequest, TextCompleter},
};

pub use anthropic_client::AnthropicLLMClient;
pub use openai_client::OpenAILLMClient;

/// The provider adapter chosen at startup.
#[derive(Debug, Clone)]
pub enum LlmClient {
    OpenAI(OpenAILLMClient),
    Anthropic(AnthropicLLMClient),
}

impl LlmClient {
    /// Builds the adapter for the selected provider. A missing credential is a configuration error.
    pub fn from_config(config: &LLMConfig) -> Result<Self, CoreError> {
        let api_key = config.selected_api_key()?;
        let model = config.selected_model().to_string();

        let client = match config.provider {
            LlmProvider::OpenAI => LlmClient::OpenAI(OpenAILLMClient::new(
                api_key,
                model,
                config.openai_base_url.clone(),
                config.request_timeout,
            )?),
            LlmProvider::Anthropic => LlmClient::Anthropic(AnthropicLLMClient::new(
                api_key,
                model,
                config.anthropic_base_url.clone(),
                config.request_timeout,
            )?),
        };

        Ok(client)
    }
}

impl TextCompleter for LlmClient {
    async fn complete(&self, request: CompletionRequest) -> Result<String, CoreError> {
        match self {
            LlmClient::OpenAI(client) => client.complete(request).await,
            LlmClient::Anthropic(client) => client.complete(request).await,
        }
    }

    fn provider(&self) -> LlmProvider {
        match self {
            LlmClient::OpenAI(client) => client.provider(),
            LlmClient::Anthropic(client) => client.provider(),
        }
    }

    fn model(&self) -> &str {
        match self {
            LlmClient::OpenAI(client) => client.model(),
            LlmClient::Anthropic(client) => client.model(),
        }
    }
}
