use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::domain::{
    common::{LlmProvider, entities::app_errors::CoreError},
    meal_plan::ports::{CompletionRequest, TextCompleter},
};

const ANTHROPIC_VERSION: &str = "2023-06-01";
const MAX_TOKENS: u32 = 4000;

#[derive(Debug, Clone)]
pub struct AnthropicLLMClient {
    api_key: String,
    model_name: String,
    base_url: String,
    client: Client,
}

#[derive(Debug, Serialize)]
struct MessagesRequest {
    model: String,
    max_tokens: u32,
    system: String,
    messages: Vec<Message>,
}

#[derive(Debug, Serialize)]
struct Message {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

impl AnthropicLLMClient {
    pub fn new(
        api_key: String,
        model_name: String,
        base_url: String,
        timeout: Duration,
    ) -> Result<Self, CoreError> {
        let client = Client::builder().timeout(timeout).build().map_err(|e| {
            CoreError::Configuration(format!("Failed to build Anthropic HTTP client: {}", e))
        })?;

        Ok(Self {
            api_key,
            model_name,
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    async fn call_anthropic_api(&self, request: MessagesRequest) -> Result<String, CoreError> {
        let url = format!("{}/v1/messages", self.base_url);

        let response = self
            .client
            .post(&url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Anthropic API request failed: {}", e);
                CoreError::ExternalServiceError(format!("LLM API error: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!("Anthropic API error: {} - {}", status, error_text);
            return Err(CoreError::ExternalServiceError(format!(
                "LLM API returned error: {} - {}",
                status, error_text
            )));
        }

        let message: MessagesResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse Anthropic response: {}", e);
            CoreError::ExternalServiceError(format!("Failed to parse LLM response: {}", e))
        })?;

        message
            .content
            .into_iter()
            .find(|block| block.kind == "text")
            .and_then(|block| block.text)
            .ok_or_else(|| CoreError::ExternalServiceError("No response from LLM".to_string()))
    }
}

impl TextCompleter for AnthropicLLMClient {
    async fn complete(&self, request: CompletionRequest) -> Result<String, CoreError> {
        let request = MessagesRequest {
            model: self.model_name.clone(),
            max_tokens: MAX_TOKENS,
            system: request.system,
            messages: vec![Message {
                role: "user",
                content: request.prompt,
            }],
        };

        self.call_anthropic_api(request).await
    }

    fn provider(&self) -> LlmProvider {
        LlmProvider::Anthropic
    }

    fn model(&self) -> &str {
        &self.model_name
    }
}

#[cfg(test)]
mod tests {
    use axum::{Json, Router, http::HeaderMap, http::StatusCode, routing::post};
    use serde_json::{Value, json};

    use super::*;

    async fn messages(headers: HeaderMap, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
        let header = |name: &str| {
            headers
                .get(name)
                .and_then(|h| h.to_str().ok())
                .unwrap_or_default()
                .to_string()
        };
        if header("x-api-key") != "ant-test" {
            return (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "type": "error", "error": { "type": "authentication_error" } })),
            );
        }
        if header("anthropic-version") != ANTHROPIC_VERSION {
            return (StatusCode::BAD_REQUEST, Json(json!({ "type": "error" })));
        }

        let summary = format!(
            "{}|{}|{}",
            body["system"].as_str().unwrap_or_default(),
            body["messages"][0]["content"].as_str().unwrap_or_default(),
            body["max_tokens"]
        );

        (
            StatusCode::OK,
            Json(json!({
                "id": "msg_1",
                "type": "message",
                "role": "assistant",
                "content": [
                    { "type": "thinking", "thinking": "..." },
                    { "type": "text", "text": summary }
                ]
            })),
        )
    }

    async fn spawn_stub() -> String {
        let app = Router::new().route("/v1/messages", post(messages));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn request() -> CompletionRequest {
        CompletionRequest {
            system: "json only".to_string(),
            prompt: "plan my week".to_string(),
        }
    }

    #[tokio::test]
    async fn test_complete_returns_first_text_block() {
        let base_url = spawn_stub().await;
        let client = AnthropicLLMClient::new(
            "ant-test".to_string(),
            "claude-3-sonnet-20240229".to_string(),
            base_url,
            Duration::from_secs(5),
        )
        .unwrap();

        let text = client.complete(request()).await.unwrap();

        assert_eq!(text, "json only|plan my week|4000");
        assert_eq!(client.provider(), LlmProvider::Anthropic);
    }

    #[tokio::test]
    async fn test_wrong_key_is_external_service_error() {
        let base_url = spawn_stub().await;
        let client = AnthropicLLMClient::new(
            "ant-wrong".to_string(),
            "claude-3-sonnet-20240229".to_string(),
            base_url,
            Duration::from_secs(5),
        )
        .unwrap();

        let err = client.complete(request()).await.unwrap_err();

        match err {
            CoreError::ExternalServiceError(message) => assert!(message.contains("401")),
            other => panic!("expected external service error, got {other:?}"),
        }
    }
}
