use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::domain::{
    common::{LlmProvider, entities::app_errors::CoreError},
    meal_plan::ports::{CompletionRequest, TextCompleter},
};

#[derive(Debug, Clone)]
pub struct OpenAILLMClient {
    api_key: String,
    model_name: String,
    base_url: String,
    client: Client,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    response_format: ResponseFormat,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: MessageResponse,
}

#[derive(Debug, Deserialize)]
struct MessageResponse {
    content: Option<String>,
}

impl OpenAILLMClient {
    pub fn new(
        api_key: String,
        model_name: String,
        base_url: String,
        timeout: Duration,
    ) -> Result<Self, CoreError> {
        let client = Client::builder().timeout(timeout).build().map_err(|e| {
            CoreError::Configuration(format!("Failed to build OpenAI HTTP client: {}", e))
        })?;

        Ok(Self {
            api_key,
            model_name,
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    async fn call_openai_api(&self, request: ChatCompletionRequest) -> Result<String, CoreError> {
        let url = format!("{}/v1/chat/completions", self.base_url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("OpenAI API request failed: {}", e);
                CoreError::ExternalServiceError(format!("LLM API error: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!("OpenAI API error: {} - {}", status, error_text);
            return Err(CoreError::ExternalServiceError(format!(
                "LLM API returned error: {} - {}",
                status, error_text
            )));
        }

        let completion: ChatCompletionResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse OpenAI response: {}", e);
            CoreError::ExternalServiceError(format!("Failed to parse LLM response: {}", e))
        })?;

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| CoreError::ExternalServiceError("No response from LLM".to_string()))
    }
}

impl TextCompleter for OpenAILLMClient {
    async fn complete(&self, request: CompletionRequest) -> Result<String, CoreError> {
        let request = ChatCompletionRequest {
            model: self.model_name.clone(),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: request.system,
                },
                ChatMessage {
                    role: "user",
                    content: request.prompt,
                },
            ],
            response_format: ResponseFormat {
                kind: "json_object",
            },
            temperature: 0.7,
        };

        self.call_openai_api(request).await
    }

    fn provider(&self) -> LlmProvider {
        LlmProvider::OpenAI
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

    async fn chat_completions(headers: HeaderMap, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
        let authorized = headers
            .get("authorization")
            .and_then(|h| h.to_str().ok())
            .is_some_and(|h| h == "Bearer sk-test");
        if !authorized {
            return (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": { "message": "Incorrect API key provided" } })),
            );
        }

        let reply = match body["model"].as_str() {
            Some("empty-model") => json!({ "choices": [] }),
            _ => json!({
                "choices": [{
                    "message": {
                        "role": "assistant",
                        "content": format!(
                            "{}|{}|{}|{}",
                            body["messages"][0]["role"].as_str().unwrap_or_default(),
                            body["messages"][1]["content"].as_str().unwrap_or_default(),
                            body["response_format"]["type"].as_str().unwrap_or_default(),
                            body["model"].as_str().unwrap_or_default(),
                        )
                    }
                }]
            }),
        };

        (StatusCode::OK, Json(reply))
    }

    async fn spawn_stub() -> String {
        let app = Router::new().route("/v1/chat/completions", post(chat_completions));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}/")
    }

    fn client(base_url: String, api_key: &str, model: &str) -> OpenAILLMClient {
        OpenAILLMClient::new(
            api_key.to_string(),
            model.to_string(),
            base_url,
            Duration::from_secs(5),
        )
        .unwrap()
    }

    fn request() -> CompletionRequest {
        CompletionRequest {
            system: "be terse".to_string(),
            prompt: "plan my week".to_string(),
        }
    }

    #[tokio::test]
    async fn test_complete_sends_chat_request() {
        let base_url = spawn_stub().await;
        let client = client(base_url, "sk-test", "gpt-3.5-turbo");

        let text = client.complete(request()).await.unwrap();

        assert_eq!(text, "system|plan my week|json_object|gpt-3.5-turbo");
        assert_eq!(client.provider(), LlmProvider::OpenAI);
        assert_eq!(client.model(), "gpt-3.5-turbo");
    }

    #[tokio::test]
    async fn test_auth_failure_is_external_service_error() {
        let base_url = spawn_stub().await;
        let client = client(base_url, "sk-wrong", "gpt-3.5-turbo");

        let err = client.complete(request()).await.unwrap_err();

        match err {
            CoreError::ExternalServiceError(message) => assert!(message.contains("401")),
            other => panic!("expected external service error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_empty_choices_is_external_service_error() {
        let base_url = spawn_stub().await;
        let client = client(base_url, "sk-test", "empty-model");

        let err = client.complete(request()).await.unwrap_err();

        assert!(matches!(err, CoreError::ExternalServiceError(_)));
    }

    #[tokio::test]
    async fn test_unreachable_provider_is_external_service_error() {
        let client = client("http://127.0.0.1:9".to_string(), "sk-test", "gpt-3.5-turbo");

        let err = client.complete(request()).await.unwrap_err();

        assert!(matches!(err, CoreError::ExternalServiceError(_)));
    }
}
