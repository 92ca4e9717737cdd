use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use crate::application::ports::{CompletionError, LlmClient};
use crate::domain::ChatTurn;

/// Chat completions against any OpenAI-compatible endpoint (Groq by default).
pub struct OpenAiClient {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

impl OpenAiClient {
    pub fn new(api_key: String, base_url: String, model: String) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            model,
        }
    }

    pub fn with_http_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }
}

#[async_trait]
impl LlmClient for OpenAiClient {
    async fn complete(&self, turns: &[ChatTurn]) -> Result<String, CompletionError> {
        let request_body = ChatCompletionRequest {
            model: &self.model,
            messages: turns
                .iter()
                .map(|turn| ChatMessage {
                    role: turn.role.as_str(),
                    content: &turn.content,
                })
                .collect(),
        };

        tracing::debug!(model = %self.model, turns = turns.len(), "Sending chat completion request");

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| CompletionError::ApiRequestFailed(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(CompletionError::RateLimited);
        }

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            let body = response.text().await.unwrap_or_default();
            return Err(CompletionError::Unauthorized(format!("HTTP {}: {}", status, body)));
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CompletionError::ApiRequestFailed(format!(
                "HTTP {}: {}",
                status, body
            )));
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| CompletionError::InvalidResponse(e.to_string()))?;

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| CompletionError::InvalidResponse("no choices in response".to_string()))
    }
}
