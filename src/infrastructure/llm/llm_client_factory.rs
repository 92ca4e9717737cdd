use std::sync::Arc;
use std::time::Duration;

use crate::application::ports::{CompletionError, LlmClient};

use super::mock_llm_client::MockLlmClient;
use super::openai_client::OpenAiClient;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LlmProvider {
    OpenAi,
    Mock,
}

pub struct LlmClientFactory;

impl LlmClientFactory {
    pub fn create(
        provider: LlmProvider,
        model: &str,
        api_key: Option<String>,
        base_url: &str,
        timeout: Duration,
    ) -> Result<Arc<dyn LlmClient>, CompletionError> {
        match provider {
            LlmProvider::OpenAi => {
                let key = api_key.ok_or_else(|| {
                    CompletionError::Unauthorized("API key required for chat completions".into())
                })?;
                let http = reqwest::Client::builder()
                    .timeout(timeout)
                    .build()
                    .map_err(|e| CompletionError::ApiRequestFailed(e.to_string()))?;
                let client = OpenAiClient::new(key, base_url.to_string(), model.to_string())
                    .with_http_client(http);
                Ok(Arc::new(client))
            }
            LlmProvider::Mock => Ok(Arc::new(MockLlmClient)),
        }
    }
}
