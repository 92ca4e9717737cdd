use async_trait::async_trait;
use bytes::Bytes;
use reqwest::StatusCode;
use serde::Serialize;

use crate::application::ports::{SpeechEngine, SpeechEngineError};

pub struct OpenAiSpeechEngine {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
    voice: String,
}

#[derive(Serialize)]
struct SpeechRequest<'a> {
    model: &'a str,
    input: &'a str,
    voice: &'a str,
    response_format: &'a str,
}

impl OpenAiSpeechEngine {
    pub fn new(api_key: String, base_url: String, model: String, voice: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            model,
            voice,
        }
    }

    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }
}

#[async_trait]
impl SpeechEngine for OpenAiSpeechEngine {
    async fn synthesize(&self, text: &str) -> Result<Bytes, SpeechEngineError> {
        if text.trim().is_empty() {
            return Err(SpeechEngineError::NoSpeakableText);
        }

        let request_body = SpeechRequest {
            model: &self.model,
            input: text,
            voice: &self.voice,
            response_format: "mp3",
        };

        tracing::debug!(model = %self.model, voice = %self.voice, "Sending text to speech API");

        let response = self
            .client
            .post(format!("{}/audio/speech", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| SpeechEngineError::ApiRequestFailed(format!("request: {}", e)))?;

        if response.status() == StatusCode::TOO_MANY_REQUESTS {
            return Err(SpeechEngineError::RateLimited);
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(SpeechEngineError::ApiRequestFailed(format!(
                "status {}: {}",
                status, body
            )));
        }

        let audio = response
            .bytes()
            .await
            .map_err(|e| SpeechEngineError::InvalidResponse(format!("body: {}", e)))?;

        tracing::info!(bytes = audio.len(), "Speech synthesis completed");

        Ok(audio)
    }
}
