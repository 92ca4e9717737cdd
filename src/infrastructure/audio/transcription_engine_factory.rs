use std::sync::Arc;
use std::time::Duration;

use crate::application::ports::{TranscriptionEngine, TranscriptionError};

use super::mock_transcription_engine::MockTranscriptionEngine;
use super::openai_whisper_engine::OpenAiWhisperEngine;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TranscriptionProvider {
    OpenAi,
    Mock,
}

pub struct TranscriptionEngineFactory;

impl TranscriptionEngineFactory {
    pub fn create(
        provider: TranscriptionProvider,
        model: &str,
        api_key: Option<String>,
        base_url: Option<String>,
        timeout: Duration,
    ) -> Result<Arc<dyn TranscriptionEngine>, TranscriptionError> {
        match provider {
            TranscriptionProvider::OpenAi => {
                let key = api_key.ok_or_else(|| {
                    TranscriptionError::ApiRequestFailed(
                        "API key required for Whisper transcription".to_string(),
                    )
                })?;
                let http = reqwest::Client::builder()
                    .timeout(timeout)
                    .build()
                    .map_err(|e| TranscriptionError::ApiRequestFailed(e.to_string()))?;
                let engine = OpenAiWhisperEngine::new(key, base_url, Some(model.to_string()))
                    .with_http_client(http);
                Ok(Arc::new(engine))
            }
            TranscriptionProvider::Mock => Ok(Arc::new(MockTranscriptionEngine::default())),
        }
    }
}
