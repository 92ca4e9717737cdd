use std::sync::Arc;
use std::time::Duration;

use crate::application::ports::{SpeechEngine, SpeechEngineError};

use super::google_translate_speech_engine::GoogleTranslateSpeechEngine;
use super::mock_speech_engine::MockSpeechEngine;
use super::openai_speech_engine::OpenAiSpeechEngine;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpeechProvider {
    Google,
    OpenAi,
    Mock,
}

pub struct SpeechEngineFactory;

impl SpeechEngineFactory {
    pub fn create(
        provider: SpeechProvider,
        language: &str,
        model: &str,
        voice: &str,
        api_key: Option<String>,
        base_url: Option<String>,
        timeout: Duration,
    ) -> Result<Arc<dyn SpeechEngine>, SpeechEngineError> {
        let http = || {
            reqwest::Client::builder()
                .timeout(timeout)
                .build()
                .map_err(|e| SpeechEngineError::ApiRequestFailed(e.to_string()))
        };

        match provider {
            SpeechProvider::Google => {
                let engine = GoogleTranslateSpeechEngine::new(language.to_string(), base_url)
                    .with_http_client(http()?);
                Ok(Arc::new(engine))
            }
            SpeechProvider::OpenAi => {
                let key = api_key.ok_or_else(|| {
                    SpeechEngineError::ApiRequestFailed(
                        "API key required for speech synthesis".to_string(),
                    )
                })?;
                let base_url = base_url.ok_or_else(|| {
                    SpeechEngineError::ApiRequestFailed(
                        "base_url required for OpenAI speech synthesis".to_string(),
                    )
                })?;
                let engine = OpenAiSpeechEngine::new(
                    key,
                    base_url,
                    model.to_string(),
                    voice.to_string(),
                )
                .with_http_client(http()?);
                Ok(Arc::new(engine))
            }
            SpeechProvider::Mock => Ok(Arc::new(MockSpeechEngine)),
        }
    }
}
