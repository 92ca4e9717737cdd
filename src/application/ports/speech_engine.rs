use async_trait::async_trait;
use bytes::Bytes;

/// Hosted text-to-speech. Implementations return MP3 audio.
#[async_trait]
pub trait SpeechEngine: Send + Sync {
    async fn synthesize(&self, text: &str) -> Result<Bytes, SpeechEngineError>;
}

#[derive(Debug, thiserror::Error)]
pub enum SpeechEngineError {
    #[error("nothing to speak")]
    NoSpeakableText,
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("rate limited")]
    RateLimited,
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}
