use async_trait::async_trait;

use crate::domain::AudioFormat;

#[async_trait]
pub trait TranscriptionEngine: Send + Sync {
    async fn transcribe(
        &self,
        audio_data: &[u8],
        format: AudioFormat,
    ) -> Result<String, TranscriptionError>;
}

#[derive(Debug, thiserror::Error)]
pub enum TranscriptionError {
    #[error("audio file not found: {0}")]
    AudioNotFound(String),
    #[error("audio file is empty: {0}")]
    EmptyAudio(String),
    #[error("unsupported audio format: {0}")]
    UnsupportedFormat(String),
    #[error("storage error: {0}")]
    Storage(String),
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("rate limited")]
    RateLimited,
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}
