use crate::application::ports::{TranscriptionEngine, TranscriptionError};
use crate::domain::AudioFormat;

pub struct MockTranscriptionEngine {
    transcript: String,
}

impl MockTranscriptionEngine {
    pub fn new(transcript: impl Into<String>) -> Self {
        Self {
            transcript: transcript.into(),
        }
    }
}

impl Default for MockTranscriptionEngine {
    fn default() -> Self {
        Self::new("What fertilizer should I use for rice?")
    }
}

#[async_trait::async_trait]
impl TranscriptionEngine for MockTranscriptionEngine {
    async fn transcribe(
        &self,
        _audio_data: &[u8],
        _format: AudioFormat,
    ) -> Result<String, TranscriptionError> {
        Ok(self.transcript.clone())
    }
}
