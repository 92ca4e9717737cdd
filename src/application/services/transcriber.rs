use std::sync::Arc;

use crate::application::ports::{
    AudioStore, AudioStoreError, TranscriptionEngine, TranscriptionError,
};
use crate::domain::StoragePath;

pub struct Transcriber {
    engine: Arc<dyn TranscriptionEngine>,
    uploads: Arc<dyn AudioStore>,
}

impl Transcriber {
    pub fn new(engine: Arc<dyn TranscriptionEngine>, uploads: Arc<dyn AudioStore>) -> Self {
        Self { engine, uploads }
    }

    /// Reads a persisted upload and returns the engine's text as received.
    pub async fn transcribe(&self, path: &StoragePath) -> Result<String, TranscriptionError> {
        let format = path
            .format()
            .ok_or_else(|| TranscriptionError::UnsupportedFormat(path.to_string()))?;

        let audio = self.uploads.fetch(path).await.map_err(|e| match e {
            AudioStoreError::NotFound(_) => TranscriptionError::AudioNotFound(path.to_string()),
            other => TranscriptionError::Storage(other.to_string()),
        })?;

        if audio.is_empty() {
            return Err(TranscriptionError::EmptyAudio(path.to_string()));
        }

        tracing::debug!(path = %path, bytes = audio.len(), format = %format, "Transcribing upload");

        self.engine.transcribe(&audio, format).await
    }
}
