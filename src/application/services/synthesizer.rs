use std::io;
use std::sync::Arc;

use bytes::Bytes;
use futures::stream;

use crate::application::ports::{AudioStore, AudioStoreError, SpeechEngine, SpeechEngineError};
use crate::domain::{ArtifactId, AudioArtifact, AudioFormat, StoragePath};

pub struct Synthesizer {
    engine: Arc<dyn SpeechEngine>,
    store: Arc<dyn AudioStore>,
}

impl Synthesizer {
    pub fn new(engine: Arc<dyn SpeechEngine>, store: Arc<dyn AudioStore>) -> Self {
        Self { engine, store }
    }

    /// Speaks `text` and writes the audio under a freshly generated name, so
    /// identical text never maps to the same file.
    pub async fn synthesize(&self, text: &str) -> Result<AudioArtifact, SynthesisError> {
        if text.trim().is_empty() {
            return Err(SynthesisError::EmptyText);
        }

        let audio = self.engine.synthesize(text).await?;
        if audio.is_empty() {
            return Err(SynthesisError::Engine(SpeechEngineError::InvalidResponse(
                "engine returned no audio".to_string(),
            )));
        }

        let format = AudioFormat::Mp3;
        let path = StoragePath::new(&ArtifactId::new(), format);
        let content_length = audio.len() as u64;
        let byte_stream = Box::pin(stream::once(async move { Ok::<Bytes, io::Error>(audio) }));

        let size_bytes = self
            .store
            .store(&path, byte_stream, Some(content_length))
            .await?;

        tracing::info!(path = %path, bytes = size_bytes, "Answer audio written");

        Ok(AudioArtifact {
            path,
            format,
            size_bytes,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SynthesisError {
    #[error("no text to synthesize")]
    EmptyText,
    #[error("speech engine: {0}")]
    Engine(#[from] SpeechEngineError),
    #[error("storage: {0}")]
    Storage(#[from] AudioStoreError),
}
