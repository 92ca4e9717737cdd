mod audio_store;
mod llm_client;
mod speech_engine;
mod transcription_engine;

pub use audio_store::{AudioStore, AudioStoreError, StoredAudio};
pub use llm_client::{CompletionError, LlmClient};
pub use speech_engine::{SpeechEngine, SpeechEngineError};
pub use transcription_engine::{TranscriptionEngine, TranscriptionError};
