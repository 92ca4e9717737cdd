mod google_translate_speech_engine;
mod mock_speech_engine;
mod openai_speech_engine;
mod speech_engine_factory;

pub use google_translate_speech_engine::{
    GoogleTranslateSpeechEngine, MAX_CHUNK_CHARS, split_for_speech,
};
pub use mock_speech_engine::MockSpeechEngine;
pub use openai_speech_engine::OpenAiSpeechEngine;
pub use speech_engine_factory::{SpeechEngineFactory, SpeechProvider};
