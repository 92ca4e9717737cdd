use bytes::Bytes;

use crate::application::ports::{SpeechEngine, SpeechEngineError};

/// An ID3 header followed by one silent MPEG-1 Layer III frame header.
const SILENT_MP3: &[u8] = &[
    0x49, 0x44, 0x33, 0x04, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0xFF, 0xFB, 0x90, 0x64, 0x00,
];

pub struct MockSpeechEngine;

#[async_trait::async_trait]
impl SpeechEngine for MockSpeechEngine {
    async fn synthesize(&self, text: &str) -> Result<Bytes, SpeechEngineError> {
        if text.trim().is_empty() {
            return Err(SpeechEngineError::NoSpeakableText);
        }
        Ok(Bytes::from_static(SILENT_MP3))
    }
}
