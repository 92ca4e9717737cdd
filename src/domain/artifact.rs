use uuid::Uuid;

use super::audio_format::AudioFormat;
use super::storage_path::StoragePath;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ArtifactId(Uuid);

impl ArtifactId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for ArtifactId {
    fn default() -> Self {
        Self::new()
    }
}

/// An audio file written once to a store: an uploaded question or a
/// synthesized answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioArtifact {
    pub path: StoragePath,
    pub format: AudioFormat,
    pub size_bytes: u64,
}
